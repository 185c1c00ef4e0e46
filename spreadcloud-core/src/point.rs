//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// An RGB color with channels in `[0, 1]`
pub type Rgb = [f32; 3];

/// An RGBA color with channels in `[0, 1]`
pub type Rgba = [f32; 4];

/// One point of an embedding: three reduced coordinates and a display color.
///
/// The layout is `#[repr(C)]` and tightly packed (six `f32`s), so slices of
/// these can be uploaded to vertex or storage buffers as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct EmbeddingPoint {
    pub position: Point3f,
    pub color: Rgb,
}

impl EmbeddingPoint {
    /// Create a point from raw coordinates and color
    pub fn new(position: [f32; 3], color: Rgb) -> Self {
        Self {
            position: Point3f::from(position),
            color,
        }
    }
}

impl Default for EmbeddingPoint {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl From<EmbeddingPoint> for Point3f {
    fn from(point: EmbeddingPoint) -> Self {
        point.position
    }
}

/// Rendered size of every point in a draw, in pixels.
///
/// One value per frame; it is never computed per point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSize(pub f32);

impl PointSize {
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for PointSize {
    fn default() -> Self {
        Self(2.0)
    }
}

impl From<f32> for PointSize {
    fn from(size: f32) -> Self {
        Self(size)
    }
}
