//! Per-frame camera matrices

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// View and projection matrices for one frame.
///
/// Neither matrix is checked; a singular matrix simply produces non-finite
/// clip coordinates downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

impl Camera {
    /// Create a camera from its matrices
    pub fn new(view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self { view, projection }
    }

    /// Combined `projection * view` matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity())
    }
}
