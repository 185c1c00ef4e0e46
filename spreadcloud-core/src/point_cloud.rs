//! Point cloud container

use crate::error::{Error, Result};
use crate::point::*;
use crate::spread::SpreadConfig;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container.
///
/// Owned by whoever loads the embedding; renderers only ever borrow the
/// points as a slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A cloud of colored embedding points
pub type EmbeddingCloud = PointCloud<EmbeddingPoint>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.points
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> Extend<T> for PointCloud<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl EmbeddingCloud {
    /// Build a cloud from parallel position and color arrays.
    ///
    /// Both arrays must have the same length.
    pub fn from_attributes(positions: &[[f32; 3]], colors: &[Rgb]) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(Error::InvalidData(format!(
                "attribute length mismatch: {} positions, {} colors",
                positions.len(),
                colors.len()
            )));
        }

        Ok(positions
            .iter()
            .zip(colors)
            .map(|(position, color)| EmbeddingPoint::new(*position, *color))
            .collect())
    }

    /// Bake a spread into the stored positions.
    ///
    /// Renderers apply the spread per frame instead; this is for exporting a
    /// squashed layout.
    pub fn apply_spread(&mut self, spread: &SpreadConfig) {
        for point in &mut self.points {
            point.position = spread.apply_to(&point.position);
        }
    }
}
