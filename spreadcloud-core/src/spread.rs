//! Depth-axis spread around a pivot

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// Index of the coordinate reshaped by [`SpreadConfig`].
///
/// The other two coordinates always pass through unchanged.
pub const DEPTH_AXIS: usize = 2;

/// Scales the depth axis of a point toward or away from a fixed pivot value.
///
/// `factor = 1` leaves coordinates untouched, `factor = 0` flattens every
/// point onto `pivot`, values in between interpolate and values above 1
/// exaggerate. Negative factors mirror the axis; nothing here rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadConfig {
    pub pivot: f32,
    pub factor: f32,
}

impl SpreadConfig {
    /// Create a spread configuration
    pub fn new(pivot: f32, factor: f32) -> Self {
        Self { pivot, factor }
    }

    /// The configuration that reproduces the original layout
    pub fn identity() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Collapse every point onto `pivot` along the depth axis
    pub fn flattened(pivot: f32) -> Self {
        Self::new(pivot, 0.0)
    }

    /// Reshape a single depth coordinate.
    ///
    /// A value equal to `pivot` maps to `pivot` for every factor.
    #[inline]
    pub fn apply(&self, z: f32) -> f32 {
        (z - self.pivot) * self.factor + self.pivot
    }

    /// Reshape the depth axis of `position`, leaving x and y as they are
    #[inline]
    pub fn apply_to(&self, position: &Point3f) -> Point3f {
        let mut spread = *position;
        spread[DEPTH_AXIS] = self.apply(position[DEPTH_AXIS]);
        spread
    }
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_factor() {
        for pivot in [-3.0, 0.0, 4.0, 1e3] {
            let spread = SpreadConfig::new(pivot, 1.0);
            for z in [-10.0, -0.5, 0.0, 2.25, 10.0] {
                assert_relative_eq!(spread.apply(z), z, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_pivot_is_fixed() {
        for factor in [0.0, 0.25, 1.0, 3.0, -2.0] {
            let spread = SpreadConfig::new(4.0, factor);
            assert_eq!(spread.apply(4.0), 4.0);
        }
    }

    #[test]
    fn test_collapse() {
        let spread = SpreadConfig::flattened(-1.5);
        for z in [-100.0, -1.5, 0.0, 7.0] {
            assert_eq!(spread.apply(z), -1.5);
        }
    }

    #[test]
    fn test_affine_in_depth() {
        let spread = SpreadConfig::new(4.0, 0.5);
        for z in [-8.0, 0.0, 3.0, 10.0] {
            let expected = spread.factor * z + (1.0 - spread.factor) * spread.pivot;
            assert_relative_eq!(spread.apply(z), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_worked_example() {
        let spread = SpreadConfig::new(4.0, 0.5);
        let out = spread.apply_to(&Point3f::new(1.0, 2.0, 10.0));
        assert_eq!(out, Point3f::new(1.0, 2.0, 7.0));

        let flat = SpreadConfig::flattened(0.0);
        assert_eq!(flat.apply_to(&Point3f::origin()), Point3f::origin());
    }

    #[test]
    fn test_exaggerate_and_mirror() {
        assert_eq!(SpreadConfig::new(1.0, 2.0).apply(3.0), 5.0);
        assert_eq!(SpreadConfig::new(1.0, -1.0).apply(3.0), -1.0);
    }
}
