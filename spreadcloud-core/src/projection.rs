//! The spread-projection transform
//!
//! Every point of a frame goes through [`project_point`] independently:
//!
//! 1. the depth coordinate is reshaped by the frame's [`SpreadConfig`],
//! 2. the reshaped position is taken through `projection * view` into clip
//!    space (homogeneous, `w` not yet divided out),
//! 3. the frame's point size is attached unchanged,
//! 4. the color gains a constant alpha of `1.0`.
//!
//! The function is pure and total. Inputs are not validated; non-finite
//! values propagate through ordinary float arithmetic.

use crate::camera::Camera;
use crate::point::{EmbeddingPoint, Point3f, PointSize, Rgb, Rgba};
use crate::spread::SpreadConfig;
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// Read-only inputs shared by every point of one frame.
///
/// The value is `Copy`, so the caller snapshots it once per frame and hands
/// out `&FrameParams` to however many workers evaluate the points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameParams {
    pub camera: Camera,
    pub spread: SpreadConfig,
    pub point_size: PointSize,
}

impl FrameParams {
    pub fn new(camera: Camera, spread: SpreadConfig, point_size: PointSize) -> Self {
        Self {
            camera,
            spread,
            point_size,
        }
    }
}

/// Output of the transform for one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Homogeneous clip-space position
    pub clip: Vector4<f32>,
    /// Rendered size, identical for every point of the frame
    pub size: f32,
    /// Input color with alpha forced to `1.0`
    pub color: Rgba,
}

/// Project one embedding point for the given frame
#[inline]
pub fn project_point(point: &EmbeddingPoint, frame: &FrameParams) -> ProjectedPoint {
    project_attributes(
        &point.position,
        point.color,
        &frame.camera,
        &frame.spread,
        frame.point_size,
    )
}

/// Attribute-level form of [`project_point`]
#[inline]
pub fn project_attributes(
    position: &Point3f,
    color: Rgb,
    camera: &Camera,
    spread: &SpreadConfig,
    point_size: PointSize,
) -> ProjectedPoint {
    let spread_position = spread.apply_to(position);
    let clip = camera.projection * (camera.view * spread_position.to_homogeneous());

    ProjectedPoint {
        clip,
        size: point_size.get(),
        color: [color[0], color[1], color[2], 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Vector3};

    fn identity_frame(spread: SpreadConfig) -> FrameParams {
        FrameParams::new(Camera::default(), spread, PointSize(3.0))
    }

    #[test]
    fn test_identity_camera_exposes_spread_position() {
        let point = EmbeddingPoint::new([1.0, 2.0, 10.0], [0.2, 0.4, 0.6]);
        let out = project_point(&point, &identity_frame(SpreadConfig::new(4.0, 0.5)));

        assert_eq!(out.clip, Vector4::new(1.0, 2.0, 7.0, 1.0));
        assert_eq!(out.size, 3.0);
        assert_eq!(out.color, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_degenerate_origin() {
        let point = EmbeddingPoint::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let out = project_point(&point, &identity_frame(SpreadConfig::flattened(0.0)));
        assert_eq!(out.clip, Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_matches_view_projection_of_spread_position() {
        let view = Matrix4::look_at_rh(
            &Point3f::new(3.0, 4.0, 12.0),
            &Point3f::origin(),
            &Vector3::y(),
        );
        let projection = Matrix4::new_perspective(16.0 / 9.0, 1.0, 0.1, 100.0);
        let camera = Camera::new(view, projection);
        let spread = SpreadConfig::new(-1.0, 0.25);
        let frame = FrameParams::new(camera, spread, PointSize(2.0));

        let point = EmbeddingPoint::new([0.5, -1.5, 3.0], [1.0, 0.0, 0.5]);
        let out = project_point(&point, &frame);

        let expected = camera.view_projection()
            * Vector4::new(0.5, -1.5, (3.0 + 1.0) * 0.25 - 1.0, 1.0);
        assert_relative_eq!(out.clip, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_alpha_forced_for_any_color() {
        let frame = identity_frame(SpreadConfig::default());
        for color in [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.3, 0.7, 0.11]] {
            let out = project_point(&EmbeddingPoint::new([1.0, 1.0, 1.0], color), &frame);
            assert_eq!(&out.color[..3], &color[..]);
            assert_eq!(out.color[3], 1.0);
        }
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let frame = identity_frame(SpreadConfig::new(0.0, f32::NAN));
        let out = project_point(&EmbeddingPoint::new([1.0, 2.0, 3.0], [0.5; 3]), &frame);
        assert_eq!(out.clip.x, 1.0);
        assert_eq!(out.clip.y, 2.0);
        assert!(out.clip.z.is_nan());
    }
}
