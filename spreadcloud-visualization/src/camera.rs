//! Orbit camera for exploring an embedding

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use spreadcloud_core::Camera;

/// Maps OpenGL clip depth `[-1, 1]` onto the `[0, 1]` range wgpu expects
#[rustfmt::skip]
pub fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Camera controller and parameters
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub proj: Perspective,
    pub view: ArcBall,
    pub control: ArcBallController,
}

impl OrbitCamera {
    /// Projection matrix for a viewport of the given size
    pub fn projection(&self, width: f32, height: f32) -> Matrix4<f32> {
        self.proj.matrix(width, height)
    }

    /// View matrix
    pub fn view(&self) -> Matrix4<f32> {
        self.view.matrix()
    }

    /// Matrices for one frame
    pub fn frame_camera(&self, width: f32, height: f32) -> Camera {
        Camera::new(self.view(), self.projection(width, height))
    }

    /// Swivel around the pivot by a pointer delta
    pub fn pivot(&mut self, delta_x: f32, delta_y: f32) {
        self.control.pivot(&mut self.view, delta_x, delta_y)
    }

    /// Move the pivot by a pointer delta; `rate_z` scales the depth component
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, rate_z: f32) {
        self.control.pan(&mut self.view, delta_x, delta_y, rate_z)
    }

    /// Move toward or away from the pivot by a scroll delta
    pub fn zoom(&mut self, delta: f32) {
        self.control.zoom(&mut self.view, delta)
    }
}

/// Perspective projection parameters
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    /// Vertical field of view in radians
    pub fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
}

impl Perspective {
    /// Right-handed perspective with `[0, 1]` clip depth
    pub fn matrix(&self, width: f32, height: f32) -> Matrix4<f32> {
        let perspective = Perspective3::new(width / height, self.fov, self.clip_near, self.clip_far);
        opengl_to_wgpu() * perspective.into_inner()
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov: 60.0f32.to_radians(),
            clip_near: 0.01,
            clip_far: 2_000.0,
        }
    }
}

/// Camera orbiting a pivot point
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcBall {
    pub pivot: Point3<f32>,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl ArcBall {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&(self.pivot + self.eye()), &self.pivot, &Vector3::y())
    }

    /// Offset of the eye from the pivot
    pub fn eye(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos().abs(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos().abs(),
        ) * self.distance
    }
}

impl Default for ArcBall {
    fn default() -> Self {
        Self {
            pivot: Point3::origin(),
            pitch: 0.3,
            yaw: -1.92,
            distance: 30.,
        }
    }
}

/// Sensitivities for turning pointer input into arcball motion
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcBallController {
    pub pan_sensitivity: f32,
    pub swivel_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub closest_zoom: f32,
}

impl ArcBallController {
    pub fn pivot(&self, arcball: &mut ArcBall, delta_x: f32, delta_y: f32) {
        arcball.yaw += delta_x * self.swivel_sensitivity;
        arcball.pitch += delta_y * self.swivel_sensitivity;

        arcball.pitch = arcball.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Screen-space pan, converted to world space through the inverse view.
    ///
    /// A singular or non-finite view matrix leaves the pivot where it is.
    pub fn pan(&self, arcball: &mut ArcBall, delta_x: f32, delta_y: f32, rate_z: f32) {
        let delta = Vector4::new(
            -delta_x * arcball.distance,
            delta_y * arcball.distance,
            0.0,
            0.0,
        ) * self.pan_sensitivity;

        let inv = arcball
            .matrix()
            .try_inverse()
            .filter(|inv| inv.iter().all(|v| v.is_finite()));
        let Some(inv) = inv else {
            log::debug!("Skipping pan: view matrix is not invertible");
            return;
        };

        let mut delta = (inv * delta).xyz();
        delta.z *= rate_z;
        if !delta.iter().all(|v| v.is_finite()) {
            log::debug!("Skipping pan: non-finite pivot offset");
            return;
        }
        arcball.pivot += delta;
    }

    pub fn zoom(&self, arcball: &mut ArcBall, delta: f32) {
        arcball.distance += delta * self.zoom_sensitivity.powi(2) * arcball.distance;
        arcball.distance = arcball.distance.max(self.closest_zoom);
    }
}

impl Default for ArcBallController {
    fn default() -> Self {
        Self {
            pan_sensitivity: 0.0015,
            swivel_sensitivity: 0.005,
            zoom_sensitivity: 0.04,
            closest_zoom: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eye_distance() {
        let arcball = ArcBall::default();
        assert_relative_eq!(arcball.eye().norm(), arcball.distance, epsilon = 1e-4);
    }

    #[test]
    fn test_pivot_is_in_front_of_camera() {
        let arcball = ArcBall {
            pivot: Point3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let in_view = arcball.matrix() * arcball.pivot.to_homogeneous();

        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(in_view.z, -arcball.distance, epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.pivot(0.0, 1e6);
        assert_eq!(camera.view.pitch, FRAC_PI_2);
        camera.pivot(0.0, -1e7);
        assert_eq!(camera.view.pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_zoom_respects_closest_distance() {
        let mut camera = OrbitCamera::default();
        camera.zoom(1.0);
        assert_relative_eq!(camera.view.distance, 30.0 * (1.0 + 0.04 * 0.04), epsilon = 1e-4);

        camera.zoom(-1e6);
        assert_eq!(camera.view.distance, camera.control.closest_zoom);
    }

    #[test]
    fn test_pan_depth_rate() {
        let mut flat = OrbitCamera::default();
        let mut deep = OrbitCamera::default();
        flat.pan(10.0, 0.0, 1.0);
        deep.pan(10.0, 0.0, 4.0);

        assert_relative_eq!(flat.view.pivot.x, deep.view.pivot.x, epsilon = 1e-6);
        assert_relative_eq!(flat.view.pivot.y, deep.view.pivot.y, epsilon = 1e-6);
        assert_relative_eq!(deep.view.pivot.z, flat.view.pivot.z * 4.0, epsilon = 1e-6);
        assert!(flat.view.pivot.coords.norm() > 0.0);
    }

    #[test]
    fn test_pan_with_degenerate_view_keeps_pivot() {
        let mut camera = OrbitCamera {
            view: ArcBall {
                pivot: Point3::new(1.0, 2.0, 3.0),
                distance: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        camera.pan(10.0, 0.0, 1.0);
        assert_eq!(camera.view.pivot, Point3::new(1.0, 2.0, 3.0));

        camera.view.distance = 30.0;
        camera.pan(10.0, 5.0, f32::INFINITY);
        assert_eq!(camera.view.pivot, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_projection_depth_range() {
        let proj = Perspective::default().matrix(800.0, 600.0);
        let near = proj * Vector4::new(0.0, 0.0, -0.01, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -2000.0, 1.0);

        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }
}
