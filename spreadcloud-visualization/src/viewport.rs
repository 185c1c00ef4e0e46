//! Viewer state driving the per-frame transform parameters
//!
//! The spread slider is squared before it reaches the transform, and the
//! pivot follows the camera's orbit point along the depth axis. Keeping the
//! orbit point fixed under the spread is what makes flattening feel like it
//! happens "around" whatever the user is looking at.

use serde::{Deserialize, Serialize};
use spreadcloud_core::{FrameParams, PointSize, SpreadConfig, DEPTH_AXIS};

use crate::camera::OrbitCamera;

/// Interactive state of one 3D viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub camera: OrbitCamera,
    /// Slider value; `1.0` is the unmodified layout, `0.0` fully flat
    pub spread: f32,
    /// Point size in pixels
    pub point_size: f32,
}

impl ViewportState {
    /// Spread parameters for the transform.
    ///
    /// `factor = spread²`, `pivot` = depth coordinate of the orbit point.
    pub fn spread_config(&self) -> SpreadConfig {
        SpreadConfig::new(self.camera.view.pivot[DEPTH_AXIS], self.spread.powi(2))
    }

    /// Multiplier applied to the depth component of a pan.
    ///
    /// Inverse of the spread factor, so a drag moves the same distance
    /// across the squashed cloud as across the full one. Infinite at a
    /// spread of zero.
    pub fn pan_depth_rate(&self) -> f32 {
        self.spread.powi(-2)
    }

    /// Snapshot of everything the transform needs for one frame
    pub fn frame_params(&self, width: f32, height: f32) -> FrameParams {
        FrameParams::new(
            self.camera.frame_camera(width, height),
            self.spread_config(),
            PointSize(self.point_size),
        )
    }

    /// Swivel the camera around its pivot
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.pivot(delta_x, delta_y);
    }

    /// Pan, compensating the depth component for the current spread.
    ///
    /// Fully flattened, depth is left alone.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let rate_z = self.pan_depth_rate();
        let rate_z = if rate_z.is_finite() { rate_z } else { 0.0 };
        self.camera.pan(delta_x, delta_y, rate_z);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            camera: Default::default(),
            spread: 1.0,
            point_size: 2.0,
        }
    }
}
