//! Viewer configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml`
//! 2. `config/user.toml` (optional, user overrides)
//! 3. Environment variables (`SPREADCLOUD_SECTION__KEY`)

use figment::{Figment, providers::{Env, Format, Toml}};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::camera::{ArcBall, ArcBallController, OrbitCamera, Perspective};
use crate::viewport::ViewportState;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SPREADCLOUD_";

/// Main viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub spread: SpreadSettings,
}

impl ViewerConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        } else {
            log::debug!("No {} found, using built-in defaults", default_path.display());
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPREADCLOUD_SPREAD__INITIAL=0.5 -> spread.initial = 0.5
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Initial viewport state described by this configuration
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            camera: self.camera.orbit_camera(),
            spread: self.spread.initial,
            point_size: self.render.point_size,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Point size in pixels
    pub point_size: f32,
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
    /// Draw the reference floor grid
    pub show_grid: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            point_size: 2.0,
            background_color: [0.1, 0.1, 0.1, 1.0],
            enable_depth_test: true,
            show_grid: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
    /// Starting distance from the orbit point
    pub distance: f32,
    /// Starting yaw in radians
    pub yaw: f32,
    /// Starting pitch in radians
    pub pitch: f32,
    pub pan_sensitivity: f32,
    pub swivel_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub closest_zoom: f32,
}

impl CameraSettings {
    pub fn orbit_camera(&self) -> OrbitCamera {
        OrbitCamera {
            proj: Perspective {
                fov: self.fov.to_radians(),
                clip_near: self.clip_near,
                clip_far: self.clip_far,
            },
            view: ArcBall {
                distance: self.distance.max(self.closest_zoom),
                yaw: self.yaw,
                pitch: self.pitch,
                ..ArcBall::default()
            },
            control: ArcBallController {
                pan_sensitivity: self.pan_sensitivity,
                swivel_sensitivity: self.swivel_sensitivity,
                zoom_sensitivity: self.zoom_sensitivity,
                closest_zoom: self.closest_zoom,
            },
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        let view = ArcBall::default();
        let control = ArcBallController::default();
        Self {
            fov: 60.0,
            clip_near: 0.01,
            clip_far: 2_000.0,
            distance: view.distance,
            yaw: view.yaw,
            pitch: view.pitch,
            pan_sensitivity: control.pan_sensitivity,
            swivel_sensitivity: control.swivel_sensitivity,
            zoom_sensitivity: control.zoom_sensitivity,
            closest_zoom: control.closest_zoom,
        }
    }
}

/// Spread slider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadSettings {
    /// Slider value at startup; the transform factor is its square
    pub initial: f32,
}

impl Default for SpreadSettings {
    fn default() -> Self {
        Self { initial: 1.0 }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for spreadcloud_core::Error {
    fn from(e: ConfigError) -> Self {
        spreadcloud_core::Error::Config(e.message)
    }
}
