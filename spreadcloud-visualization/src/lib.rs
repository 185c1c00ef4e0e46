//! Interactive side of spreadcloud
//! 
//! Everything that turns user input and configuration into the per-frame
//! parameters consumed by the spread-projection transform:
//! - Orbit camera with pivot, pan and zoom controls
//! - Spread slider semantics (squared factor, pivot at the orbit point)
//! - Layered viewer configuration

pub mod camera;
pub mod viewport;
pub mod config;

pub use camera::*;
pub use viewport::*;
pub use config::{ViewerConfig, RenderSettings, CameraSettings, SpreadSettings, ConfigError};
