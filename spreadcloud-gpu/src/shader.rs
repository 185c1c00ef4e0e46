//! WGSL sources
//!
//! `spread.wgsl` holds the transform itself; the render and compute shaders
//! are appended to it so both paths share one definition.

pub const SPREAD_WGSL: &str = include_str!("shaders/spread.wgsl");
pub const RENDER_WGSL: &str = include_str!("shaders/render.wgsl");
pub const PROJECT_WGSL: &str = include_str!("shaders/project.wgsl");

/// Full source of the render shader (`vs_point`, `vs_line`, `fs_main`)
pub fn render_shader_source() -> String {
    format!("{}\n{}", SPREAD_WGSL, RENDER_WGSL)
}

/// Full source of the compute projector (`main`)
pub fn project_shader_source() -> String {
    format!("{}\n{}", SPREAD_WGSL, PROJECT_WGSL)
}
