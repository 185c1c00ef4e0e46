//! # spreadcloud GPU
//!
//! wgpu implementation of the spread-projection transform.
//!
//! The transform lives in one WGSL file shared by two pipelines: a render
//! pipeline that draws points as fixed-size quads plus reference lines, and
//! a compute pipeline that evaluates the transform per point and reads the
//! clip positions back.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spreadcloud_gpu::{GpuContext, GpuProjector};
//! use spreadcloud_core::{EmbeddingPoint, FrameParams};
//!
//! async fn example() -> spreadcloud_core::Result<()> {
//!     let gpu = GpuContext::new().await?;
//!     let projector = GpuProjector::new(&gpu);
//!
//!     let points = vec![EmbeddingPoint::new([1.0, 2.0, 10.0], [1.0, 0.0, 0.0])];
//!     let projected = projector.project(&gpu, &points, &FrameParams::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod uniform;
pub mod shader;
pub mod projector;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use uniform::{FrameUniform, GpuProjectedPoint};
pub use projector::{GpuProjector, gpu_project_cloud};
pub use renderer::{SpreadRenderer, RenderConfig};
