//! # spreadcloud algorithms
//!
//! Whole-frame processing built on the per-point transform in
//! `spreadcloud-core`:
//! - data-parallel evaluation of every point of a frame
//! - thread pool configuration for that evaluation
//! - frame batches of points and line vertices handed to a renderer
//! - reference geometry (the floor grid drawn under the cloud)

pub mod parallel;
pub mod frame;
pub mod batch;
pub mod shapes;

// Re-export commonly used items
pub use parallel::{ParallelConfig, init_thread_pool, get_thread_pool};
pub use frame::*;
pub use batch::FrameBatch;
pub use shapes::{grid, default_grid};
