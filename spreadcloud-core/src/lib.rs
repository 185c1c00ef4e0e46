//! Core data structures for spreadcloud
//! 
//! This crate provides the embedding point types, the per-frame camera and
//! spread parameters, and the spread-projection transform that maps each
//! point into clip space while squashing or stretching its depth axis
//! around a pivot.

pub mod point;
pub mod point_cloud;
pub mod camera;
pub mod spread;
pub mod projection;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use camera::*;
pub use spread::*;
pub use projection::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Vector4, Matrix4};
