//! Error types for spreadcloud

use thiserror::Error;

/// Main error type for spreadcloud operations
///
/// The spread-projection transform itself is total and never produces one of
/// these; they come from the code around it (thread pools, GPU setup,
/// configuration, reference geometry).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Algorithm error: {0}")]
    Algorithm(String),
    
    #[error("GPU error: {0}")]
    Gpu(String),
    
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for spreadcloud operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "gpu")]
impl From<wgpu::BufferAsyncError> for Error {
    fn from(e: wgpu::BufferAsyncError) -> Self {
        Error::Gpu(e.to_string())
    }
}
