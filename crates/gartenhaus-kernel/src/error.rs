//! Error types for the geometry kernel.

use thiserror::Error;

/// Errors returned by kernel export operations.
#[derive(Error, Debug)]
pub enum KernelError {
    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The geometry is empty (no cells or triangles).
    #[error("empty geometry")]
    EmptyGeometry,
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
