//! XLSX package errors

use thiserror::Error;

/// Result type for package operations
pub type PackageResult<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while writing the package
#[derive(Debug, Error)]
pub enum PackageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Structural invariant violated at write time
    #[error("Serialization error: {0}")]
    Serialization(String),
}
