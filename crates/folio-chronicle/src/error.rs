//! Error types for folio-chronicle

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while applying a page classification
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// Filesystem error during a rename
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path without a usable file name
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The number of files does not match the classification
    #[error("classification covers {expected} region(s), got {actual} file(s)")]
    RegionCountMismatch { expected: usize, actual: usize },
}

/// Result type for chronicle operations
pub type ChronicleResult<T> = Result<T, ChronicleError>;
