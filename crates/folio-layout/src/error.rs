//! Error types for folio-layout

use thiserror::Error;

/// Errors that can occur during layout segmentation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] folio_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] folio_transform::TransformError),

    /// Externally supplied parameters violate their invariants
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
