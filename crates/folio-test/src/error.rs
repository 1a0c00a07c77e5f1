//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a raster
    #[error("failed to write raster '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// A synthetic page could not be built
    #[error("synthetic page error: {0}")]
    Synth(#[from] folio_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
