//! Error types for folio-pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by pipeline stages
///
/// Every error is scoped to the page or file being processed; batch
/// stages record it and carry on with the next page.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster decode or encode error
    #[error("image error: {0}")]
    Image(#[from] folio_io::IoError),

    /// Segmentation error
    #[error("layout error: {0}")]
    Layout(#[from] folio_layout::LayoutError),

    /// Classification rename error
    #[error("chronicle error: {0}")]
    Chronicle(#[from] folio_chronicle::ChronicleError),

    /// A configuration file could not be read or written
    #[error("config file '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON result file could not be encoded
    #[error("cannot encode '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An external program could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program exited unsuccessfully
    #[error("'{program}' failed with {status}: {stderr}")]
    Subprocess {
        program: String,
        status: String,
        stderr: String,
    },

    /// The tagger has no model for the requested language
    #[error("language '{0}' is not supported by the tagger")]
    UnsupportedLanguage(String),

    /// The requested image type has no codec
    #[error("unsupported image type '{0}'")]
    UnsupportedImageType(String),

    /// A path without a usable file name
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A page task panicked
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The worker pool could not be built
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
