//! folio-pipeline - Stage orchestration for manuscript page segmentation
//!
//! Drives a batch of documents through the fixed stage order
//!
//! 1. [`rasterize`]: PDF files to page rasters (Ghostscript)
//! 2. [`segment`]: page rasters to region files
//! 3. [`chronicle`]: role assignment and renaming
//! 4. [`ocr`]: region images to text (Tesseract)
//! 5. [`tagger`]: text to part-of-speech tags (TreeTagger)
//!
//! Each stage is a batch over independent pages run by a [`BatchRunner`];
//! failures stay with the page that raised them.
//!
//! # Example
//!
//! ```no_run
//! use folio_pipeline::{BatchRunner, ConfigStore, Pipeline, Stages};
//! use std::path::Path;
//!
//! let config = ConfigStore::new("conf").load_all()?;
//! let pipeline = Pipeline::new(config, BatchRunner::new(None)?);
//! let stages = Stages { segment: true, classify: true, ..Stages::default() };
//! for (stage, report) in pipeline.run(Path::new("in"), Path::new("out"), &stages)? {
//!     println!("{}: {} processed", stage, report.processed);
//! }
//! # Ok::<(), folio_pipeline::PipelineError>(())
//! ```

pub mod batch;
pub mod chronicle;
pub mod config;
mod error;
pub mod fsutil;
pub mod ocr;
pub mod pipeline;
pub mod process;
pub mod rasterize;
pub mod segment;
pub mod tagger;

pub use batch::{BatchReport, BatchRunner, CancelToken, TaskOutcome};
pub use chronicle::{PageVerdict, classify_page, classify_stage};
pub use config::{ConfigStore, OcrParams, PipelineConfig, TaggerParams};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, Stage, Stages};
pub use segment::{PageRegions, RasterFileSink, RegionSink, segment_page, segment_stage};
pub use tagger::TaggedToken;
