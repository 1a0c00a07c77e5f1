//! folio - Manuscript page layout segmentation
//!
//! Cuts scanned manuscript pages into text regions and labels the regions
//! of chronicle pages by their role on the page.
//!
//! # Example
//!
//! ```
//! use folio::chronicle::{Role, classify};
//! use folio::layout::{SegmentParams, segment};
//! use folio::Raster;
//!
//! // a blank page is kept in one piece, which no layout rule accepts
//! let page = Raster::new_with_value(600, 800, 1.0).unwrap();
//! let regions = segment(&page, &SegmentParams::default()).unwrap();
//! assert_eq!(regions.len(), 1);
//!
//! let classification = classify(&regions, page.width());
//! assert!(classification.needs_review());
//! assert_eq!(classification.role(0), Some(Role::Unchecked));
//! ```

// Re-export core types (used everywhere)
pub use folio_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use folio_chronicle as chronicle;
pub use folio_io as io;
pub use folio_layout as layout;
pub use folio_pipeline as pipeline;
pub use folio_transform as transform;
