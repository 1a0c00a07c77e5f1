//! folio-core - Basic data structures for page segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the folio workspace:
//!
//! - [`Raster`] - Normalized grayscale image (`0.0` ink .. `1.0` paper)
//! - [`Box`] - Rectangle regions in page coordinates

pub mod box_;
pub mod error;
pub mod raster;

pub use box_::Box;
pub use error::{Error, Result};
pub use raster::Raster;
