//! folio-layout - Page layout segmentation
//!
//! Finds rectangular text regions in a grayscale page raster:
//!
//! - [`ThresholdParams::resolve`] derives detection thresholds from the
//!   raster size, scaled against a 1200x1600 reference page
//! - [`is_ink_line`] decides whether one scan line carries text, judging
//!   how tightly its ink pixels cluster rather than how many there are
//! - [`detect_boxes`] runs the two-state boundary scanner along rows, or
//!   along columns through a rotated copy of the raster
//! - [`segment`] cuts the page into row bands and each band into columns
//!
//! # Example
//!
//! ```ignore
//! use folio_layout::{SegmentParams, segment};
//!
//! let regions = segment(&page, &SegmentParams::default())?;
//! for region in &regions {
//!     println!("{}: {:?}", region.index, region.bbox);
//! }
//! ```

pub mod cutter;
pub mod density;
mod error;
pub mod params;
pub mod scanner;

pub use cutter::{Region, SegmentParams, segment};
pub use density::is_ink_line;
pub use error::{LayoutError, LayoutResult};
pub use params::{CutParams, REFERENCE_HEIGHT, REFERENCE_WIDTH, ThresholdParams};
pub use scanner::{Axis, BoundaryInterval, detect_boxes, scan_columns, scan_rows};
