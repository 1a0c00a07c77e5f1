//! Detection and cutting parameters
//!
//! [`ThresholdParams`] is resolved from the dimensions of the raster being
//! scanned. A configuration store may supply a complete replacement, which
//! is used verbatim after [`ThresholdParams::validate`].

use crate::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

/// Height of the reference page the default thresholds are tuned for
pub const REFERENCE_HEIGHT: u32 = 1200;
/// Width of the reference page the default thresholds are tuned for
pub const REFERENCE_WIDTH: u32 = 1600;

/// Thresholds for the boundary scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Samples at or below this intensity are ink
    pub black_value: f64,
    /// Samples at or above this intensity are paper
    pub white_value: f64,
    /// Minimum ink count for a line to carry text
    pub min_black_pixels: f64,
    /// Minimum paper count for a line to be blank
    pub min_white_pixels: f64,
    /// Consecutive gap lines that close an interval (rounded up)
    pub min_white_lines: f64,
    /// Minimum ink lines in an interval
    pub min_black_lines: f64,
    /// Longest-to-shortest side ratio above which no column pass is made
    pub min_crop_ratio: f64,
    /// Offset added to the entry of a row interval
    pub correction_upper: f64,
    /// Offset added to the exit of a row interval
    pub correction_lower: f64,
    /// Offset added to the entry of a column interval
    pub correction_left: f64,
    /// Offset added to the exit of a column interval
    pub correction_right: f64,
    /// Scan lines skipped at both ends of the scanned axis
    pub vertical_margin: u32,
    /// Samples skipped at both ends of every scan line
    pub horizontal_margin: u32,
    /// Largest tolerated mean log-gap between ink pixels of one line
    pub max_distance: f64,
    /// Lines with fewer ink pixels than this are never ink lines
    pub density_filter: u32,
}

impl ThresholdParams {
    /// Derive thresholds for a raster of `height` x `width` samples
    ///
    /// Corrections grow in proportion once `height + width` exceeds the
    /// reference page.
    pub fn resolve(height: u32, width: u32) -> Self {
        let (h, w) = (height as f64, width as f64);
        let short = h.min(w);
        let long = h.max(w);

        let vertical_margin = (0.01 * h).floor() as u32;
        let horizontal_margin = (0.01 * w).floor() as u32;

        let min_black_pixels = 0.00625 * short + 5.0;
        let mut min_white_pixels = short;
        if horizontal_margin > 0 {
            min_white_pixels = (min_white_pixels - 2.0 * horizontal_margin as f64).max(0.0);
        }

        let reference = (REFERENCE_HEIGHT + REFERENCE_WIDTH) as f64;
        let scale = if h + w > reference {
            (h + w) / reference
        } else {
            1.0
        };

        Self {
            black_value: 0.1,
            white_value: 0.9,
            min_black_pixels,
            min_white_pixels,
            min_white_lines: 0.006 * long,
            min_black_lines: 0.001875 * long,
            min_crop_ratio: 11.0,
            correction_upper: -20.0 * scale,
            correction_lower: -20.0 * scale,
            correction_left: -20.0 * scale,
            correction_right: 20.0 * scale,
            vertical_margin,
            horizontal_margin,
            max_distance: 2.0,
            density_filter: min_black_pixels.floor() as u32,
        }
    }

    /// Number of consecutive gap lines that close an open interval
    pub fn gap_run(&self) -> u32 {
        (self.min_white_lines.ceil() as u32).max(1)
    }

    /// Check the invariants an externally supplied set must satisfy
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.black_value < self.white_value) {
            return Err(LayoutError::InvalidParameters(format!(
                "black_value {} must be below white_value {}",
                self.black_value, self.white_value
            )));
        }
        if !(0.0..=1.0).contains(&self.black_value) || !(0.0..=1.0).contains(&self.white_value) {
            return Err(LayoutError::InvalidParameters(
                "black_value and white_value must lie in [0, 1]".to_string(),
            ));
        }

        let counts = [
            ("min_black_pixels", self.min_black_pixels),
            ("min_white_pixels", self.min_white_pixels),
            ("min_white_lines", self.min_white_lines),
            ("min_black_lines", self.min_black_lines),
            ("max_distance", self.max_distance),
        ];
        for (name, value) in counts {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidParameters(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let corrections = [
            self.correction_upper,
            self.correction_lower,
            self.correction_left,
            self.correction_right,
        ];
        if corrections.iter().any(|c| !c.is_finite()) {
            return Err(LayoutError::InvalidParameters(
                "corrections must be finite".to_string(),
            ));
        }

        if !(self.min_crop_ratio >= 1.0) {
            return Err(LayoutError::InvalidParameters(format!(
                "min_crop_ratio must be at least 1, got {}",
                self.min_crop_ratio
            )));
        }

        Ok(())
    }
}

impl Default for ThresholdParams {
    /// Thresholds of the reference page
    fn default() -> Self {
        Self::resolve(REFERENCE_HEIGHT, REFERENCE_WIDTH)
    }
}

/// Sanity filters applied by the region cutter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutParams {
    /// Row intervals shorter than this fraction of the page height are dropped
    pub filter_small_hor: f64,
    /// Column intervals narrower than this fraction of the band width are dropped
    pub filter_small_ver: f64,
    /// More row intervals than this leaves the page uncut
    pub max_no_of_hor_cuts: usize,
    /// More column intervals than this leaves the band uncut
    pub max_no_of_ver_cuts: usize,
}

impl Default for CutParams {
    fn default() -> Self {
        Self {
            filter_small_hor: 0.035,
            filter_small_ver: 0.15,
            max_no_of_hor_cuts: 10,
            max_no_of_ver_cuts: 2,
        }
    }
}

impl CutParams {
    /// Set the row and column size filters
    pub fn with_filters(mut self, hor: f64, ver: f64) -> Self {
        self.filter_small_hor = hor;
        self.filter_small_ver = ver;
        self
    }

    /// Set the maximum number of row and column cuts
    pub fn with_max_cuts(mut self, hor: usize, ver: usize) -> Self {
        self.max_no_of_hor_cuts = hor;
        self.max_no_of_ver_cuts = ver;
        self
    }
}
