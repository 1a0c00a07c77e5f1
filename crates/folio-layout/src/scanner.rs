//! Boundary scanner
//!
//! A two-state machine walks the scan lines of a raster. It starts
//! `Outside` text; the first ink line opens an interval and moves it
//! `Inside`. While inside, ink lines reset a run of gap lines, and once
//! that run reaches [`ThresholdParams::gap_run`] the interval is closed on
//! the current line and the machine returns outside.
//!
//! Columns are scanned by rotating the raster one quadrant clockwise and
//! scanning its rows: rotated row `r` is source column `r`, so intervals
//! found on the rotated copy are column intervals of the source as-is.

use crate::density::is_ink_line;
use crate::{LayoutResult, ThresholdParams};
use folio_core::Raster;
use folio_transform::rotate_90;
use log::debug;

/// Axis along which a raster is scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scan lines are rows; intervals are row ranges
    Rows,
    /// Scan lines are columns; intervals are column ranges
    Columns,
}

/// A finalized `[entry, exit)` range along the scanned axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryInterval {
    /// First index of the range
    pub entry: u32,
    /// One past the last index of the range
    pub exit: u32,
}

impl BoundaryInterval {
    /// Length of the range
    pub fn len(&self) -> u32 {
        self.exit - self.entry
    }

    /// Always false for a finalized interval
    pub fn is_empty(&self) -> bool {
        self.entry >= self.exit
    }

    /// Apply the axis corrections to raw endpoints
    ///
    /// Returns `None` if the corrected range is empty once clipped to
    /// `[0, extent]`.
    fn corrected(entry: u32, exit: u32, lead: f64, trail: f64, extent: u32) -> Option<Self> {
        let clip = |v: f64| v.floor().clamp(0.0, extent as f64) as u32;
        let entry = clip(entry as f64 + lead);
        let exit = clip(exit as f64 + trail);
        (entry < exit).then_some(Self { entry, exit })
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    Inside { entry: u32, gap_lines: u32 },
}

/// Scan the rows of `raster`
///
/// Parameters are resolved from the raster size unless `params` is given.
pub fn scan_rows(
    raster: &Raster,
    params: Option<&ThresholdParams>,
) -> LayoutResult<Vec<BoundaryInterval>> {
    detect_boxes(raster, Axis::Rows, params)
}

/// Scan the columns of `raster`
///
/// Parameters are resolved from the size of the rotated copy unless
/// `params` is given.
pub fn scan_columns(
    raster: &Raster,
    params: Option<&ThresholdParams>,
) -> LayoutResult<Vec<BoundaryInterval>> {
    detect_boxes(raster, Axis::Columns, params)
}

/// Find the text intervals of `raster` along `axis`
///
/// Uniform rasters, rasters whose margins leave nothing to scan, and
/// intervals still open at the end of the scan all yield no intervals.
/// A column scan of a raster more elongated than `min_crop_ratio` yields
/// no intervals either.
///
/// # Errors
///
/// Returns [`crate::LayoutError::InvalidParameters`] if an explicit
/// parameter set fails validation.
pub fn detect_boxes(
    raster: &Raster,
    axis: Axis,
    params: Option<&ThresholdParams>,
) -> LayoutResult<Vec<BoundaryInterval>> {
    if let Some(p) = params {
        p.validate()?;
    }

    match axis {
        Axis::Rows => {
            let resolved;
            let p = match params {
                Some(p) => p,
                None => {
                    resolved = ThresholdParams::resolve(raster.height(), raster.width());
                    &resolved
                }
            };
            Ok(scan(raster, p, p.correction_upper, p.correction_lower))
        }
        Axis::Columns => {
            let (w, h) = raster.dimensions();
            let rotated_params;
            let p = match params {
                Some(p) => p,
                None => {
                    rotated_params = ThresholdParams::resolve(w, h);
                    &rotated_params
                }
            };

            let ratio = w.max(h) as f64 / w.min(h) as f64;
            if ratio > p.min_crop_ratio {
                debug!(
                    "column scan skipped: aspect ratio {:.2} exceeds {}",
                    ratio, p.min_crop_ratio
                );
                return Ok(Vec::new());
            }

            let rotated = rotate_90(raster, true)?;
            Ok(scan(&rotated, p, p.correction_left, p.correction_right))
        }
    }
}

/// Run the state machine over the rows of `raster`
fn scan(raster: &Raster, params: &ThresholdParams, lead: f64, trail: f64) -> Vec<BoundaryInterval> {
    let (w, h) = raster.dimensions();
    let vm = params.vertical_margin;
    let hm = params.horizontal_margin;
    if vm.saturating_mul(2) >= h || hm.saturating_mul(2) >= w {
        debug!("margins {}/{} leave nothing to scan in {}x{}", vm, hm, w, h);
        return Vec::new();
    }

    let black = params.black_value as f32;
    let gap_run = params.gap_run();
    let mut positions = Vec::with_capacity((w - 2 * hm) as usize);
    let mut intervals = Vec::new();
    let mut state = ScanState::Outside;

    for line in vm..h - vm {
        let row = raster.row(line);
        positions.clear();
        positions.extend((hm..w - hm).filter(|&x| row[x as usize] <= black));
        let ink = is_ink_line(&positions, params.max_distance, params.density_filter);

        state = match state {
            ScanState::Outside if ink => ScanState::Inside {
                entry: line,
                gap_lines: 0,
            },
            ScanState::Outside => ScanState::Outside,
            ScanState::Inside { entry, gap_lines } => {
                let gap_lines = if ink { 0 } else { gap_lines + 1 };
                if gap_lines >= gap_run {
                    match BoundaryInterval::corrected(entry, line, lead, trail, h) {
                        Some(interval) => intervals.push(interval),
                        None => debug!("interval {}..{} collapsed after correction", entry, line),
                    }
                    ScanState::Outside
                } else {
                    ScanState::Inside { entry, gap_lines }
                }
            }
        };
    }

    if let ScanState::Inside { entry, .. } = state {
        debug!("dropping interval opened at {} without exit", entry);
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> ThresholdParams {
        ThresholdParams {
            min_white_lines: 3.0,
            correction_upper: 0.0,
            correction_lower: 0.0,
            correction_left: 0.0,
            correction_right: 0.0,
            vertical_margin: 0,
            horizontal_margin: 0,
            density_filter: 2,
            ..ThresholdParams::resolve(40, 40)
        }
    }

    #[test]
    fn test_uniform_rasters_have_no_intervals() {
        for value in [0.0, 1.0] {
            let raster = Raster::new_with_value(60, 80, value).unwrap();
            for axis in [Axis::Rows, Axis::Columns] {
                assert!(detect_boxes(&raster, axis, None).unwrap().is_empty());
                assert!(detect_boxes(&raster, axis, Some(&small_params())).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_exit_is_line_completing_gap_run() {
        let mut raster = Raster::new_with_value(40, 40, 1.0).unwrap();
        raster.fill_rect(0, 10, 40, 5, 0.0);
        let intervals = scan_rows(&raster, Some(&small_params())).unwrap();
        // ink rows 10..15, gap rows 15, 16, 17 close on 17
        assert_eq!(intervals, vec![BoundaryInterval { entry: 10, exit: 17 }]);
    }

    #[test]
    fn test_corrections_applied_and_clipped() {
        let mut raster = Raster::new_with_value(40, 40, 1.0).unwrap();
        raster.fill_rect(0, 2, 40, 5, 0.0);
        let params = ThresholdParams {
            correction_upper: -5.5,
            correction_lower: 1.5,
            ..small_params()
        };
        let intervals = scan_rows(&raster, Some(&params)).unwrap();
        // entry 2 - 5.5 clips to 0, exit floor(9 + 1.5) = 10
        assert_eq!(intervals, vec![BoundaryInterval { entry: 0, exit: 10 }]);
    }

    #[test]
    fn test_collapsed_interval_dropped() {
        let mut raster = Raster::new_with_value(40, 40, 1.0).unwrap();
        raster.fill_rect(0, 10, 40, 2, 0.0);
        let params = ThresholdParams {
            correction_lower: -10.0,
            ..small_params()
        };
        assert!(scan_rows(&raster, Some(&params)).unwrap().is_empty());
    }

    #[test]
    fn test_open_interval_dropped() {
        let mut raster = Raster::new_with_value(40, 40, 1.0).unwrap();
        raster.fill_rect(0, 5, 40, 5, 0.0);
        raster.fill_rect(0, 30, 40, 10, 0.0);
        let intervals = scan_rows(&raster, Some(&small_params())).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].entry, 5);
    }

    #[test]
    fn test_columns_map_to_source_columns() {
        let mut raster = Raster::new_with_value(40, 30, 1.0).unwrap();
        raster.fill_rect(5, 0, 6, 30, 0.0);
        raster.fill_rect(25, 0, 8, 30, 0.0);
        let intervals = scan_columns(&raster, Some(&small_params())).unwrap();
        assert_eq!(
            intervals,
            vec![
                BoundaryInterval { entry: 5, exit: 13 },
                BoundaryInterval { entry: 25, exit: 35 },
            ]
        );
    }

    #[test]
    fn test_elongated_raster_skips_column_scan() {
        let mut raster = Raster::new_with_value(240, 20, 1.0).unwrap();
        raster.fill_rect(10, 0, 50, 20, 0.0);
        assert!(scan_columns(&raster, Some(&small_params())).unwrap().is_empty());
        // rows are still scanned
        let rows = scan_rows(&raster, Some(&small_params())).unwrap();
        assert!(rows.is_empty() || rows.iter().all(|i| i.entry < i.exit));
    }

    #[test]
    fn test_margins_consuming_raster() {
        let raster = Raster::new_with_value(10, 10, 0.0).unwrap();
        let params = ThresholdParams {
            vertical_margin: 5,
            ..small_params()
        };
        assert!(scan_rows(&raster, Some(&params)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let raster = Raster::new_with_value(10, 10, 1.0).unwrap();
        let params = ThresholdParams {
            black_value: 0.9,
            white_value: 0.1,
            ..small_params()
        };
        assert!(scan_rows(&raster, Some(&params)).is_err());
    }
}
