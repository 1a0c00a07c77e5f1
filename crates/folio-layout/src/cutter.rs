//! Region cutter
//!
//! Cuts a page into row bands with a row scan, then cuts every band into
//! columns with a column scan. Scans that find nothing, or more cuts than
//! [`CutParams`] allows, leave the raster being cut in one piece.

use crate::scanner::{Axis, detect_boxes};
use crate::{CutParams, LayoutResult, ThresholdParams};
use folio_core::{Box, Raster};
use log::{debug, warn};

/// A text region cut from a page
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Position in the page's region sequence, starting at 1
    pub index: usize,
    /// Bounding box in page coordinates
    pub bbox: Box,
    /// Samples of the region
    pub raster: Raster,
}

impl Region {
    /// Region width in pixels
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Region height in pixels
    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Parameters for [`segment`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentParams {
    /// Explicit scanner thresholds; resolved per raster when absent
    pub text_box: Option<ThresholdParams>,
    /// Cutting filters
    pub text_cut: CutParams,
}

impl SegmentParams {
    /// Use `params` for every scan instead of resolving per raster
    pub fn with_text_box(mut self, params: ThresholdParams) -> Self {
        self.text_box = Some(params);
        self
    }

    /// Set the cutting filters
    pub fn with_text_cut(mut self, params: CutParams) -> Self {
        self.text_cut = params;
        self
    }
}

/// Cut a page raster into text regions
///
/// 1. Scan rows. No intervals, or more than `max_no_of_hor_cuts`, returns
///    the page as a single region.
/// 2. Drop row intervals shorter than `filter_small_hor` of the page
///    height and slice the rest into bands.
/// 3. Scan the columns of each band. No intervals, or more than
///    `max_no_of_ver_cuts`, keeps the band as one region.
/// 4. Drop column intervals narrower than `filter_small_ver` of the band
///    width and slice the rest out of the band.
///
/// Regions are numbered from 1 in scan order. If every row interval is
/// filtered out the result is empty.
///
/// # Errors
///
/// Returns an error if the explicit thresholds in `params` are invalid.
pub fn segment(page: &Raster, params: &SegmentParams) -> LayoutResult<Vec<Region>> {
    let cut = &params.text_cut;
    let text_box = params.text_box.as_ref();
    let (page_w, page_h) = page.dimensions();

    let rows = detect_boxes(page, Axis::Rows, text_box)?;
    debug!("row scan: {} interval(s) on {}x{}", rows.len(), page_w, page_h);

    if rows.is_empty() || rows.len() > cut.max_no_of_hor_cuts {
        debug!("page left uncut ({} row intervals)", rows.len());
        return Ok(vec![Region {
            index: 1,
            bbox: Box::new_unchecked(0, 0, page_w as i32, page_h as i32),
            raster: page.clone(),
        }]);
    }

    let min_band = cut.filter_small_hor * page_h as f64;
    let mut regions = Vec::new();

    for row in rows {
        if (row.len() as f64) < min_band {
            debug!("band {}..{} below {:.1} rows, dropped", row.entry, row.exit, min_band);
            continue;
        }

        let band = page.clip_rows(row.entry, row.exit)?;
        let band_bbox =
            Box::new_unchecked(0, row.entry as i32, page_w as i32, band.height() as i32);

        let columns = detect_boxes(&band, Axis::Columns, text_box)?;
        debug!("band {}..{}: {} column interval(s)", row.entry, row.exit, columns.len());

        if columns.is_empty() || columns.len() > cut.max_no_of_ver_cuts {
            regions.push((band_bbox, band));
            continue;
        }

        let min_column = cut.filter_small_ver * band.width() as f64;
        for column in columns {
            if (column.len() as f64) < min_column {
                debug!(
                    "column {}..{} below {:.1} px, dropped",
                    column.entry, column.exit, min_column
                );
                continue;
            }
            let piece = band.clip_columns(column.entry, column.exit)?;
            let bbox = Box::new_unchecked(
                column.entry as i32,
                row.entry as i32,
                piece.width() as i32,
                piece.height() as i32,
            );
            regions.push((bbox, piece));
        }
    }

    if regions.is_empty() {
        warn!("all bands of {}x{} page were filtered out", page_w, page_h);
    }

    Ok(regions
        .into_iter()
        .enumerate()
        .map(|(i, (bbox, raster))| Region {
            index: i + 1,
            bbox,
            raster,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> SegmentParams {
        let text_box = ThresholdParams {
            min_white_lines: 3.0,
            correction_upper: 0.0,
            correction_lower: 0.0,
            correction_left: 0.0,
            correction_right: 0.0,
            vertical_margin: 0,
            horizontal_margin: 0,
            density_filter: 2,
            ..ThresholdParams::resolve(100, 100)
        };
        SegmentParams::default()
            .with_text_box(text_box)
            .with_text_cut(CutParams::default().with_filters(0.05, 0.15))
    }

    #[test]
    fn test_blank_page_is_single_region() {
        let page = Raster::new_with_value(100, 100, 1.0).unwrap();
        let regions = segment(&page, &small_params()).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].index, 1);
        assert_eq!(regions[0].bbox, Box::new_unchecked(0, 0, 100, 100));
        assert_eq!(regions[0].raster, page);
    }

    #[test]
    fn test_band_split_into_columns() {
        let mut page = Raster::new_with_value(100, 100, 1.0).unwrap();
        page.fill_rect(10, 10, 80, 20, 0.0);
        page.fill_rect(10, 50, 30, 30, 0.0);
        page.fill_rect(60, 50, 30, 30, 0.0);

        let regions = segment(&page, &small_params()).unwrap();
        let boxes: Vec<Box> = regions.iter().map(|r| r.bbox).collect();
        assert_eq!(
            boxes,
            vec![
                Box::new_unchecked(10, 10, 82, 22),
                Box::new_unchecked(10, 50, 32, 32),
                Box::new_unchecked(60, 50, 32, 32),
            ]
        );
        let indices: Vec<usize> = regions.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        // region samples come from the page at their box
        let third = &regions[2];
        assert_eq!(third.raster, page.clip_box(&third.bbox).unwrap());
    }

    #[test]
    fn test_too_many_column_cuts_keeps_band() {
        let mut page = Raster::new_with_value(100, 100, 1.0).unwrap();
        for x in [5, 30, 55, 80] {
            page.fill_rect(x, 20, 15, 40, 0.0);
        }
        let regions = segment(&page, &small_params()).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bbox, Box::new_unchecked(0, 20, 100, 42));
    }

    #[test]
    fn test_narrow_columns_dropped() {
        let mut page = Raster::new_with_value(100, 100, 1.0).unwrap();
        page.fill_rect(10, 20, 50, 40, 0.0);
        page.fill_rect(80, 20, 4, 40, 0.0);
        let regions = segment(&page, &small_params()).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bbox, Box::new_unchecked(10, 20, 52, 42));
    }

    #[test]
    fn test_short_bands_filtered_out() {
        let mut page = Raster::new_with_value(100, 100, 1.0).unwrap();
        page.fill_rect(10, 20, 80, 1, 0.0);
        let params = small_params().with_text_cut(CutParams::default().with_filters(0.5, 0.15));
        assert!(segment(&page, &params).unwrap().is_empty());
    }
}
