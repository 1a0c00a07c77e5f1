//! Segmentation stage
//!
//! Cuts every page raster into regions and hands each region to a
//! [`RegionSink`] as `<page>/<index>.<ext>`.

use crate::batch::{BatchReport, BatchRunner, TaskOutcome};
use crate::fsutil::{is_marked, list_pages, region_dir, reset_dir};
use crate::PipelineResult;
use folio_io::ImageFormat;
use folio_layout::{Region, SegmentParams, segment};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Destination for the regions of a page
pub trait RegionSink: Sync {
    /// Persist `region` as `file_name` inside `dir`, returning its path
    fn persist(&self, region: &Region, dir: &Path, file_name: &str) -> PipelineResult<PathBuf>;
}

/// Writes regions as 8-bit grayscale image files
#[derive(Debug, Clone, Copy)]
pub struct RasterFileSink {
    format: ImageFormat,
}

impl RasterFileSink {
    /// Write regions in `format`
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }
}

impl Default for RasterFileSink {
    fn default() -> Self {
        Self::new(ImageFormat::Png)
    }
}

impl RegionSink for RasterFileSink {
    fn persist(&self, region: &Region, dir: &Path, file_name: &str) -> PipelineResult<PathBuf> {
        let path = dir.join(file_name);
        folio_io::write_raster(&region.raster, &path, self.format)?;
        Ok(path)
    }
}

/// Regions persisted for one page
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageRegions {
    /// Paths of the regions written, in region order
    pub written: Vec<PathBuf>,
    /// Regions whose persistence failed
    pub failed: usize,
}

/// Segment one page raster into its region directory
///
/// The region directory is emptied first. A region that cannot be
/// persisted is logged and counted; the remaining regions are still
/// written. Pages already left for review are not touched and yield
/// `None`.
pub fn segment_page(
    page: &Path,
    params: &SegmentParams,
    sink: &dyn RegionSink,
    ext: &str,
) -> PipelineResult<Option<PageRegions>> {
    if is_marked(page) {
        debug!("{} already left for review", page.display());
        return Ok(None);
    }

    let raster = folio_io::read_raster(page)?;
    let regions = segment(&raster, params)?;
    debug!("{}: {} region(s)", page.display(), regions.len());

    let dir = region_dir(page);
    reset_dir(&dir)?;

    let mut outcome = PageRegions::default();
    for region in &regions {
        let file_name = format!("{}.{}", region.index, ext);
        match sink.persist(region, &dir, &file_name) {
            Ok(path) => outcome.written.push(path),
            Err(e) => {
                warn!("{}: region {} not written: {}", dir.display(), region.index, e);
                outcome.failed += 1;
            }
        }
    }
    Ok(Some(outcome))
}

/// Segment every page under `out_root`
pub fn segment_stage(
    runner: &BatchRunner,
    out_root: &Path,
    format: ImageFormat,
    params: &SegmentParams,
    sink: &dyn RegionSink,
) -> PipelineResult<BatchReport> {
    let ext = format.extension();
    let pages = list_pages(out_root, ext)?;
    Ok(runner.run("segment", &pages, |page| {
        Ok(match segment_page(page, params, sink, ext)? {
            Some(_) => TaskOutcome::Done,
            None => TaskOutcome::Skipped,
        })
    }))
}
