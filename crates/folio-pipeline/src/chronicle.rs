//! Classification stage
//!
//! Reads the widths of a page's regions from their image headers,
//! classifies them against the page width, and records the result in the
//! file tree. Pages whose region directory is already marked unchecked
//! are skipped.

use crate::batch::{BatchReport, BatchRunner, TaskOutcome};
use crate::fsutil::{is_marked, list_files, list_pages, region_dir};
use crate::PipelineResult;
use folio_chronicle::{PageClassification, classify_widths, mark_unchecked, rename_regions};
use folio_io::ImageFormat;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// What the stage did with one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageVerdict {
    /// Regions were renamed after their roles
    Classified(PageClassification),
    /// The page needs review; its region directory was marked
    Unchecked(PathBuf),
    /// Already marked, or never segmented
    Skipped,
}

/// Classify the regions of one page raster
pub fn classify_page(page: &Path, ext: &str) -> PipelineResult<PageVerdict> {
    if is_marked(page) {
        debug!("{} already left for review", page.display());
        return Ok(PageVerdict::Skipped);
    }
    let dir = region_dir(page);
    if !dir.is_dir() {
        debug!("{} has no region directory", page.display());
        return Ok(PageVerdict::Skipped);
    }

    let page_width = folio_io::read_image_header(page)?.width;
    let files = list_files(&dir, ext)?;
    let widths = files
        .iter()
        .map(|file| folio_io::read_image_header(file).map(|h| h.width))
        .collect::<Result<Vec<u32>, _>>()?;

    let classification = classify_widths(&widths, page_width);
    rename_regions(&files, &classification)?;

    if classification.needs_review() {
        let marked = mark_unchecked(&dir)?.unwrap_or(dir);
        return Ok(PageVerdict::Unchecked(marked));
    }

    info!("{}: {:?}", dir.display(), classification.roles());
    Ok(PageVerdict::Classified(classification))
}

/// Classify every segmented page under `out_root`
pub fn classify_stage(
    runner: &BatchRunner,
    out_root: &Path,
    format: ImageFormat,
) -> PipelineResult<BatchReport> {
    let ext = format.extension();
    let pages = list_pages(out_root, ext)?;
    Ok(runner.run("classify", &pages, |page| {
        Ok(match classify_page(page, ext)? {
            PageVerdict::Skipped => TaskOutcome::Skipped,
            _ => TaskOutcome::Done,
        })
    }))
}
