//! OCR stage
//!
//! Runs Tesseract on every region image, leaving `<stem>.txt` next to it.

use crate::batch::{BatchReport, BatchRunner, TaskOutcome};
use crate::config::OcrParams;
use crate::fsutil::{list_files, list_region_dirs};
use crate::process::run_command;
use crate::{PipelineError, PipelineResult};
use folio_io::ImageFormat;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tesseract program name
pub const TESSERACT: &str = "tesseract";

/// Build the Tesseract invocation for one region image
///
/// The command runs in the image's directory and writes `<stem>.txt`.
pub fn tesseract_command(image: &Path, params: &OcrParams) -> PipelineResult<Command> {
    let stem = image
        .file_stem()
        .ok_or_else(|| PipelineError::InvalidPath(image.to_path_buf()))?;
    let dir = image
        .parent()
        .ok_or_else(|| PipelineError::InvalidPath(image.to_path_buf()))?;

    let mut cmd = Command::new(TESSERACT);
    cmd.arg("--tessdata-dir")
        .arg(&params.tess_dir)
        .arg(image)
        .arg(stem)
        .arg("-l")
        .arg(&params.lang)
        .arg("--psm")
        .arg(params.page_mode.to_string())
        .current_dir(dir);
    Ok(cmd)
}

/// Recognize one region image, returning the text file written
pub fn ocr_region(image: &Path, params: &OcrParams) -> PipelineResult<PathBuf> {
    let mut cmd = tesseract_command(image, params)?;
    run_command(&mut cmd)?;
    let text = image.with_extension("txt");
    debug!("{} -> {}", image.display(), text.display());
    Ok(text)
}

/// Recognize every region of one page directory
pub fn ocr_region_dir(dir: &Path, ext: &str, params: &OcrParams) -> PipelineResult<usize> {
    let images = list_files(dir, ext)?;
    for image in &images {
        ocr_region(image, params)?;
    }
    Ok(images.len())
}

/// Recognize the regions of every page under `out_root`
pub fn ocr_stage(
    runner: &BatchRunner,
    out_root: &Path,
    format: ImageFormat,
    params: &OcrParams,
) -> PipelineResult<BatchReport> {
    let ext = format.extension();
    let dirs = list_region_dirs(out_root)?;
    Ok(runner.run("ocr", &dirs, |dir| {
        Ok(match ocr_region_dir(dir, ext, params)? {
            0 => TaskOutcome::Skipped,
            _ => TaskOutcome::Done,
        })
    }))
}
