//! PDF rasterization with Ghostscript
//!
//! Each `<name>.pdf` of the input directory becomes `out/<name>/`, holding
//! one grayscale raster per page named by page number (`1.png`, ...).

use crate::batch::{BatchReport, BatchRunner, TaskOutcome};
use crate::fsutil::{clear_files, list_files};
use crate::process::run_command;
use crate::{PipelineError, PipelineResult};
use folio_io::ImageFormat;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Ghostscript program name
pub const GHOSTSCRIPT: &str = "gs";

/// Ghostscript output device for grayscale rasters of `format`
pub fn gs_device(format: ImageFormat) -> PipelineResult<&'static str> {
    match format {
        ImageFormat::Png => Ok("pnggray"),
        ImageFormat::Pnm => Ok("pgmraw"),
        ImageFormat::Unknown => Err(PipelineError::UnsupportedImageType(
            format.extension().to_string(),
        )),
    }
}

/// Output directory of a document: `out_root/<pdf stem>`
pub fn document_dir(pdf: &Path, out_root: &Path) -> PipelineResult<PathBuf> {
    let stem = pdf
        .file_stem()
        .ok_or_else(|| PipelineError::InvalidPath(pdf.to_path_buf()))?;
    Ok(out_root.join(stem))
}

/// Build the Ghostscript invocation rendering `pdf` into `doc_dir`
pub fn ghostscript_command(
    pdf: &Path,
    doc_dir: &Path,
    dpi: u32,
    format: ImageFormat,
) -> PipelineResult<Command> {
    let device = gs_device(format)?;
    let pattern = doc_dir.join(format!("%d.{}", format.extension()));

    let mut cmd = Command::new(GHOSTSCRIPT);
    cmd.arg("-q")
        .arg("-dSAFER")
        .arg(format!("-sDEVICE={}", device))
        .arg(format!("-r{}", dpi))
        .arg("-dBATCH")
        .arg("-dNOPAUSE")
        .arg(format!("-sOutputFile={}", pattern.display()))
        .arg(pdf);
    Ok(cmd)
}

/// Render every page of `pdf` into its document directory
///
/// Stale page rasters from an earlier run are removed first. Returns the
/// document directory.
pub fn rasterize_pdf(
    pdf: &Path,
    out_root: &Path,
    dpi: u32,
    format: ImageFormat,
) -> PipelineResult<PathBuf> {
    let doc_dir = document_dir(pdf, out_root)?;
    fs::create_dir_all(&doc_dir)?;

    let stale = clear_files(&doc_dir, format.extension())?;
    if stale > 0 {
        warn!("{}: removed {} stale page(s)", doc_dir.display(), stale);
    }

    let mut cmd = ghostscript_command(pdf, &doc_dir, dpi, format)?;
    run_command(&mut cmd)?;
    info!("rasterized {} into {}", pdf.display(), doc_dir.display());
    Ok(doc_dir)
}

/// Rasterize every PDF directly inside `input`
pub fn rasterize_stage(
    runner: &BatchRunner,
    input: &Path,
    out_root: &Path,
    dpi: u32,
    format: ImageFormat,
) -> PipelineResult<BatchReport> {
    let pdfs = list_files(input, "pdf")?;
    if pdfs.is_empty() {
        warn!("no PDF files in {}", input.display());
    }
    fs::create_dir_all(out_root)?;
    Ok(runner.run("rasterize", &pdfs, |pdf| {
        rasterize_pdf(pdf, out_root, dpi, format).map(|_| TaskOutcome::Done)
    }))
}
