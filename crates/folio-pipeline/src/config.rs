//! JSON configuration store
//!
//! A configuration directory holds one JSON file per parameter group. A
//! present file replaces the built-in defaults of its group as a whole;
//! an absent file means the defaults apply.

use crate::{PipelineError, PipelineResult};
use folio_layout::{CutParams, SegmentParams, ThresholdParams};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File holding [`ThresholdParams`]
pub const TEXT_BOX_FILE: &str = "params_text_box.json";
/// File holding [`CutParams`]
pub const TEXT_CUT_FILE: &str = "params_text_cut.json";
/// File holding [`OcrParams`]
pub const OCR_FILE: &str = "params_ocr.json";
/// File holding [`TaggerParams`]
pub const TAGGER_FILE: &str = "params_tagger.json";

/// Tesseract settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrParams {
    /// Directory containing `tessdata`
    pub tess_dir: PathBuf,
    /// Tesseract language code
    pub lang: String,
    /// Page segmentation mode passed as `--psm`
    pub page_mode: u32,
}

impl Default for OcrParams {
    fn default() -> Self {
        Self {
            tess_dir: PathBuf::from("/opt/local/share"),
            lang: "fra".to_string(),
            page_mode: 3,
        }
    }
}

/// TreeTagger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerParams {
    /// Prefix of the per-language tagger scripts (`tree-tagger-french`)
    pub command_prefix: String,
    /// Two-letter codes of the languages with an installed model
    pub languages: Vec<String>,
}

impl Default for TaggerParams {
    fn default() -> Self {
        Self {
            command_prefix: "tree-tagger-".to_string(),
            languages: ["en", "es", "de", "fr"].map(String::from).to_vec(),
        }
    }
}

/// Every parameter group, after loading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Scanner thresholds; resolved per raster when absent
    pub text_box: Option<ThresholdParams>,
    /// Region cutting filters
    pub text_cut: CutParams,
    /// OCR settings
    pub ocr: OcrParams,
    /// Tagger settings
    pub tagger: TaggerParams,
}

impl PipelineConfig {
    /// Parameters for the segmentation stage
    pub fn segment_params(&self) -> SegmentParams {
        SegmentParams {
            text_box: self.text_box.clone(),
            text_cut: self.text_cut.clone(),
        }
    }
}

/// Directory of JSON parameter files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Open the store rooted at `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory of the store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `file` inside the store
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read `file`, or `None` if it does not exist
    pub fn load<T: DeserializeOwned>(&self, file: &str) -> PipelineResult<Option<T>> {
        let path = self.path(file);
        if !path.is_file() {
            debug!("{} not found, using defaults", path.display());
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&text)
            .map_err(|source| PipelineError::Config { path: path.clone(), source })?;
        debug!("loaded {}", path.display());
        Ok(Some(value))
    }

    /// Write `value` to `file` as pretty-printed JSON
    ///
    /// An existing file is kept unless `overwrite` is set. Returns whether
    /// the file was written.
    pub fn save<T: Serialize>(
        &self,
        file: &str,
        value: &T,
        overwrite: bool,
    ) -> PipelineResult<bool> {
        let path = self.path(file);
        if path.exists() && !overwrite {
            debug!("{} exists, not overwritten", path.display());
            return Ok(false);
        }
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(value)
            .map_err(|source| PipelineError::Config { path: path.clone(), source })?;
        fs::write(&path, text + "\n")?;
        Ok(true)
    }

    /// Load every parameter group, falling back to defaults
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, malformed JSON, or scanner thresholds
    /// that violate their invariants.
    pub fn load_all(&self) -> PipelineResult<PipelineConfig> {
        let text_box: Option<ThresholdParams> = self.load(TEXT_BOX_FILE)?;
        if let Some(params) = &text_box {
            params.validate()?;
        }
        Ok(PipelineConfig {
            text_box,
            text_cut: self.load(TEXT_CUT_FILE)?.unwrap_or_default(),
            ocr: self.load(OCR_FILE)?.unwrap_or_default(),
            tagger: self.load(TAGGER_FILE)?.unwrap_or_default(),
        })
    }

    /// Write the defaults of every group that has no file yet
    ///
    /// Scanner thresholds are written for the reference page. Returns the
    /// files written.
    pub fn dump_defaults(&self) -> PipelineResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        if self.save(TEXT_BOX_FILE, &ThresholdParams::default(), false)? {
            written.push(self.path(TEXT_BOX_FILE));
        }
        if self.save(TEXT_CUT_FILE, &CutParams::default(), false)? {
            written.push(self.path(TEXT_CUT_FILE));
        }
        if self.save(OCR_FILE, &OcrParams::default(), false)? {
            written.push(self.path(OCR_FILE));
        }
        if self.save(TAGGER_FILE, &TaggerParams::default(), false)? {
            written.push(self.path(TAGGER_FILE));
        }
        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }
}
