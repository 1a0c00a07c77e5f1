//! Stage orchestration
//!
//! Stages always run in [`Stage::ORDER`]; a stage that is not enabled is
//! left out without affecting the others.

use crate::batch::{BatchReport, BatchRunner};
use crate::config::PipelineConfig;
use crate::segment::{RasterFileSink, RegionSink};
use crate::{PipelineError, PipelineResult};
use crate::{chronicle, ocr, rasterize, segment, tagger};
use folio_io::ImageFormat;
use log::info;
use std::fmt;
use std::path::Path;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// PDF to page rasters
    Rasterize,
    /// Page rasters to region files
    Segment,
    /// Role assignment and renaming
    Classify,
    /// Region images to text
    Ocr,
    /// Text to part-of-speech tags
    Tag,
}

impl Stage {
    /// Execution order
    pub const ORDER: [Stage; 5] = [
        Stage::Rasterize,
        Stage::Segment,
        Stage::Classify,
        Stage::Ocr,
        Stage::Tag,
    ];

    /// Short stage name used in logs
    pub fn name(self) -> &'static str {
        match self {
            Stage::Rasterize => "rasterize",
            Stage::Segment => "segment",
            Stage::Classify => "classify",
            Stage::Ocr => "ocr",
            Stage::Tag => "tag",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which stages to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stages {
    pub rasterize: bool,
    pub segment: bool,
    pub classify: bool,
    pub ocr: bool,
    pub tag: bool,
}

impl Stages {
    /// Every stage enabled
    pub fn all() -> Self {
        Self {
            rasterize: true,
            segment: true,
            classify: true,
            ocr: true,
            tag: true,
        }
    }

    /// Whether `stage` is enabled
    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Rasterize => self.rasterize,
            Stage::Segment => self.segment,
            Stage::Classify => self.classify,
            Stage::Ocr => self.ocr,
            Stage::Tag => self.tag,
        }
    }

    /// Enabled stages in execution order
    pub fn enabled(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|s| self.contains(*s))
            .collect()
    }

    /// True if no stage is enabled
    pub fn is_empty(&self) -> bool {
        self.enabled().is_empty()
    }
}

/// Configured pipeline over one input and one output directory
pub struct Pipeline {
    config: PipelineConfig,
    runner: BatchRunner,
    sink: Box<dyn RegionSink>,
    format: ImageFormat,
    dpi: u32,
}

impl Pipeline {
    /// Default rasterization resolution
    pub const DEFAULT_DPI: u32 = 300;

    /// Create a pipeline writing PNG rasters at the default resolution
    pub fn new(config: PipelineConfig, runner: BatchRunner) -> Self {
        Self {
            config,
            runner,
            sink: Box::new(RasterFileSink::default()),
            format: ImageFormat::Png,
            dpi: Self::DEFAULT_DPI,
        }
    }

    /// Raster format for pages and regions
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnsupportedImageType`] for a format without
    /// a codec.
    pub fn with_format(mut self, format: ImageFormat) -> PipelineResult<Self> {
        if format == ImageFormat::Unknown {
            return Err(PipelineError::UnsupportedImageType(
                format.extension().to_string(),
            ));
        }
        self.format = format;
        self.sink = Box::new(RasterFileSink::new(format));
        Ok(self)
    }

    /// Rasterization resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Working language, used for OCR and tagging
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.config.ocr.lang = lang.to_string();
        self
    }

    /// Destination for segmented regions
    pub fn with_sink(mut self, sink: Box<dyn RegionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Loaded configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The batch runner, for cancellation
    pub fn runner(&self) -> &BatchRunner {
        &self.runner
    }

    /// Run the enabled stages in order
    ///
    /// `input` holds the PDF files; every later stage works on `output`.
    /// Returns one report per stage run. Page failures are inside the
    /// reports; an `Err` means a stage could not start at all.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        stages: &Stages,
    ) -> PipelineResult<Vec<(Stage, BatchReport)>> {
        if stages.tag {
            // reject an unsupported language before any work is done
            tagger::tagger_program(&self.config.tagger, &self.config.ocr.lang)?;
        }

        let mut reports = Vec::new();
        for stage in stages.enabled() {
            if self.runner.cancel_token().is_cancelled() {
                info!("cancelled before {}", stage);
                break;
            }
            info!("stage {}", stage);
            let report = self.run_stage(stage, input, output)?;
            reports.push((stage, report));
        }
        Ok(reports)
    }

    fn run_stage(&self, stage: Stage, input: &Path, output: &Path) -> PipelineResult<BatchReport> {
        let runner = &self.runner;
        match stage {
            Stage::Rasterize => {
                rasterize::rasterize_stage(runner, input, output, self.dpi, self.format)
            }
            Stage::Segment => segment::segment_stage(
                runner,
                output,
                self.format,
                &self.config.segment_params(),
                self.sink.as_ref(),
            ),
            Stage::Classify => chronicle::classify_stage(runner, output, self.format),
            Stage::Ocr => ocr::ocr_stage(runner, output, self.format, &self.config.ocr),
            Stage::Tag => {
                tagger::tag_stage(runner, output, &self.config.tagger, &self.config.ocr.lang)
            }
        }
    }
}
