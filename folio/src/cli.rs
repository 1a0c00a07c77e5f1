use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use folio::io::ImageFormat;
use folio::pipeline::Stages;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ImageType {
    Png,
    Pgm,
}

impl From<ImageType> for ImageFormat {
    fn from(value: ImageType) -> Self {
        match value {
            ImageType::Png => ImageFormat::Png,
            ImageType::Pgm => ImageFormat::Pnm,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Segment manuscript pages into text regions and classify chronicle layouts",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Directory holding the PDF files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for page rasters and regions
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Directory of the JSON parameter files
    #[arg(long = "config-dir", value_name = "DIR", default_value = "conf")]
    pub config_dir: PathBuf,

    /// Write the default parameter files and exit
    #[arg(long = "dump-conf")]
    pub dump_conf: bool,

    /// Image type of page rasters and regions
    #[arg(long = "image-type", value_enum, default_value_t = ImageType::Png)]
    pub image_type: ImageType,

    /// Rasterization resolution
    #[arg(long = "dpi", default_value_t = 300)]
    pub dpi: u32,

    /// Working language for OCR and tagging (overrides the OCR config)
    #[arg(long = "lang")]
    pub lang: Option<String>,

    /// Rasterize the PDF files
    #[arg(long = "pdf")]
    pub pdf: bool,

    /// Segment page rasters into regions
    #[arg(long = "image")]
    pub image: bool,

    /// Classify chronicle regions
    #[arg(long = "chronicle")]
    pub chronicle: bool,

    /// Run OCR on the regions
    #[arg(long = "ocr")]
    pub ocr: bool,

    /// Tag the OCR text
    #[arg(long = "nlp")]
    pub nlp: bool,

    /// Number of worker threads
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,
}

impl CliArgs {
    pub fn stages(&self) -> Stages {
        Stages {
            rasterize: self.pdf,
            segment: self.image,
            classify: self.chronicle,
            ocr: self.ocr,
            tag: self.nlp,
        }
    }
}
