//! folio-io - Raster I/O for page segmentation
//!
//! Decodes page and region images into normalized [`Raster`]s and encodes
//! rasters back to 8-bit grayscale files.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature      |
//! |--------|------|-------|--------------|
//! | PNG    | Yes  | Yes   | `png-format` |
//! | PGM    | Yes  | Yes   | `pnm`        |
//!
//! [`read_image_header`] probes dimensions without decoding samples; the
//! layout classifier only needs region widths.

mod error;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};

use folio_core::Raster;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// PGM (portable graymap)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pgm",
        }
    }

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "pgm" | "pnm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Detected image format
    pub format: ImageFormat,
}

/// Detect the image format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() >= 8 && data[..8] == [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a] {
        return Ok(ImageFormat::Png);
    }
    if data.len() >= 2 && data[0] == b'P' && matches!(data[1], b'2' | b'5') {
        return Ok(ImageFormat::Pnm);
    }
    Err(IoError::UnsupportedFormat(
        "unrecognized image signature".to_string(),
    ))
}

fn detect_format<R: BufRead + Seek>(reader: &mut R) -> IoResult<ImageFormat> {
    let mut magic = [0u8; 8];
    let mut filled = 0;
    while filled < magic.len() {
        let n = reader.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(0))?;
    detect_format_from_bytes(&magic[..filled])
}

fn read_with_format<R: BufRead + Seek>(mut reader: R) -> IoResult<Raster> {
    match detect_format(&mut reader)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        format => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}

/// Read a raster from a file path, detecting the format from its contents
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    read_with_format(BufReader::new(file))
}

/// Read a raster from an in-memory encoded image
pub fn read_raster_mem(data: &[u8]) -> IoResult<Raster> {
    read_with_format(Cursor::new(data))
}

/// Read image dimensions from a file path without decoding pixel data
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    match detect_format(&mut reader)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_header_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_header_pnm(reader),
        format => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}

/// Encode a raster into `writer` using `format`
pub fn write_raster_to<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        format => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            format
        ))),
    }
}

/// Write a raster to a file path
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_raster_to(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a raster into a byte vector
pub fn write_raster_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_raster_to(raster, &mut buffer, format)?;
    Ok(buffer)
}
