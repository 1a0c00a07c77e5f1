//! Conversion between 8-bit samples and normalized rasters

use super::Raster;
use crate::error::{Error, Result};

impl Raster {
    /// Create a raster from 8-bit grayscale samples (0 = black, 255 = white)
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_gray8(width: u32, height: u32, samples: &[u8]) -> Result<Self> {
        let data = samples.iter().map(|&s| s as f32 / 255.0).collect();
        Raster::from_data(width, height, data)
    }

    /// Create a raster from interleaved 8-bit RGB samples
    ///
    /// Each pixel is reduced to its luminance: 0.299*R + 0.587*G + 0.114*B.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_rgb8(width: u32, height: u32, samples: &[u8]) -> Result<Self> {
        if samples.len() % 3 != 0 {
            return Err(Error::InvalidParameter(format!(
                "RGB data length {} is not a multiple of 3",
                samples.len()
            )));
        }
        let data = samples
            .chunks_exact(3)
            .map(|p| luminance(p[0], p[1], p[2]) / 255.0)
            .collect();
        Raster::from_data(width, height, data)
    }

    /// Quantize the raster to 8-bit grayscale samples
    ///
    /// Values outside `[0, 1]` are clamped.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
            .collect()
    }
}

/// Luminance of an RGB triple on the 0..=255 scale
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}
