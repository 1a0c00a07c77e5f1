//! Raster - Normalized grayscale image
//!
//! `Raster` is a 2D array of `f32` intensity samples in `[0, 1]`, where
//! `0.0` is full ink (black) and `1.0` is blank paper (white). It is the
//! input to text-region detection and the pixel payload of every region
//! cut from a page.
//!
//! # Examples
//!
//! ```
//! use folio_core::Raster;
//!
//! // A blank 100x80 page
//! let mut raster = Raster::new_with_value(100, 80, 1.0).unwrap();
//!
//! raster.set_pixel(10, 20, 0.0).unwrap();
//! assert_eq!(raster.get_pixel(10, 20).unwrap(), 0.0);
//! assert_eq!(raster.dimensions(), (100, 80));
//! ```

mod clip;
mod convert;

use crate::error::{Error, Result};

/// Normalized grayscale raster
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f32>,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
}

impl Raster {
    /// Create a new raster with all samples set to zero (ink)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new raster with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_core::Raster;
    ///
    /// let page = Raster::new_with_value(100, 100, 1.0).unwrap();
    /// assert_eq!(page.get_pixel(50, 50).unwrap(), 1.0);
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Raster {
            width,
            height,
            data: vec![value; size],
            xres: 0,
            yres: 0,
        })
    }

    /// Create a raster from raw row-major samples
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Raster {
            width,
            height,
            data,
            xres: 0,
            yres: 0,
        })
    }

    /// Get the raster width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raster dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get both resolutions as (xres, yres)
    #[inline]
    pub fn resolution(&self) -> (i32, i32) {
        (self.xres, self.yres)
    }

    /// Set both resolutions
    #[inline]
    pub fn set_resolution(&mut self, xres: i32, yres: i32) {
        self.xres = xres;
        self.yres = yres;
    }

    /// Get the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a row of samples
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + (self.width as usize)]
    }

    /// Fill a rectangle with `value`, clipped to the raster bounds
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, value: f32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y.min(y_end)..y_end {
            for xx in x.min(x_end)..x_end {
                self.set_pixel_unchecked(xx, yy, value);
            }
        }
    }

    /// Count samples at or below `threshold`
    pub fn count_at_most(&self, threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v <= threshold).count()
    }
}
