//! Rectangle extraction from a raster
//!
//! Row-bands and text regions are cut out of the page by copying a
//! rectangle of samples into a new raster.

use super::Raster;
use crate::box_::Box;
use crate::error::{Error, Result};

impl Raster {
    /// Extract a rectangular sub-region.
    ///
    /// The rectangle is clipped to the raster bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The requested width or height is 0
    /// - The rectangle origin lies outside the raster
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_core::Raster;
    ///
    /// let raster = Raster::new(100, 80).unwrap();
    /// let clipped = raster.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Raster> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let (src_w, src_h) = self.dimensions();
        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside raster bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut data = Vec::with_capacity(clip_w as usize * clip_h as usize);
        for dy in 0..clip_h {
            let row = self.row(y + dy);
            data.extend_from_slice(&row[x as usize..(x + clip_w) as usize]);
        }

        let mut clipped = Raster::from_data(clip_w, clip_h, data)?;
        clipped.set_resolution(self.xres, self.yres);
        Ok(clipped)
    }

    /// Extract the region covered by `region`, clipped to the raster.
    ///
    /// # Errors
    ///
    /// Returns an error if the box does not intersect the raster.
    pub fn clip_box(&self, region: &Box) -> Result<Raster> {
        let clipped = region
            .clip(self.width as i32, self.height as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "box {:?} does not intersect {}x{} raster",
                    region, self.width, self.height
                ))
            })?;
        self.clip_rectangle(
            clipped.x as u32,
            clipped.y as u32,
            clipped.w as u32,
            clipped.h as u32,
        )
    }

    /// Extract the full-width band of rows `[top, bottom)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the band is empty or starts below the raster.
    pub fn clip_rows(&self, top: u32, bottom: u32) -> Result<Raster> {
        self.clip_rectangle(0, top, self.width, bottom.saturating_sub(top))
    }

    /// Extract the full-height band of columns `[left, right)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the band is empty or starts right of the raster.
    pub fn clip_columns(&self, left: u32, right: u32) -> Result<Raster> {
        self.clip_rectangle(left, 0, right.saturating_sub(left), self.height)
    }
}
