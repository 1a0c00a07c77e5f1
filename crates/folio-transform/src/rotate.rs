//! Orthogonal rotations and flips

use crate::TransformResult;
use folio_core::Raster;

/// Rotate a raster by 90-degree increments
///
/// # Arguments
/// * `raster` - Input raster
/// * `quads` - Number of 90-degree clockwise rotations (0-3)
///
/// # Returns
/// The rotated raster
pub fn rotate_orth(raster: &Raster, quads: u32) -> TransformResult<Raster> {
    match quads % 4 {
        0 => Ok(raster.clone()),
        1 => rotate_90(raster, true),
        2 => rotate_180(raster),
        3 => rotate_90(raster, false),
        _ => unreachable!(),
    }
}

/// Rotate a raster 90 degrees
///
/// Clockwise rotation maps source column `x` onto destination row `x`,
/// so row indices of the result are column indices of the source.
///
/// # Arguments
/// * `raster` - Input raster
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90(raster: &Raster, clockwise: bool) -> TransformResult<Raster> {
    let (w, h) = raster.dimensions();

    // Output dimensions are swapped
    let mut out = Raster::new(h, w)?;
    out.set_resolution(raster.resolution().1, raster.resolution().0);

    for y in 0..h {
        for x in 0..w {
            let val = raster.get_pixel_unchecked(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            out.set_pixel_unchecked(nx, ny, val);
        }
    }

    Ok(out)
}

/// Rotate a raster 180 degrees
pub fn rotate_180(raster: &Raster) -> TransformResult<Raster> {
    // 180 rotation = horizontal flip + vertical flip
    let flipped_h = flip_lr(raster)?;
    flip_tb(&flipped_h)
}

/// Flip a raster left-right (horizontal mirror)
pub fn flip_lr(raster: &Raster) -> TransformResult<Raster> {
    let (w, h) = raster.dimensions();
    let mut out = raster.clone();

    for y in 0..h {
        for x in 0..w {
            out.set_pixel_unchecked(w - 1 - x, y, raster.get_pixel_unchecked(x, y));
        }
    }

    Ok(out)
}

/// Flip a raster top-bottom (vertical mirror)
pub fn flip_tb(raster: &Raster) -> TransformResult<Raster> {
    let (w, h) = raster.dimensions();
    let mut out = raster.clone();

    for y in 0..h {
        for x in 0..w {
            out.set_pixel_unchecked(x, h - 1 - y, raster.get_pixel_unchecked(x, y));
        }
    }

    Ok(out)
}
