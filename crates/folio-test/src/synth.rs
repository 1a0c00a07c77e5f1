//! Synthetic page builders
//!
//! Pages are white (`1.0`) with black (`0.0`) text blocks. A text block is
//! drawn as horizontal strokes separated by interline gaps, with narrow
//! word gaps cut through every stroke, which gives the scanner the same
//! clustered ink pattern a scanned line of handwriting produces.

use crate::TestResult;
use folio_core::Raster;

/// Paper intensity
pub const PAPER: f32 = 1.0;
/// Ink intensity
pub const INK: f32 = 0.0;

/// Stroke height of a synthetic text line
pub const STROKE: u32 = 6;
/// Distance between the tops of two consecutive text lines
pub const LINE_PITCH: u32 = 10;
/// Distance between the starts of two consecutive words
pub const WORD_PITCH: u32 = 45;
/// Width of the white gap between two words
pub const WORD_GAP: u32 = 5;

/// Reference page width used by the chronicle builder
pub const PAGE_WIDTH: u32 = 1200;
/// Reference page height used by the chronicle builder
pub const PAGE_HEIGHT: u32 = 1600;

/// A blank white page
pub fn blank_page(width: u32, height: u32) -> TestResult<Raster> {
    Ok(Raster::new_with_value(width, height, PAPER)?)
}

/// A page covered entirely in ink
pub fn black_page(width: u32, height: u32) -> TestResult<Raster> {
    Ok(Raster::new_with_value(width, height, INK)?)
}

/// Draw a block of text lines covering `[x, x + w) x [y, y + h)`
pub fn draw_text_block(raster: &mut Raster, x: u32, y: u32, w: u32, h: u32) {
    let mut line_top = y;
    while line_top < y + h {
        let stroke = STROKE.min(y + h - line_top);
        let mut word_left = x;
        while word_left < x + w {
            let word_w = (WORD_PITCH - WORD_GAP).min(x + w - word_left);
            raster.fill_rect(word_left, line_top, word_w, stroke, INK);
            word_left += WORD_PITCH;
        }
        line_top += LINE_PITCH;
    }
}

/// A white page with full-measure text blocks spanning the given row ranges
///
/// Each band is `(top, bottom)` with `bottom` exclusive; blocks run from
/// 8% to 92% of the page width.
pub fn banded_page(width: u32, height: u32, bands: &[(u32, u32)]) -> TestResult<Raster> {
    let mut page = blank_page(width, height)?;
    let left = width * 8 / 100;
    let right = width * 92 / 100;
    for &(top, bottom) in bands {
        draw_text_block(&mut page, left, top, right - left, bottom.saturating_sub(top));
    }
    Ok(page)
}

/// Text block placement on the reference chronicle page, as `(x, y, w, h)`
///
/// In reading order: the full-width political header, the narrow
/// ecclesiastical and secular columns side by side, and the footnotes.
pub const CHRONICLE_BLOCKS: [(u32, u32, u32, u32); 4] = [
    (100, 150, 1000, 300),
    (100, 550, 380, 550),
    (620, 550, 480, 550),
    (100, 1250, 1000, 200),
];

/// The four-part chronicle layout at the reference size
pub fn chronicle_page() -> TestResult<Raster> {
    let mut page = blank_page(PAGE_WIDTH, PAGE_HEIGHT)?;
    for &(x, y, w, h) in &CHRONICLE_BLOCKS {
        draw_text_block(&mut page, x, y, w, h);
    }
    Ok(page)
}

/// Sprinkle isolated ink pixels over roughly `1 / every` of the page
///
/// The pattern is a fixed function of `seed`, so tests stay reproducible.
pub fn add_salt_noise(raster: &mut Raster, every: u32, seed: u64) {
    let mut state = seed | 1;
    let (w, h) = raster.dimensions();
    for y in 0..h {
        for x in 0..w {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            if state % every.max(1) as u64 == 0 {
                raster.set_pixel_unchecked(x, y, INK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_block_has_strokes_and_gaps() {
        let mut page = blank_page(100, 40).unwrap();
        draw_text_block(&mut page, 0, 0, 100, 20);
        // first stroke row is inked except in the word gap
        assert_eq!(page.get_pixel(0, 0).unwrap(), INK);
        assert_eq!(page.get_pixel(WORD_PITCH - 1, 0).unwrap(), PAPER);
        // interline gap
        assert_eq!(page.get_pixel(0, STROKE).unwrap(), PAPER);
        // below the block
        assert_eq!(page.get_pixel(0, 30).unwrap(), PAPER);
    }

    #[test]
    fn test_chronicle_page_blocks() {
        let page = chronicle_page().unwrap();
        assert_eq!(page.dimensions(), (PAGE_WIDTH, PAGE_HEIGHT));
        for &(x, y, _, _) in &CHRONICLE_BLOCKS {
            assert_eq!(page.get_pixel(x, y).unwrap(), INK);
        }
        // gutter between the two middle columns
        assert_eq!(page.get_pixel(550, 550).unwrap(), PAPER);
    }

    #[test]
    fn test_salt_noise_is_sparse_and_reproducible() {
        let mut a = blank_page(200, 200).unwrap();
        let mut b = blank_page(200, 200).unwrap();
        add_salt_noise(&mut a, 500, 7);
        add_salt_noise(&mut b, 500, 7);
        assert_eq!(a, b);
        let inked = a.count_at_most(0.1);
        assert!(inked > 0 && inked < 400);
    }
}
