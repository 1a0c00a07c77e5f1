//! Raster clipping regression test
//!
//! Cuts the blocks of the synthetic chronicle page out in two ways, as a
//! row band followed by a column band and as a single box, and checks
//! that both agree and keep every ink sample of the block.

use folio_core::{Box, Raster};
use folio_test::{RegParams, synth};

#[test]
fn clip_reg() {
    let mut rp = RegParams::new("clip");

    let page = synth::chronicle_page().expect("chronicle page");
    let total_ink = page.count_at_most(0.0);
    eprintln!("  page ink samples: {}", total_ink);

    let mut block_ink = 0;
    for (i, &(x, y, w, h)) in synth::CHRONICLE_BLOCKS.iter().enumerate() {
        let band = page.clip_rows(y, y + h).expect("row band");
        let by_band = band.clip_columns(x, x + w).expect("column band");
        let by_box = page
            .clip_box(&Box::new_unchecked(x as i32, y as i32, w as i32, h as i32))
            .expect("box");
        eprintln!("  block {}: {}x{}", i, by_box.width(), by_box.height());

        rp.compare_values(w as f64, by_box.width() as f64, 0.0);
        rp.compare_values(h as f64, by_box.height() as f64, 0.0);
        rp.compare_rasters(&by_band, &by_box);
        block_ink += by_box.count_at_most(0.0);
    }

    // the blocks hold all the ink on the page
    rp.compare_values(total_ink as f64, block_ink as f64, 0.0);

    // boxes running off the page are clipped to it
    let corner = page
        .clip_box(&Box::new_unchecked(1100, 1500, 400, 400))
        .expect("corner box");
    rp.compare_values(100.0, corner.width() as f64, 0.0);
    rp.compare_values(100.0, corner.height() as f64, 0.0);

    // and boxes entirely off the page are rejected
    let outside = page.clip_box(&Box::new_unchecked(1300, 0, 50, 50));
    rp.compare_values(1.0, if outside.is_err() { 1.0 } else { 0.0 }, 0.0);

    let empty = Raster::new_with_value(10, 10, 1.0).expect("blank");
    rp.compare_values(1.0, if empty.clip_rows(4, 4).is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "clip regression test failed");
}
