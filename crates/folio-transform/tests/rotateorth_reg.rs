//! Orthogonal rotation regression test
//!
//! Rotates synthetic pages through all four quadrants and checks that the
//! compositions agree, including the column-for-row mapping the boundary
//! scanner depends on.

use folio_core::Raster;
use folio_test::{RegParams, synth};
use folio_transform::{flip_lr, flip_tb, rotate_90, rotate_180, rotate_orth};

#[test]
fn rotateorth_reg() {
    let mut rp = RegParams::new("rotateorth");

    let chronicle = synth::chronicle_page().expect("chronicle page");
    test_orth_rotation(&mut rp, &chronicle, "chronicle");

    let mut noisy = synth::banded_page(300, 120, &[(20, 50), (80, 100)]).expect("banded page");
    synth::add_salt_noise(&mut noisy, 97, 3);
    test_orth_rotation(&mut rp, &noisy, "noisy");

    assert!(rp.cleanup(), "rotateorth regression test failed");
}

fn test_orth_rotation(rp: &mut RegParams, page: &Raster, label: &str) {
    let (w, h) = page.dimensions();
    eprintln!("Testing {} orthogonal rotation: {}x{}", label, w, h);

    // orth(0) = identity
    let r0 = rotate_orth(page, 0).expect("rotate_orth 0");
    rp.compare_rasters(page, &r0);

    // orth(1) = 90 cw
    let r1 = rotate_orth(page, 1).expect("rotate_orth 1");
    rp.compare_values(h as f64, r1.width() as f64, 0.0);
    rp.compare_values(w as f64, r1.height() as f64, 0.0);
    let r90 = rotate_90(page, true).expect("rotate_90 cw");
    rp.compare_rasters(&r1, &r90);

    // rotated row r holds source column r, top of the page on the right
    let col = w / 3;
    let expected: Vec<f32> = (0..h).rev().map(|y| page.get_pixel_unchecked(col, y)).collect();
    let same = r1.row(col) == expected.as_slice();
    rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);

    // orth(2) = 180 = both flips
    let r2 = rotate_orth(page, 2).expect("rotate_orth 2");
    rp.compare_rasters(&r2, &rotate_180(page).expect("rotate_180"));
    let flipped = flip_tb(&flip_lr(page).expect("flip_lr")).expect("flip_tb");
    rp.compare_rasters(&r2, &flipped);

    // orth(3) = 90 ccw
    let r3 = rotate_orth(page, 3).expect("rotate_orth 3");
    rp.compare_rasters(&r3, &rotate_90(page, false).expect("rotate_90 ccw"));

    // four quadrants = identity
    let r4 = rotate_orth(&r3, 1).expect("4th rotation");
    rp.compare_rasters(page, &r4);

    // ink is preserved
    rp.compare_values(
        page.count_at_most(0.1) as f64,
        r1.count_at_most(0.1) as f64,
        0.0,
    );
}
