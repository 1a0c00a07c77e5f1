//! Chronicle classification regression test
//!
//! Segments the synthetic chronicle page, classifies its regions and
//! records the roles in a temporary region directory.

use folio_chronicle::{
    Role, classify, classify_widths, is_unchecked_dir, mark_unchecked, rename_regions,
};
use folio_layout::{SegmentParams, segment};
use folio_test::{RegParams, synth};
use std::fs;
use std::path::PathBuf;

fn write_regions(dir: &std::path::Path, count: usize) -> Vec<PathBuf> {
    fs::create_dir_all(dir).expect("create region dir");
    (1..=count)
        .map(|i| {
            let path = dir.join(format!("{}.png", i));
            fs::write(&path, b"region").expect("write region");
            path
        })
        .collect()
}

#[test]
fn chronicle_reg() {
    let mut rp = RegParams::new("chronicle");

    // --- segmented chronicle page ---
    let page = synth::chronicle_page().expect("chronicle page");
    let regions = segment(&page, &SegmentParams::default()).expect("segment");
    let classification = classify(&regions, page.width());
    eprintln!("  roles: {:?}", classification.roles());
    let expected = [
        Role::Political,
        Role::Ecclesiastical,
        Role::Secular,
        Role::Footnotes,
    ];
    rp.compare_values(
        1.0,
        if classification.roles() == expected { 1.0 } else { 0.0 },
        0.0,
    );
    rp.compare_values(0.0, if classification.needs_review() { 1.0 } else { 0.0 }, 0.0);

    // --- renaming is applied once ---
    let root = tempfile::tempdir().expect("tempdir");
    let page_dir = root.path().join("1");
    let files = write_regions(&page_dir, 4);
    let renamed = rename_regions(&files, &classification).expect("rename");
    let names: Vec<String> = renamed
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    eprintln!("  renamed: {:?}", names);
    let want = [
        "1_political.png",
        "2_ecclesiastical.png",
        "3_secular.png",
        "4_footnotes.png",
    ];
    rp.compare_values(1.0, if names == want { 1.0 } else { 0.0 }, 0.0);

    let again = rename_regions(&renamed, &classification).expect("rename again");
    rp.compare_values(1.0, if again == renamed { 1.0 } else { 0.0 }, 0.0);
    let on_disk = fs::read_dir(&page_dir).expect("read dir").count();
    rp.compare_values(4.0, on_disk as f64, 0.0);

    // --- five regions: page abandoned, directory marked exactly once ---
    let five_dir = root.path().join("2");
    let files = write_regions(&five_dir, 5);
    let c = classify_widths(&[900, 400, 400, 400, 1000], 1000);
    rp.compare_values(1.0, if c.is_abandoned() { 1.0 } else { 0.0 }, 0.0);
    let renamed = rename_regions(&files, &c).expect("rename unchecked");
    rp.compare_values(1.0, if renamed == files { 1.0 } else { 0.0 }, 0.0);

    let marked = mark_unchecked(&five_dir).expect("mark").expect("first mark");
    rp.compare_values(1.0, if is_unchecked_dir(&marked) { 1.0 } else { 0.0 }, 0.0);
    let second = mark_unchecked(&marked).expect("mark again");
    rp.compare_values(1.0, if second.is_none() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if marked.is_dir() && !five_dir.exists() { 1.0 } else { 0.0 }, 0.0);

    // --- classification serializes by role name ---
    let json = serde_json::to_string(&classification.by_role()).expect("serialize");
    rp.compare_values(
        1.0,
        if json.contains("\"ecclesiastical\":[1]") { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "chronicle regression test failed");
}
