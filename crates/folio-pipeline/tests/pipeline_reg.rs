//! Pipeline regression test
//!
//! Runs the segment and classify stages over a small output tree:
//!
//! ```text
//! out/vol1/1.png   synthetic chronicle page
//! out/vol1/2.png   blank page (one region, left for review)
//! out/vol1/3.png   undecodable file
//! ```
//!
//! then runs both stages again, which must leave the reviewed page alone.

use folio_io::ImageFormat;
use folio_pipeline::fsutil::list_files;
use folio_pipeline::{BatchRunner, Pipeline, PipelineConfig, Stage, Stages};
use folio_test::{RegParams, synth};
use std::fs;

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let root = tempfile::tempdir().expect("tempdir");
    let out = root.path().join("out");
    let doc = out.join("vol1");
    fs::create_dir_all(&doc).expect("create doc dir");

    let page = synth::chronicle_page().expect("chronicle page");
    folio_io::write_raster(&page, doc.join("1.png"), ImageFormat::Png).expect("write page 1");
    let blank = synth::blank_page(600, 800).expect("blank page");
    folio_io::write_raster(&blank, doc.join("2.png"), ImageFormat::Png).expect("write page 2");
    fs::write(doc.join("3.png"), b"not an image").expect("write page 3");

    let runner = BatchRunner::new(Some(2)).expect("runner");
    let pipeline = Pipeline::new(PipelineConfig::default(), runner);
    let stages = Stages {
        segment: true,
        classify: true,
        ..Stages::default()
    };

    // --- first run ---
    let reports = pipeline.run(root.path(), &out, &stages).expect("run");
    let order: Vec<Stage> = reports.iter().map(|(s, _)| *s).collect();
    rp.compare_values(
        1.0,
        if order == [Stage::Segment, Stage::Classify] { 1.0 } else { 0.0 },
        0.0,
    );

    let (_, seg) = &reports[0];
    eprintln!("  segment: {:?}", seg);
    rp.compare_values(2.0, seg.processed as f64, 0.0);
    rp.compare_values(1.0, seg.failed.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        if seg.failed.first().is_some_and(|(p, _)| p.ends_with("3.png")) { 1.0 } else { 0.0 },
        0.0,
    );

    let (_, cls) = &reports[1];
    eprintln!("  classify: {:?}", cls);
    rp.compare_values(2.0, cls.processed as f64, 0.0);
    rp.compare_values(1.0, cls.skipped as f64, 0.0);
    rp.compare_values(0.0, cls.failed.len() as f64, 0.0);

    // --- role-named region files ---
    let names: Vec<String> = list_files(&doc.join("1"), "png")
        .expect("list regions")
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    eprintln!("  regions: {:?}", names);
    let want = [
        "1_political.png",
        "2_ecclesiastical.png",
        "3_secular.png",
        "4_footnotes.png",
    ];
    rp.compare_values(1.0, if names == want { 1.0 } else { 0.0 }, 0.0);

    let political = folio_io::read_image_header(doc.join("1").join("1_political.png"))
        .expect("political header");
    rp.compare_values(1047.0, political.width as f64, 0.0);
    rp.compare_values(305.0, political.height as f64, 0.0);

    // --- blank page marked for review ---
    rp.compare_values(1.0, if doc.join("2_unchecked").is_dir() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if doc.join("2").exists() { 1.0 } else { 0.0 }, 0.0);

    // --- a second full run leaves the reviewed page alone ---
    let reports = pipeline.run(root.path(), &out, &stages).expect("rerun");
    let (_, seg) = &reports[0];
    eprintln!("  segment again: {:?}", seg);
    rp.compare_values(1.0, seg.processed as f64, 0.0);
    rp.compare_values(1.0, seg.skipped as f64, 0.0);
    rp.compare_values(1.0, seg.failed.len() as f64, 0.0);
    rp.compare_values(0.0, if doc.join("2").exists() { 1.0 } else { 0.0 }, 0.0);

    let (_, again) = &reports[1];
    eprintln!("  classify again: {:?}", again);
    rp.compare_values(1.0, again.processed as f64, 0.0);
    rp.compare_values(2.0, again.skipped as f64, 0.0);
    rp.compare_values(0.0, again.failed.len() as f64, 0.0);
    let names_again: Vec<String> = list_files(&doc.join("1"), "png")
        .expect("list again")
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    rp.compare_values(1.0, if names_again == want { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if doc.join("2_unchecked").is_dir() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(
        0.0,
        if doc.join("2_unchecked_unchecked").exists() { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "pipeline regression test failed");
}
