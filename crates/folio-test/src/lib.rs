//! folio-test - Regression test framework for folio
//!
//! Regression tests run in one of three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! The [`synth`] module builds page rasters in code so that layout tests
//! do not depend on scanned fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use folio_test::{RegParams, synth};
//!
//! let page = synth::blank_page(1200, 1600)?;
//! let mut rp = RegParams::new("textbox");
//! rp.compare_values(0.0, intervals.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // folio-test is at crates/folio-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
