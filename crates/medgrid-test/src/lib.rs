//! medgrid-test - Regression test framework for medgrid
//!
//! This crate provides a regression test framework supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also carries the reference oracles the filter is checked against:
//! an explicitly mirror-padded, fully sorted median filter and seeded
//! random grids.
//!
//! # Usage
//!
//! ```ignore
//! use medgrid_test::{RegParams, reference_median_filter, scenario_grid};
//!
//! let mut rp = RegParams::new("median");
//! let grid = scenario_grid();
//! rp.compare_grid(&reference_median_filter(&grid, 3), &filtered);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod oracle;
mod params;

pub use error::{TestError, TestResult};
pub use oracle::{mirror_pad, random_grid, reference_median_filter, scenario_grid};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // medgrid-test is at crates/medgrid-test, so go up two directories
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
