//! medgrid-core - Basic data structures for 16-bit sensor grids
//!
//! This crate provides the fundamental container used throughout the
//! medgrid workspace:
//!
//! - [`Grid16`] - Row-major grid of unsigned 16-bit samples
//! - [`GridF32`] - Floating-point grid for gain maps and corrected intensities
//! - [`Trim`] - Margins used to crop sensor borders and restore them
//! - [`GridDiff`] - Result of comparing two grids sample by sample
//!
//! Grids are plain owned buffers. Filtering lives in `medgrid-filter` and
//! raw/PNG conversion in `medgrid-io`.

pub mod error;
pub mod fgrid;
pub mod grid;

pub use error::{Error, Result};
pub use fgrid::GridF32;
pub use grid::statistics::CORNER_SIZE;
pub use grid::{Grid16, GridDiff, Trim};
