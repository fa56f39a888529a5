//! medgrid - Median filtering for 16-bit sensor grids
//!
//! Removes impulse noise from single-channel `u16` captures with a square
//! sliding-window median filter. Samples beyond the grid edge are read by
//! mirror reflection, so the output has the same dimensions as the input.
//!
//! # Overview
//!
//! - [`Grid16`]: row-major 16-bit grid with crop and statistics helpers
//! - [`filter`]: the median filter and its building blocks
//! - [`io`]: raw capture decoding, PNG/TIFF export and batch conversion
//!
//! # Example
//!
//! ```
//! use medgrid::Grid16;
//! use medgrid::filter::median_filter;
//!
//! let mut grid = Grid16::new_with_value(8, 8, 120).unwrap();
//! grid.set_pixel(4, 4, 65535).unwrap();
//!
//! let clean = median_filter(&grid, 3).unwrap();
//! assert_eq!(clean.get_pixel(4, 4).unwrap(), 120);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use medgrid_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use medgrid_filter as filter;
pub use medgrid_io as io;
