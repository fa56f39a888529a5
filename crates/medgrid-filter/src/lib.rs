//! medgrid-filter - Median filtering for 16-bit sensor grids
//!
//! This crate provides a square-kernel median filter with mirror padding:
//!
//! - [`boundary`]: reflection of out-of-range coordinates into the grid
//! - [`window`]: the sorted neighborhood maintained while sliding
//! - [`median`]: the row scan that drives both, sequential or row-parallel
//!
//! # Example
//!
//! ```
//! use medgrid_core::Grid16;
//! use medgrid_filter::median_filter;
//!
//! let grid = Grid16::from_data(3, 3, vec![1, 2, 3, 4, 500, 6, 7, 8, 9]).unwrap();
//! let filtered = median_filter(&grid, 3).unwrap();
//! assert_eq!(filtered.get_pixel(1, 1).unwrap(), 6);
//! ```

pub mod boundary;
mod error;
pub mod median;
pub mod window;

pub use boundary::{BoundarySampler, reflect};
pub use error::{FilterError, FilterResult};
pub use median::{
    DEFAULT_KSIZE, Execution, MedianFilterOptions, median_filter, median_filter_into,
    median_filter_par, median_filter_slice, median_filter_with,
};
pub use window::OrderedWindow;
