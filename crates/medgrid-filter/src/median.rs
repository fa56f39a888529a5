//! Sliding-window median filter
//!
//! Each output sample is the median of the `ksize x ksize` neighborhood of
//! the corresponding input sample, with mirror padding at the edges (see
//! [`crate::boundary`]).
//!
//! # Algorithm
//!
//! Rows are scanned top to bottom and columns left to right:
//!
//! 1. At column 0 of each row the full neighborhood is fetched and sorted
//!    into an [`OrderedWindow`].
//! 2. Moving to column `c`, the `ksize` samples of column `c - 1 - half`
//!    are removed one occurrence each, and the `ksize` samples of column
//!    `c + half` are inserted. The median is then the middle element.
//! 3. The next row starts again from step 1. Windows never slide
//!    vertically, so rows are independent of each other and
//!    [`median_filter_par`] can hand them to separate workers.
//!
//! Even kernel sizes return a copy of the input unchanged.

use crate::boundary::{BoundarySampler, overreaches};
use crate::window::OrderedWindow;
use crate::{FilterError, FilterResult};
use log::{debug, warn};
use medgrid_core::Grid16;
use rayon::prelude::*;

/// Default kernel size (3x3 denoise)
pub const DEFAULT_KSIZE: u32 = 3;

/// How rows are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One row after another on the calling thread
    #[default]
    Sequential,
    /// Rows distributed over the rayon thread pool
    Parallel,
}

/// Options for median filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianFilterOptions {
    /// Kernel side length; even values pass the input through unchanged
    pub ksize: u32,
    /// Row scheduling
    pub execution: Execution,
}

impl Default for MedianFilterOptions {
    fn default() -> Self {
        Self {
            ksize: DEFAULT_KSIZE,
            execution: Execution::Sequential,
        }
    }
}

impl MedianFilterOptions {
    /// Create options with a specific kernel size
    pub fn with_ksize(ksize: u32) -> Self {
        Self {
            ksize,
            ..Default::default()
        }
    }

    /// Schedule rows over the rayon thread pool
    pub fn parallel(mut self) -> Self {
        self.execution = Execution::Parallel;
        self
    }
}

/// Apply a `ksize x ksize` median filter to a grid.
///
/// # Arguments
/// * `grid` - Input grid
/// * `ksize` - Kernel side length (odd to filter, even to copy)
///
/// # Errors
///
/// Returns `FilterError::InvalidKernel` if `ksize == 0` and
/// `FilterError::AllocationFailed` if scratch or output storage cannot be
/// obtained.
pub fn median_filter(grid: &Grid16, ksize: u32) -> FilterResult<Grid16> {
    median_filter_with(grid, &MedianFilterOptions::with_ksize(ksize))
}

/// Apply a median filter with rows processed in parallel.
///
/// Produces exactly the same output as [`median_filter`].
pub fn median_filter_par(grid: &Grid16, ksize: u32) -> FilterResult<Grid16> {
    median_filter_with(grid, &MedianFilterOptions::with_ksize(ksize).parallel())
}

/// Apply a median filter configured by `options`.
pub fn median_filter_with(grid: &Grid16, options: &MedianFilterOptions) -> FilterResult<Grid16> {
    let (w, h) = grid.dimensions();
    let mut out = try_alloc_samples(grid.len())?;
    filter_samples(
        grid.data(),
        &mut out,
        w as usize,
        h as usize,
        options.ksize as usize,
        options.execution,
    )?;
    Ok(Grid16::from_data(w, h, out)?)
}

/// Apply a median filter to a row-major buffer and return a new buffer.
///
/// # Errors
///
/// Returns `FilterError::InvalidDimensions` if `width` or `height` is zero
/// or `input.len() != width * height`, `FilterError::InvalidKernel` if
/// `ksize == 0`, and `FilterError::AllocationFailed` if the output or the
/// `ksize x ksize` window cannot be allocated.
pub fn median_filter_slice(
    input: &[u16],
    width: usize,
    height: usize,
    ksize: usize,
) -> FilterResult<Vec<u16>> {
    check_dimensions(input.len(), width, height)?;
    let mut out = try_alloc_samples(input.len())?;
    filter_samples(input, &mut out, width, height, ksize, Execution::Sequential)?;
    Ok(out)
}

/// Apply a median filter into a caller-provided output buffer.
///
/// On error the contents of `output` are undefined beyond the last fully
/// computed row.
///
/// # Errors
///
/// Returns `FilterError::InvalidDimensions` if either buffer does not hold
/// `width * height` samples, `FilterError::InvalidKernel` if `ksize == 0`,
/// and `FilterError::AllocationFailed` if the `ksize x ksize` window cannot
/// be allocated. A kernel error is reported before any row is written.
pub fn median_filter_into(
    input: &[u16],
    output: &mut [u16],
    width: usize,
    height: usize,
    ksize: usize,
) -> FilterResult<()> {
    check_dimensions(input.len(), width, height)?;
    check_dimensions(output.len(), width, height)?;
    filter_samples(input, output, width, height, ksize, Execution::Sequential)
}

fn check_dimensions(len: usize, width: usize, height: usize) -> FilterResult<()> {
    if width == 0 || height == 0 || width.checked_mul(height) != Some(len) {
        return Err(FilterError::InvalidDimensions { width, height, len });
    }
    Ok(())
}

fn try_alloc_samples(n: usize) -> FilterResult<Vec<u16>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| FilterError::AllocationFailed { requested: n })?;
    v.resize(n, 0);
    Ok(v)
}

/// Shared driver; buffers are already validated.
fn filter_samples(
    input: &[u16],
    output: &mut [u16],
    width: usize,
    height: usize,
    ksize: usize,
    execution: Execution,
) -> FilterResult<()> {
    if ksize == 0 {
        return Err(FilterError::InvalidKernel("ksize must be >= 1".into()));
    }

    debug!(
        "median filter: {}x{} ksize={} {:?}",
        width, height, ksize, execution
    );

    if ksize % 2 == 0 {
        debug!("even ksize {}: copying input unchanged", ksize);
        output.copy_from_slice(input);
        return Ok(());
    }

    let half = ksize / 2;
    if overreaches(half, width) || overreaches(half, height) {
        warn!(
            "ksize {} exceeds {}x{} grid; edge samples are clamped",
            ksize, width, height
        );
    }

    let sampler = BoundarySampler::new(input, width, height);
    match execution {
        Execution::Sequential => {
            let mut scratch = RowScratch::try_new(ksize)?;
            for (y, out_row) in output.chunks_exact_mut(width).enumerate() {
                scratch.filter_row(&sampler, y, out_row)?;
            }
            Ok(())
        }
        Execution::Parallel => output.par_chunks_mut(width).enumerate().try_for_each_init(
            || RowScratch::try_new(ksize),
            |scratch, (y, out_row)| {
                let scratch = scratch.as_mut().map_err(|e| e.clone())?;
                scratch.filter_row(&sampler, y, out_row)
            },
        ),
    }
}

/// Per-worker state: the ordered window and one column of new samples.
struct RowScratch {
    window: OrderedWindow,
    column: Vec<u16>,
}

impl RowScratch {
    fn try_new(ksize: usize) -> FilterResult<Self> {
        Ok(Self {
            window: OrderedWindow::try_new(ksize)?,
            column: try_alloc_samples(ksize)?,
        })
    }

    /// Filter row `y` of the sampler's grid into `out_row`.
    fn filter_row(
        &mut self,
        sampler: &BoundarySampler<'_>,
        y: usize,
        out_row: &mut [u16],
    ) -> FilterResult<()> {
        let ksize = self.window.ksize();
        let half = (ksize / 2) as isize;
        let row = y as isize;

        self.window.initialize(sampler.neighborhood(row, 0, ksize))?;
        out_row[0] = self.window.median();

        for x in 1..out_row.len() {
            let col = x as isize;

            sampler.fill_column(row, col - 1 - half, &mut self.column);
            for &v in &self.column {
                let removed = self.window.remove_one(v);
                debug_assert!(removed, "departing sample {v} missing from window");
            }

            sampler.fill_column(row, col + half, &mut self.column);
            for &v in &self.column {
                self.window.insert_one(v);
            }

            out_row[x] = self.window.median();
        }

        Ok(())
    }
}
