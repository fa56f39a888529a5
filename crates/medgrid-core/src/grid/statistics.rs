//! Grid statistics
//!
//! Summary values over all samples of a grid:
//!
//! - Minimum / maximum sample
//! - Mean sample
//! - Mean of the brighter half (used to normalize flat-field captures)
//! - Mean of the four corner blocks (dark level of a capture)

use super::Grid16;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Side length of the corner blocks used by [`Grid16::mean_of_4_corners`]
pub const CORNER_SIZE: u32 = 100;

impl Grid16 {
    /// Smallest sample value.
    pub fn min_value(&self) -> u16 {
        self.data.iter().copied().min().unwrap_or(0)
    }

    /// Largest sample value.
    pub fn max_value(&self) -> u16 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Mean of all samples.
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f64 / self.data.len() as f64
    }

    /// Mean of the samples at or above the median of the brighter half.
    ///
    /// With `n` samples and `k = ceil(n / 2)`, the threshold is the k-th
    /// largest sample. All samples `>= threshold` are averaged, so ties at
    /// the threshold are all included.
    pub fn mean_of_top_half(&self) -> f64 {
        top_half_mean(&self.data)
    }

    /// Mean over four `corner x corner` blocks at the grid corners.
    ///
    /// The right and bottom blocks end one sample short of the edge: they
    /// span `[n - corner - 1, n - 1)` on that axis, so the last row and the
    /// last column are never included.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `corner` is zero or either
    /// dimension is smaller than `corner + 1`.
    pub fn mean_of_4_corners(&self, corner: u32) -> Result<f64> {
        corners_mean(&self.data, self.width, self.height, corner)
    }
}

/// Shared by `Grid16` and `GridF32`; `data` must be non-empty.
pub(crate) fn top_half_mean<T>(data: &[T]) -> f64
where
    T: Copy + PartialOrd + Into<f64>,
{
    let n = data.len();
    let k = n.div_ceil(2);

    let mut scratch = data.to_vec();
    let (_, &mut threshold, _) = scratch
        .select_nth_unstable_by(n - k, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let (sum, count) = data
        .iter()
        .filter(|&&v| v >= threshold)
        .fold((0.0f64, 0u64), |(s, c), &v| (s + v.into(), c + 1));
    sum / count as f64
}

pub(crate) fn corners_mean<T>(data: &[T], width: u32, height: u32, corner: u32) -> Result<f64>
where
    T: Copy + Into<f64>,
{
    if corner == 0 || width <= corner || height <= corner {
        return Err(Error::InvalidParameter(format!(
            "corner size {} needs a grid of at least {}x{}, got {}x{}",
            corner,
            corner as u64 + 1,
            corner as u64 + 1,
            width,
            height
        )));
    }

    let (w, c) = (width as usize, corner as usize);
    let near = 0..c;
    let far_x = w - c - 1..w - 1;
    let far_y = height as usize - c - 1..height as usize - 1;

    let mut sum = 0.0f64;
    for rows in [near.clone(), far_y] {
        for cols in [near.clone(), far_x.clone()] {
            for y in rows.clone() {
                sum += data[y * w + cols.start..y * w + cols.end]
                    .iter()
                    .map(|&v| v.into())
                    .sum::<f64>();
            }
        }
    }

    Ok(sum / (4 * c * c) as f64)
}

#[cfg(test)]
mod tests {
    use crate::Grid16;

    #[test]
    fn test_min_max_mean() {
        let grid = Grid16::from_data(2, 2, vec![4, 1, 9, 2]).unwrap();
        assert_eq!(grid.min_value(), 1);
        assert_eq!(grid.max_value(), 9);
        assert!((grid.mean() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_top_half_even() {
        // k = 2, threshold = 4 -> mean(4, 9)
        let grid = Grid16::from_data(2, 2, vec![4, 1, 9, 2]).unwrap();
        assert!((grid.mean_of_top_half() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_top_half_odd_with_ties() {
        // n = 5, k = 3, threshold = 3; ties above the cut are all kept
        let grid = Grid16::from_data(5, 1, vec![3, 3, 3, 1, 7]).unwrap();
        assert!((grid.mean_of_top_half() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_top_half_single() {
        let grid = Grid16::from_data(1, 1, vec![17]).unwrap();
        assert!((grid.mean_of_top_half() - 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_4_corners_skips_last_row_and_column() {
        // 4x4 grid, 2x2 corners: right/bottom blocks cover index 1..3
        #[rustfmt::skip]
        let grid = Grid16::from_data(4, 4, vec![
            1, 1, 5, 0,
            1, 1, 5, 0,
            7, 7, 9, 0,
            0, 0, 0, 0,
        ]).unwrap();
        // blocks: TL {1,1,1,1}, TR {1,5,1,5}, BL {1,1,7,7}, BR {1,5,7,9}
        let expected = (4.0 + 12.0 + 16.0 + 22.0) / 16.0;
        assert!((grid.mean_of_4_corners(2).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_4_corners_too_small() {
        let grid = Grid16::new(100, 300).unwrap();
        assert!(grid.mean_of_4_corners(super::CORNER_SIZE).is_err());
        assert!(grid.mean_of_4_corners(0).is_err());
        assert_eq!(Grid16::new(101, 101).unwrap().mean_of_4_corners(100), Ok(0.0));
    }
}
