//! Grid comparison
//!
//! Counts sample differences between two grids of equal dimensions. Used by
//! the regression harness to compare filter output against a reference.

use super::Grid16;
use crate::error::{Error, Result};

/// Result of comparing two grids sample by sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDiff {
    /// Number of samples that differ
    pub n_diff: u64,
    /// Largest absolute sample difference
    pub max_diff: u16,
    /// Position (x, y) of the first differing sample in row-major order
    pub first_diff: Option<(u32, u32)>,
}

impl GridDiff {
    /// True if no sample differs.
    #[inline]
    pub fn is_equal(&self) -> bool {
        self.n_diff == 0
    }
}

impl Grid16 {
    /// Compare two grids sample by sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the grids differ in size.
    pub fn compare(&self, other: &Grid16) -> Result<GridDiff> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }

        let width = self.width as usize;
        let mut diff = GridDiff {
            n_diff: 0,
            max_diff: 0,
            first_diff: None,
        };

        for (i, (&a, &b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            if a == b {
                continue;
            }
            diff.n_diff += 1;
            diff.max_diff = diff.max_diff.max(a.abs_diff(b));
            if diff.first_diff.is_none() {
                diff.first_diff = Some(((i % width) as u32, (i / width) as u32));
            }
        }

        Ok(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal() {
        let a = Grid16::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
        let diff = a.compare(&a.clone()).unwrap();
        assert!(diff.is_equal());
        assert_eq!(diff.first_diff, None);
    }

    #[test]
    fn test_compare_counts_differences() {
        let a = Grid16::from_data(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Grid16::from_data(3, 2, vec![1, 9, 3, 4, 5, 0]).unwrap();
        let diff = a.compare(&b).unwrap();
        assert_eq!(diff.n_diff, 2);
        assert_eq!(diff.max_diff, 7);
        assert_eq!(diff.first_diff, Some((1, 0)));
    }

    #[test]
    fn test_compare_dimension_mismatch() {
        let a = Grid16::new(3, 2).unwrap();
        let b = Grid16::new(2, 3).unwrap();
        assert!(matches!(
            a.compare(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
