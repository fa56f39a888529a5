//! Ordered window
//!
//! An ascending sequence of exactly `ksize * ksize` samples. The window is
//! sorted once when a row starts; sliding one column then costs `ksize`
//! removals and `ksize` insertions, each a binary search plus a shift of
//! the tail, and the median is always the middle element.

use crate::{FilterError, FilterResult};

/// Sorted multiset of the samples in the current neighborhood.
#[derive(Debug, Clone)]
pub struct OrderedWindow {
    /// Kernel side length
    ksize: usize,
    /// Number of samples in a full window (`ksize * ksize`)
    area: usize,
    /// Samples in ascending order
    values: Vec<u16>,
}

impl OrderedWindow {
    /// Allocate an empty window for a `ksize x ksize` kernel.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if `ksize` is zero or its square
    /// overflows, and `FilterError::AllocationFailed` if the storage cannot
    /// be reserved.
    pub fn try_new(ksize: usize) -> FilterResult<Self> {
        if ksize == 0 {
            return Err(FilterError::InvalidKernel("ksize must be >= 1".into()));
        }
        let area = ksize
            .checked_mul(ksize)
            .ok_or_else(|| FilterError::InvalidKernel(format!("ksize {ksize} is too large")))?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(area)
            .map_err(|_| FilterError::AllocationFailed { requested: area })?;

        Ok(Self {
            ksize,
            area,
            values,
        })
    }

    /// Kernel side length
    #[inline]
    pub fn ksize(&self) -> usize {
        self.ksize
    }

    /// Number of samples currently held
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the window holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if the window holds `ksize * ksize` samples
    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == self.area
    }

    /// The samples in ascending order
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }

    /// Replace the contents with a new neighborhood and sort it.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameters` unless exactly
    /// `ksize * ksize` values are supplied.
    pub fn initialize<I>(&mut self, values: I) -> FilterResult<()>
    where
        I: IntoIterator<Item = u16>,
    {
        self.values.clear();
        self.values.extend(values.into_iter().take(self.area + 1));
        if self.values.len() != self.area {
            self.values.clear();
            return Err(FilterError::InvalidParameters(format!(
                "window for ksize {} needs exactly {} values",
                self.ksize, self.area
            )));
        }
        self.values.sort_unstable();
        Ok(())
    }

    /// Remove one occurrence of `value`.
    ///
    /// Duplicates are removed one instance per call. Returns `false` if the
    /// value is not present.
    pub fn remove_one(&mut self, value: u16) -> bool {
        let pos = self.values.partition_point(|&v| v < value);
        if self.values.get(pos) == Some(&value) {
            self.values.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove and return the smallest sample.
    ///
    /// This drops the minimum regardless of which samples geometrically
    /// left the neighborhood; the scan driver uses [`Self::remove_one`].
    pub fn remove_smallest(&mut self) -> Option<u16> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.remove(0))
        }
    }

    /// Insert `value` before the first element that is not smaller.
    pub fn insert_one(&mut self, value: u16) {
        debug_assert!(self.values.len() < self.area, "window overflow");
        let pos = self.values.partition_point(|&v| v < value);
        self.values.insert(pos, value);
    }

    /// Middle element of the ascending sequence.
    ///
    /// For a full window this is index `half * ksize + half`.
    ///
    /// # Panics
    ///
    /// Panics if the window is empty.
    #[inline]
    pub fn median(&self) -> u16 {
        self.values[self.values.len() / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(matches!(
            OrderedWindow::try_new(0),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        assert!(matches!(
            OrderedWindow::try_new(usize::MAX),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_initialize_sorts() {
        let mut w = OrderedWindow::try_new(3).unwrap();
        w.initialize([9, 1, 8, 2, 7, 3, 6, 4, 5]).unwrap();
        assert_eq!(w.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(w.is_full());
        assert_eq!(w.median(), 5);
    }

    #[test]
    fn test_initialize_wrong_count() {
        let mut w = OrderedWindow::try_new(3).unwrap();
        assert!(w.initialize([1, 2, 3]).is_err());
        assert!(w.is_empty());
        assert!(w.initialize(0..10).is_err());
        assert!(w.initialize(0..9).is_ok());
    }

    #[test]
    fn test_median_index_matches_center() {
        let mut w = OrderedWindow::try_new(5).unwrap();
        w.initialize((0..25).rev()).unwrap();
        // half * ksize + half = 2 * 5 + 2
        assert_eq!(w.median(), w.as_slice()[12]);
        assert_eq!(w.median(), 12);
    }

    #[test]
    fn test_remove_one_duplicates() {
        let mut w = OrderedWindow::try_new(3).unwrap();
        w.initialize([5, 5, 5, 1, 2, 3, 7, 8, 9]).unwrap();
        assert!(w.remove_one(5));
        assert_eq!(w.as_slice(), &[1, 2, 3, 5, 5, 7, 8, 9]);
        assert!(!w.remove_one(4));
        assert_eq!(w.len(), 8);
    }

    #[test]
    fn test_insert_one_keeps_order() {
        let mut w = OrderedWindow::try_new(3).unwrap();
        w.initialize([1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert!(w.remove_one(9));
        w.insert_one(0);
        assert_eq!(w.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(w.remove_one(4));
        w.insert_one(4);
        assert_eq!(w.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(w.median(), 4);
    }

    #[test]
    fn test_remove_smallest() {
        let mut w = OrderedWindow::try_new(1).unwrap();
        w.initialize([42]).unwrap();
        assert_eq!(w.remove_smallest(), Some(42));
        assert_eq!(w.remove_smallest(), None);
    }

    #[test]
    fn test_remove_smallest_differs_from_geometric_removal() {
        // Departing sample is 9, but remove_smallest drops the 1
        let mut geometric = OrderedWindow::try_new(3).unwrap();
        geometric.initialize([1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        let mut smallest = geometric.clone();

        geometric.remove_one(9);
        geometric.insert_one(10);
        smallest.remove_smallest();
        smallest.insert_one(10);

        assert_eq!(geometric.median(), 5);
        assert_eq!(smallest.median(), 6);
    }
}
