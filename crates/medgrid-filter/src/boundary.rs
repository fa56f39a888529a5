//! Mirror boundary sampling
//!
//! Neighborhoods that extend past the grid edge are completed by reflecting
//! coordinates about the edge sample, without repeating it:
//!
//! ```text
//! index:   -2 -1 | 0  1  2  3 | 4  5
//! sample:   c  b | a  b  c  d | c  b
//! ```
//!
//! Per axis, a coordinate `< 0` maps to `-coord` and a coordinate
//! `>= extent` maps to `2 * extent - coord - 2`. A single reflection is
//! applied. When the kernel radius reaches the extent (e.g. a 1-wide grid
//! with a 3x3 kernel) that reflection can still land outside the grid; the
//! result is then clamped to the nearest edge sample.

use medgrid_core::Grid16;

/// Reflect `coord` into `[0, extent)`.
///
/// # Panics
///
/// Panics in debug builds if `extent == 0`.
#[inline]
pub fn reflect(coord: isize, extent: usize) -> usize {
    debug_assert!(extent > 0);
    let n = extent as isize;
    let r = if coord < 0 {
        -coord
    } else if coord >= n {
        2 * n - coord - 2
    } else {
        coord
    };
    r.clamp(0, n - 1) as usize
}

/// Whether a kernel radius is too large for a single reflection on an axis
/// of the given extent.
#[inline]
pub fn overreaches(half: usize, extent: usize) -> bool {
    half >= extent
}

/// Read-only view of a row-major sample buffer with mirror padding.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySampler<'a> {
    data: &'a [u16],
    width: usize,
    height: usize,
}

impl<'a> BoundarySampler<'a> {
    /// Wrap a row-major buffer of `width * height` samples.
    ///
    /// The caller guarantees `data.len() == width * height` and non-zero
    /// dimensions.
    pub fn new(data: &'a [u16], width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap the samples of a grid.
    pub fn from_grid(grid: &'a Grid16) -> Self {
        Self::new(grid.data(), grid.width() as usize, grid.height() as usize)
    }

    /// Width of the underlying grid
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the underlying grid
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at (row, col), reflecting out-of-range coordinates.
    #[inline]
    pub fn sample(&self, row: isize, col: isize) -> u16 {
        let r = reflect(row, self.height);
        let c = reflect(col, self.width);
        self.data[r * self.width + c]
    }

    /// Fill `out` with the column `col` of the neighborhood centered on row
    /// `row_center`, top to bottom.
    ///
    /// `out.len()` is the kernel size; the rows covered are
    /// `row_center - out.len() / 2 ..= row_center + out.len() / 2`.
    pub fn fill_column(&self, row_center: isize, col: isize, out: &mut [u16]) {
        let top = row_center - (out.len() / 2) as isize;
        for (dy, v) in out.iter_mut().enumerate() {
            *v = self.sample(top + dy as isize, col);
        }
    }

    /// Iterate the `ksize x ksize` neighborhood centered on (row, col) in
    /// row-major order.
    pub fn neighborhood(
        &self,
        row: isize,
        col: isize,
        ksize: usize,
    ) -> impl Iterator<Item = u16> + '_ {
        let half = (ksize / 2) as isize;
        (-half..=half)
            .flat_map(move |dy| (-half..=half).map(move |dx| self.sample(row + dy, col + dx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_in_range() {
        for c in 0..5 {
            assert_eq!(reflect(c, 5), c as usize);
        }
    }

    #[test]
    fn test_reflect_does_not_repeat_edge() {
        assert_eq!(reflect(-1, 5), 1);
        assert_eq!(reflect(-2, 5), 2);
        assert_eq!(reflect(5, 5), 3);
        assert_eq!(reflect(6, 5), 2);
    }

    #[test]
    fn test_reflect_clamps_overreach() {
        // Single reflection of -3 on a 2-wide axis gives 3, clamped to 1
        assert_eq!(reflect(-3, 2), 1);
        // 2 * 2 - 5 - 2 = -3, clamped to 0
        assert_eq!(reflect(5, 2), 0);
        for c in -4..5 {
            assert_eq!(reflect(c, 1), 0);
        }
    }

    #[test]
    fn test_overreaches() {
        assert!(!overreaches(1, 2));
        assert!(overreaches(1, 1));
        assert!(overreaches(3, 3));
    }

    #[test]
    fn test_sampler_corner() {
        // 3x3 ramp:
        //   0 1 2
        //   3 4 5
        //   6 7 8
        let data: Vec<u16> = (0..9).collect();
        let s = BoundarySampler::new(&data, 3, 3);
        assert_eq!(s.sample(-1, -1), 4);
        assert_eq!(s.sample(3, 3), 4);
        assert_eq!(s.sample(-1, 2), 5);
        assert_eq!(s.sample(1, 3), 4);

        let hood: Vec<u16> = s.neighborhood(0, 0, 3).collect();
        assert_eq!(hood, vec![4, 3, 4, 1, 0, 1, 4, 3, 4]);
    }

    #[test]
    fn test_fill_column() {
        let data: Vec<u16> = (0..12).collect(); // 4 wide, 3 high
        let s = BoundarySampler::new(&data, 4, 3);
        let mut col = [0u16; 3];
        s.fill_column(0, 4, &mut col);
        // column 4 reflects to 2; rows -1, 0, 1 -> 1, 0, 1
        assert_eq!(col, [6, 2, 6]);
    }
}
