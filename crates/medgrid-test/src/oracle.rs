//! Reference oracles
//!
//! [`reference_median_filter`] computes each output sample by building the
//! mirror-padded grid explicitly and fully sorting every neighborhood. It
//! shares no code with the sliding-window filter and is the ground truth
//! the filter is tested against.

use medgrid_core::Grid16;
use rand::prelude::*;

/// The 5x4 capture used as the worked example for a 3x3 filter.
pub fn scenario_grid() -> Grid16 {
    #[rustfmt::skip]
    let data = vec![
        10, 12, 13, 15, 17,
         9, 11, 14, 16, 18,
        20, 22, 23, 25, 27,
        19, 21, 24, 26, 28,
    ];
    Grid16::from_data(5, 4, data).expect("5x4 scenario grid")
}

/// Grid with samples drawn uniformly from `0..=max_value`.
///
/// A small `max_value` produces many duplicate samples, which exercises
/// the one-occurrence removal of the sliding window.
pub fn random_grid(width: u32, height: u32, max_value: u16, seed: u64) -> Grid16 {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width as usize * height as usize)
        .map(|_| rng.random_range(0..=max_value))
        .collect();
    Grid16::from_data(width, height, data).expect("random grid dimensions")
}

/// Mirror index without repeating the edge, clamped to the axis.
fn mirror(i: i64, n: i64) -> i64 {
    let r = if i < 0 {
        -i
    } else if i >= n {
        2 * (n - 1) - i
    } else {
        i
    };
    r.max(0).min(n - 1)
}

/// Build a grid enlarged by `pad` samples on every side, filled by mirror
/// reflection of the input.
pub fn mirror_pad(grid: &Grid16, pad: u32) -> Grid16 {
    let (w, h) = grid.dimensions();
    let pw = w + 2 * pad;
    let ph = h + 2 * pad;
    let mut out = Grid16::new(pw, ph).expect("padded dimensions");
    for y in 0..ph {
        for x in 0..pw {
            let sx = mirror(x as i64 - pad as i64, w as i64) as u32;
            let sy = mirror(y as i64 - pad as i64, h as i64) as u32;
            out.set_pixel_unchecked(x, y, grid.get_pixel_unchecked(sx, sy));
        }
    }
    out
}

/// Brute-force median filter: pad, then sort each full neighborhood.
///
/// Even `ksize` returns a copy of the input.
pub fn reference_median_filter(grid: &Grid16, ksize: u32) -> Grid16 {
    if ksize % 2 == 0 {
        return grid.clone();
    }

    let half = ksize / 2;
    let padded = mirror_pad(grid, half);
    let mut out = grid.create_template();
    let mut block = Vec::with_capacity((ksize * ksize) as usize);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            block.clear();
            for by in y..y + ksize {
                for bx in x..x + ksize {
                    block.push(padded.get_pixel_unchecked(bx, by));
                }
            }
            block.sort();
            out.set_pixel_unchecked(x, y, block[block.len() / 2]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_pad() {
        let grid = Grid16::from_data(3, 1, vec![1, 2, 3]).unwrap();
        let padded = mirror_pad(&grid, 2);
        assert_eq!(padded.dimensions(), (7, 5));
        assert_eq!(padded.row(2), &[3, 2, 1, 2, 3, 2, 1]);
        // Height 1: every padded row mirrors back to the only row
        assert_eq!(padded.row(0), padded.row(2));
    }

    #[test]
    fn test_reference_center() {
        let grid = Grid16::from_data(3, 3, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
        let out = reference_median_filter(&grid, 3);
        assert_eq!(out.get_pixel(1, 1).unwrap(), 5);
    }

    #[test]
    fn test_random_grid_is_seeded() {
        let a = random_grid(8, 8, 15, 7);
        let b = random_grid(8, 8, 15, 7);
        assert_eq!(a, b);
        assert!(a.data().iter().all(|&v| v <= 15));
    }
}
