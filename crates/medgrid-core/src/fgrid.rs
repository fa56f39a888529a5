//! GridF32 - Floating-point sensor grid
//!
//! Holds per-sample gains of a flat-field correction map and the corrected
//! intensities computed from them, where `u16` precision and range are not
//! enough.
//!
//! # Examples
//!
//! ```
//! use medgrid_core::{Grid16, GridF32};
//!
//! let raw = Grid16::from_data(2, 1, vec![100, 200]).unwrap();
//! let gains = GridF32::from_data(2, 1, vec![1.5, 0.5]).unwrap();
//!
//! let flat = GridF32::from_grid(&raw).mul(&gains).unwrap();
//! assert_eq!(flat.data(), &[150.0, 100.0]);
//! ```

use crate::error::{Error, Result};
use crate::grid::Grid16;
use crate::grid::statistics::{corners_mean, top_half_mean};

/// Grid of `f32` samples
///
/// Data is stored in row-major order with no padding, like [`Grid16`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridF32 {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl GridF32 {
    /// Create a new grid with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new grid with all samples set to `value`
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a grid from row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for zero dimensions and
    /// `Error::DataLengthMismatch` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a 16-bit grid sample by sample
    pub fn from_grid(grid: &Grid16) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            width,
            height,
            data: grid.data().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    /// Round to the nearest integer and clamp into `0..=65535`.
    ///
    /// NaN samples become 0.
    pub fn to_grid16(&self) -> Grid16 {
        let data = self
            .data
            .iter()
            .map(|&v| v.round().clamp(0.0, u16::MAX as f32) as u16)
            .collect();
        Grid16::from_validated(self.width, self.height, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a sample value
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Multiply two grids element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn mul(&self, other: &GridF32) -> Result<GridF32> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a * b)
            .collect();
        Ok(GridF32 {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Multiply all samples by a constant (in-place)
    ///
    /// The product is formed in `f64` and rounded once to `f32`.
    pub fn mul_constant(&mut self, factor: f64) {
        for v in &mut self.data {
            *v = (f64::from(*v) * factor) as f32;
        }
    }

    /// Mean of all samples.
    pub fn mean(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum::<f64>() / self.data.len() as f64
    }

    /// Mean of the samples at or above the k-th largest, `k = ceil(n / 2)`.
    ///
    /// Same definition as [`Grid16::mean_of_top_half`].
    pub fn mean_of_top_half(&self) -> f64 {
        top_half_mean(&self.data)
    }

    /// Mean over the four corner blocks.
    ///
    /// Same block layout as [`Grid16::mean_of_4_corners`].
    pub fn mean_of_4_corners(&self, corner: u32) -> Result<f64> {
        corners_mean(&self.data, self.width, self.height, corner)
    }
}
