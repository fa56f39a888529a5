//! Grid16 - 16-bit sensor grid
//!
//! `Grid16` is a 2D array of `u16` samples, the in-memory form of a raw
//! sensor capture. Filters take a `&Grid16` and return a new grid of the
//! same dimensions.
//!
//! See [`crop`] for border trimming and [`statistics`] for summary values.
//!
//! # Examples
//!
//! ```
//! use medgrid_core::Grid16;
//!
//! // Create a 100x100 grid
//! let mut grid = Grid16::new(100, 100).unwrap();
//!
//! // Set and get sample values
//! grid.set_pixel(10, 20, 4095).unwrap();
//! assert_eq!(grid.get_pixel(10, 20).unwrap(), 4095);
//! ```

pub mod compare;
pub mod crop;
pub mod statistics;

pub use compare::GridDiff;
pub use crop::Trim;

use crate::error::{Error, Result};

/// Grid of unsigned 16-bit samples
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid16 {
    /// Width in samples
    width: u32,
    /// Height in samples
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<u16>,
}

impl Grid16 {
    /// Create a new grid with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use medgrid_core::Grid16;
    ///
    /// let grid = Grid16::new(2048, 2560).unwrap();
    /// assert_eq!(grid.width(), 2048);
    /// assert_eq!(grid.height(), 2560);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new grid with all samples set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Grid16 {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a grid from row-major sample data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0, and
    /// `Error::DataLengthMismatch` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
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

        Ok(Grid16 {
            width,
            height,
            data,
        })
    }

    /// Build from parts another in-crate grid has already validated.
    pub(crate) fn from_validated(width: u32, height: u32, data: Vec<u16>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Grid16 {
            width,
            height,
            data,
        }
    }

    /// Get the grid width in samples
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height in samples
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the grid dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a grid holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u16> {
        let idx = self.checked_index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u16) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u16 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the sample value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: u16) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Consume the grid and return its row-major samples
    #[inline]
    pub fn into_data(self) -> Vec<u16> {
        self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u16] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u16] {
        let start = (y as usize) * (self.width as usize);
        let end = start + (self.width as usize);
        &mut self.data[start..end]
    }

    /// Set all samples to the specified value
    pub fn set_all(&mut self, value: u16) {
        self.data.fill(value);
    }

    /// Clear all samples to zero
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Create a zero-filled grid with the same dimensions
    pub fn create_template(&self) -> Grid16 {
        Grid16 {
            width: self.width,
            height: self.height,
            data: vec![0; self.data.len()],
        }
    }
}
