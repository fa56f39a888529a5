//! Border trimming
//!
//! Raw sensor captures carry dark borders that must be removed before
//! filtering. [`Grid16::crop`] removes the margins described by a [`Trim`],
//! and [`Grid16::uncrop`] places a processed interior back into a grid of
//! the original size.

use super::Grid16;
use crate::error::{Error, Result};

/// Margins to remove from each side of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trim {
    /// Rows removed from the top
    pub top: u32,
    /// Columns removed from the left
    pub left: u32,
    /// Columns removed from the right
    pub right: u32,
    /// Rows removed from the bottom
    pub bottom: u32,
}

impl Trim {
    /// Create a trim with per-side margins.
    pub const fn new(top: u32, left: u32, right: u32, bottom: u32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Create a trim with the same margin on every side.
    pub const fn uniform(npix: u32) -> Self {
        Self::new(npix, npix, npix, npix)
    }

    /// Dimensions left after trimming a `width x height` grid, if any.
    fn inner_dimensions(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let w = width.checked_sub(self.left)?.checked_sub(self.right)?;
        let h = height.checked_sub(self.top)?.checked_sub(self.bottom)?;
        (w > 0 && h > 0).then_some((w, h))
    }
}

impl Grid16 {
    /// Remove the margins described by `trim`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the margins leave no samples.
    pub fn crop(&self, trim: &Trim) -> Result<Grid16> {
        let (w, h) = trim
            .inner_dimensions(self.width, self.height)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "trim {:?} leaves no samples in {}x{} grid",
                    trim, self.width, self.height
                ))
            })?;

        let mut data = Vec::with_capacity((w as usize) * (h as usize));
        for y in trim.top..trim.top + h {
            let row = self.row(y);
            data.extend_from_slice(&row[trim.left as usize..(trim.left + w) as usize]);
        }

        Grid16::from_data(w, h, data)
    }

    /// Embed this grid inside margins filled with `border_value`.
    ///
    /// Inverse of [`Grid16::crop`] for the interior samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the enlarged size overflows.
    pub fn uncrop(&self, trim: &Trim, border_value: u16) -> Result<Grid16> {
        let overflow = || Error::InvalidParameter(format!("uncrop {:?} overflows", trim));
        let w = self
            .width
            .checked_add(trim.left)
            .and_then(|v| v.checked_add(trim.right))
            .ok_or_else(overflow)?;
        let h = self
            .height
            .checked_add(trim.top)
            .and_then(|v| v.checked_add(trim.bottom))
            .ok_or_else(overflow)?;

        let mut out = Grid16::new_with_value(w, h, border_value)?;
        for y in 0..self.height {
            let left = trim.left as usize;
            out.row_mut(y + trim.top)[left..left + self.width as usize]
                .copy_from_slice(self.row(y));
        }

        Ok(out)
    }
}
