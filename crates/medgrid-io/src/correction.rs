//! Flat-field intensity correction
//!
//! Calibrates a pair of captures taken at a low and a high exposure:
//!
//! 1. Crop the dark sensor borders ([`SENSOR_TRIM`])
//! 2. Remove impulse noise with a 3x3 median filter
//! 3. Multiply by the per-sample gain map of that exposure
//! 4. Scale so the mean of the brighter half equals the calibrated target
//!    ([`INTENSITY_LOW`] / [`INTENSITY_HIGH`])
//!
//! After correction the high/low ratio of a healthy sensor is close to
//! [`INTENSITY_RATIO_HIGH_OVER_LOW`].

use crate::IoResult;
use crate::gainmap::read_gain_csv_file;
use crate::raw::{RawSpec, read_raw_file};
use log::info;
use medgrid_core::{Error, Grid16, GridF32, Trim};
use medgrid_filter::{MedianFilterOptions, median_filter_with};
use std::path::Path;

/// Borders removed from a full 2048x2560 capture
pub const SENSOR_TRIM: Trim = Trim::new(12, 12, 450, 12);

/// Calibrated top-half intensity of a low-exposure capture
pub const INTENSITY_LOW: f64 = 15260.0;

/// Calibrated top-half intensity of a high-exposure capture
pub const INTENSITY_HIGH: f64 = 25726.0;

/// Expected high/low intensity ratio
pub const INTENSITY_RATIO_HIGH_OVER_LOW: f64 = 1.6858;

/// Default gain map file of the low exposure
pub const GAIN_FILE_LOW: &str = "correction_low.csv";

/// Default gain map file of the high exposure
pub const GAIN_FILE_HIGH: &str = "correction_high.csv";

/// Exposure level of a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Low,
    High,
}

impl Exposure {
    /// Calibrated top-half intensity for this exposure
    pub fn target_intensity(self) -> f64 {
        match self {
            Exposure::Low => INTENSITY_LOW,
            Exposure::High => INTENSITY_HIGH,
        }
    }
}

/// Correction of one exposure
#[derive(Debug, Clone)]
pub struct IntensityCorrection {
    /// Margins cropped before filtering
    pub trim: Trim,
    /// Median denoise applied to the cropped capture
    pub denoise: MedianFilterOptions,
    /// Per-sample gains, sized like the cropped capture
    pub gains: GridF32,
    /// Top-half mean of the corrected output
    pub target: f64,
}

impl IntensityCorrection {
    /// Correction with the sensor trim and a 3x3 denoise
    pub fn new(gains: GridF32, target: f64) -> Self {
        Self {
            trim: SENSOR_TRIM,
            denoise: MedianFilterOptions::default(),
            gains,
            target,
        }
    }

    /// Correction targeting the calibrated intensity of `exposure`
    pub fn for_exposure(gains: GridF32, exposure: Exposure) -> Self {
        Self::new(gains, exposure.target_intensity())
    }

    /// Crop different margins
    pub fn with_trim(mut self, trim: Trim) -> Self {
        self.trim = trim;
        self
    }

    /// Use different median filter options
    pub fn with_denoise(mut self, denoise: MedianFilterOptions) -> Self {
        self.denoise = denoise;
        self
    }

    /// Crop, denoise, apply gains and normalize one capture.
    ///
    /// # Errors
    ///
    /// Returns `IoError::Core` if the trim leaves nothing, if the gain map
    /// does not match the cropped size, or if the flattened capture has no
    /// positive top-half mean. Filter failures are returned as
    /// `IoError::Filter`.
    pub fn apply(&self, raw: &Grid16) -> IoResult<GridF32> {
        let cropped = raw.crop(&self.trim)?;
        let denoised = median_filter_with(&cropped, &self.denoise)?;
        let mut flat = GridF32::from_grid(&denoised).mul(&self.gains)?;
        normalize_top_half(&mut flat, self.target)?;
        Ok(flat)
    }
}

/// Scale `grid` so its top-half mean becomes `target`.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` when the top-half mean is not a
/// positive finite number; the grid is left unchanged.
pub fn normalize_top_half(grid: &mut GridF32, target: f64) -> Result<(), Error> {
    let mean = grid.mean_of_top_half();
    if !(mean.is_finite() && mean > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "cannot normalize: top-half mean is {}",
            mean
        )));
    }
    grid.mul_constant(target / mean);
    Ok(())
}

/// Corrections for a low/high exposure pair
#[derive(Debug, Clone)]
pub struct PairCorrection {
    pub low: IntensityCorrection,
    pub high: IntensityCorrection,
}

/// Corrected pair with its measured intensities
#[derive(Debug, Clone)]
pub struct CorrectedPair {
    pub low: GridF32,
    pub high: GridF32,
    /// Top-half mean of the corrected low capture
    pub mean_low: f64,
    /// Top-half mean of the corrected high capture
    pub mean_high: f64,
}

impl CorrectedPair {
    /// High over low intensity, or 0 when the low mean is 0
    pub fn ratio(&self) -> f64 {
        if self.mean_low != 0.0 {
            self.mean_high / self.mean_low
        } else {
            0.0
        }
    }

    /// Relative deviation of [`Self::ratio`] from the calibrated ratio
    pub fn ratio_deviation(&self) -> f64 {
        self.ratio() / INTENSITY_RATIO_HIGH_OVER_LOW - 1.0
    }
}

impl PairCorrection {
    /// Pair the two exposures' gain maps with their calibrated targets
    pub fn new(gains_low: GridF32, gains_high: GridF32) -> Self {
        Self {
            low: IntensityCorrection::for_exposure(gains_low, Exposure::Low),
            high: IntensityCorrection::for_exposure(gains_high, Exposure::High),
        }
    }

    /// Load both gain maps from CSV files
    pub fn from_csv_files(low: impl AsRef<Path>, high: impl AsRef<Path>) -> IoResult<Self> {
        Ok(Self::new(
            read_gain_csv_file(low)?,
            read_gain_csv_file(high)?,
        ))
    }

    /// Load [`GAIN_FILE_LOW`] and [`GAIN_FILE_HIGH`] from `dir`
    pub fn from_calibration_dir(dir: impl AsRef<Path>) -> IoResult<Self> {
        let dir = dir.as_ref();
        Self::from_csv_files(dir.join(GAIN_FILE_LOW), dir.join(GAIN_FILE_HIGH))
    }

    /// Correct both captures; the two exposures run concurrently.
    pub fn apply(&self, low: &Grid16, high: &Grid16) -> IoResult<CorrectedPair> {
        let (low, high) = rayon::join(|| self.low.apply(low), || self.high.apply(high));
        let (low, high) = (low?, high?);

        let pair = CorrectedPair {
            mean_low: low.mean_of_top_half(),
            mean_high: high.mean_of_top_half(),
            low,
            high,
        };
        info!(
            "mean low = {}, mean high = {}, ratio H/L = {}",
            pair.mean_low,
            pair.mean_high,
            pair.ratio()
        );
        Ok(pair)
    }

    /// Decode two raw captures and correct them
    pub fn apply_raw_files(
        &self,
        low: impl AsRef<Path>,
        high: impl AsRef<Path>,
        raw: &RawSpec,
    ) -> IoResult<CorrectedPair> {
        let low = read_raw_file(low, raw)?;
        let high = read_raw_file(high, raw)?;
        self.apply(&low, &high)
    }
}
