//! medgrid-io - Raw capture I/O and image export
//!
//! Sensor captures arrive as headerless files of unsigned 16-bit samples.
//! This crate decodes them into [`Grid16`](medgrid_core::Grid16), writes
//! grids back as raw, PNG or (with the `tiff-format` feature) TIFF,
//! converts whole directories of captures in one call, and applies the
//! flat-field intensity correction to low/high exposure pairs.
//!
//! # Example
//!
//! ```ignore
//! use medgrid_io::{PngDepth, RawPipeline, RawSpec, convert_raw_dir};
//!
//! let pipeline = RawPipeline::new(RawSpec::default()).with_depth(PngDepth::Sixteen);
//! let report = convert_raw_dir("captures/", None, &pipeline)?;
//! println!("{} converted, {} failed", report.converted.len(), report.failed.len());
//! ```

pub mod batch;
pub mod correction;
mod error;
pub mod gainmap;
pub mod png;
pub mod raw;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use batch::{BatchReport, RawPipeline, convert_raw_dir, convert_raw_to_png};
pub use correction::{
    CorrectedPair, Exposure, GAIN_FILE_HIGH, GAIN_FILE_LOW, INTENSITY_HIGH, INTENSITY_LOW,
    INTENSITY_RATIO_HIGH_OVER_LOW, IntensityCorrection, PairCorrection, SENSOR_TRIM,
    normalize_top_half,
};
pub use error::{IoError, IoResult};
pub use gainmap::{read_gain_csv, read_gain_csv_file, write_gain_csv};
pub use self::png::{PngDepth, read_png, read_png_file, write_png, write_png_file};
pub use raw::{
    ByteOrder, DEFAULT_RAW_HEIGHT, DEFAULT_RAW_WIDTH, RawSpec, read_raw, read_raw_file,
    write_raw, write_raw_file,
};
#[cfg(feature = "tiff-format")]
pub use self::tiff::{read_tiff, write_tiff};
