//! Raw capture conversion
//!
//! A [`RawPipeline`] decodes a raw capture, optionally trims its margins and
//! applies a median denoise, then exports the result as PNG. Directories of
//! captures are converted in parallel; a file that fails is recorded in the
//! [`BatchReport`] and does not stop the rest of the batch.

use crate::png::{PngDepth, write_png_file};
use crate::raw::{RawSpec, read_raw_file};
use crate::{IoError, IoResult};
use log::{info, warn};
use medgrid_core::{Grid16, Trim};
use medgrid_filter::{MedianFilterOptions, median_filter_with};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const RAW_EXTENSION: &str = "raw";

/// Decode, process and export settings for raw captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPipeline {
    /// Layout of the input captures
    pub raw: RawSpec,
    /// Margins removed after decoding
    pub trim: Option<Trim>,
    /// Median denoise applied after trimming
    pub denoise: Option<MedianFilterOptions>,
    /// Sample depth of the exported PNG
    pub depth: PngDepth,
}

impl Default for RawPipeline {
    fn default() -> Self {
        Self::new(RawSpec::default())
    }
}

impl RawPipeline {
    /// Plain conversion: no trim, no denoise, 16-bit output
    pub fn new(raw: RawSpec) -> Self {
        Self {
            raw,
            trim: None,
            denoise: None,
            depth: PngDepth::Sixteen,
        }
    }

    /// Set the PNG sample depth
    pub fn with_depth(mut self, depth: PngDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Crop the given margins before filtering
    pub fn with_trim(mut self, trim: Trim) -> Self {
        self.trim = Some(trim);
        self
    }

    /// Median filter the capture before export
    pub fn with_denoise(mut self, options: MedianFilterOptions) -> Self {
        self.denoise = Some(options);
        self
    }

    /// Apply trim and denoise to a decoded capture.
    pub fn process(&self, grid: Grid16) -> IoResult<Grid16> {
        let grid = match &self.trim {
            Some(trim) => grid.crop(trim)?,
            None => grid,
        };
        match &self.denoise {
            Some(options) => Ok(median_filter_with(&grid, options)?),
            None => Ok(grid),
        }
    }

    /// Decode `input`, process it and return the result.
    pub fn load(&self, input: impl AsRef<Path>) -> IoResult<Grid16> {
        let grid = read_raw_file(input, &self.raw)?;
        self.process(grid)
    }
}

/// Outcome of a directory conversion
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written PNG paths, in input order
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Convert one raw capture to a PNG file.
pub fn convert_raw_to_png(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    pipeline: &RawPipeline,
) -> IoResult<()> {
    let grid = pipeline.load(input)?;
    write_png_file(&grid, output, pipeline.depth)
}

/// Convert every `*.raw` file in `input_dir` to PNG.
///
/// Each `name.raw` becomes `name.png` in `output_dir`, which defaults to
/// `input_dir` and is created when missing. Files are processed in
/// parallel; per-file failures are collected in the report.
///
/// # Errors
///
/// Returns `IoError::NotADirectory` if `input_dir` is not a directory, and
/// `IoError::Io` if it cannot be listed or the output directory cannot be
/// created.
pub fn convert_raw_dir(
    input_dir: impl AsRef<Path>,
    output_dir: Option<&Path>,
    pipeline: &RawPipeline,
) -> IoResult<BatchReport> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(IoError::NotADirectory(input_dir.to_path_buf()));
    }
    let output_dir = output_dir.unwrap_or(input_dir);
    fs::create_dir_all(output_dir)?;

    let inputs = list_raw_files(input_dir)?;
    info!(
        "converting {} raw files from {}",
        inputs.len(),
        input_dir.display()
    );

    let results: Vec<(PathBuf, IoResult<PathBuf>)> = inputs
        .into_par_iter()
        .map(|input| {
            let output = output_path(&input, output_dir);
            let result = convert_raw_to_png(&input, &output, pipeline).map(|()| output);
            (input, result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(output) => {
                info!("{} -> {}", input.display(), output.display());
                report.converted.push(output);
            }
            Err(e) => {
                warn!("failed to convert {}: {}", input.display(), e);
                report.failed.push((input, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Sorted list of regular files with a `.raw` extension (case-insensitive).
fn list_raw_files(dir: &Path) -> IoResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_raw = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(RAW_EXTENSION));
        if is_raw && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `dir/name.raw` -> `output_dir/name.png`; dots inside `name` are kept.
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".png");
    output_dir.join(name)
}
