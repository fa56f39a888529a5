//! PNG export
//!
//! Grids are written as single-channel grayscale PNGs, either keeping the
//! full 16-bit samples or stretched linearly into 8 bits for viewing.

use crate::{IoError, IoResult};
use ::png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use medgrid_core::Grid16;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Sample depth of a written PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngDepth {
    /// Keep the original 16-bit samples
    #[default]
    Sixteen,
    /// Rescale `[min, max]` of the grid to `[0, 255]`
    Eight,
}

/// Read a grayscale PNG (8 or 16 bits per sample) into a grid.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid16> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if color_type != ColorType::Grayscale
        || !matches!(bit_depth, BitDepth::Eight | BitDepth::Sixteen)
    {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG format: {:?} {:?}",
            color_type, bit_depth
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let mut data = Vec::with_capacity((width as usize) * (height as usize));

    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..(y + 1) * bytes_per_row];
        match bit_depth {
            BitDepth::Sixteen => data.extend(
                row.chunks_exact(2)
                    .take(width as usize)
                    .map(|b| u16::from_be_bytes([b[0], b[1]])),
            ),
            _ => data.extend(row.iter().take(width as usize).map(|&b| b as u16)),
        }
    }

    Ok(Grid16::from_data(width, height, data)?)
}

/// Read a grayscale PNG file.
pub fn read_png_file(path: impl AsRef<Path>) -> IoResult<Grid16> {
    let file = File::open(path.as_ref())?;
    read_png(BufReader::new(file))
}

/// Write a grid as a grayscale PNG.
pub fn write_png<W: Write>(grid: &Grid16, writer: W, depth: PngDepth) -> IoResult<()> {
    let (width, height) = grid.dimensions();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(match depth {
        PngDepth::Sixteen => BitDepth::Sixteen,
        PngDepth::Eight => BitDepth::Eight,
    });

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data: Vec<u8> = match depth {
        PngDepth::Sixteen => grid.data().iter().flat_map(|v| v.to_be_bytes()).collect(),
        PngDepth::Eight => scale_to_8bit(grid),
    };

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

/// Write a grid to a PNG file.
pub fn write_png_file(grid: &Grid16, path: impl AsRef<Path>, depth: PngDepth) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_png(grid, BufWriter::new(file), depth)
}

/// Linear stretch of `[min, max]` to `[0, 255]`, truncating.
///
/// A constant grid maps to all zeros.
fn scale_to_8bit(grid: &Grid16) -> Vec<u8> {
    let min = grid.min_value();
    let max = grid.max_value();
    if max == min {
        return vec![0; grid.len()];
    }

    let scale = 255.0 / (max - min) as f32;
    grid.data()
        .iter()
        .map(|&v| (((v - min) as f32 * scale).clamp(0.0, 255.0)) as u8)
        .collect()
}
