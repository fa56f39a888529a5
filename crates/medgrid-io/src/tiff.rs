//! TIFF export
//!
//! Writes uncompressed single-page 16-bit grayscale TIFFs, the format most
//! lab tooling accepts for lossless sensor frames.

use crate::{IoError, IoResult};
use ::tiff::ColorType;
use ::tiff::decoder::{Decoder, DecodingResult};
use ::tiff::encoder::TiffEncoder;
use ::tiff::encoder::colortype::Gray16;
use medgrid_core::Grid16;
use std::io::{Read, Seek, Write};

/// Read a single-page 8- or 16-bit grayscale TIFF.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Grid16> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    if !matches!(color_type, ColorType::Gray(8) | ColorType::Gray(16)) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported TIFF color type: {:?}",
            color_type
        )));
    }

    let data = match decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?
    {
        DecodingResult::U16(data) => data,
        DecodingResult::U8(data) => data.into_iter().map(u16::from).collect(),
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format".to_string(),
            ));
        }
    };

    Ok(Grid16::from_data(width, height, data)?)
}

/// Write a grid as an uncompressed 16-bit grayscale TIFF.
pub fn write_tiff<W: Write + Seek>(grid: &Grid16, writer: W) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;
    encoder
        .write_image::<Gray16>(width, height, grid.data())
        .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
    Ok(())
}
