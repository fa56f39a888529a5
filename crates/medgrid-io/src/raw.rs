//! Raw capture format
//!
//! A raw capture is a headerless stream of `width * height` unsigned 16-bit
//! samples in row-major order. The byte order is not recorded in the file
//! and must be supplied by the caller; little-endian is the norm for the
//! sensors this targets.

use crate::{IoError, IoResult};
use medgrid_core::Grid16;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default capture width in samples
pub const DEFAULT_RAW_WIDTH: u32 = 2048;

/// Default capture height in samples
pub const DEFAULT_RAW_HEIGHT: u32 = 2560;

/// Byte order of 16-bit samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    #[inline]
    fn decode(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    fn encode(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

/// Declared layout of a raw capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSpec {
    /// Width in samples
    pub width: u32,
    /// Height in samples
    pub height: u32,
    /// Sample byte order
    pub byte_order: ByteOrder,
}

impl Default for RawSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_RAW_WIDTH,
            height: DEFAULT_RAW_HEIGHT,
            byte_order: ByteOrder::Little,
        }
    }
}

impl RawSpec {
    /// Little-endian layout with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            byte_order: ByteOrder::Little,
        }
    }

    /// Use the given byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Exact file size in bytes
    pub fn byte_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 2
    }
}

/// Decode a raw capture from a reader.
///
/// # Errors
///
/// Returns `IoError::SizeMismatch` unless the stream holds exactly
/// `width * height * 2` bytes, and `IoError::Core` for zero dimensions.
pub fn read_raw<R: Read>(reader: R, spec: &RawSpec) -> IoResult<Grid16> {
    let expected = spec.byte_len();
    let mut buf = Vec::with_capacity(expected);
    // Read one byte past the expected size so oversized files are caught
    reader.take(expected as u64 + 1).read_to_end(&mut buf)?;
    if buf.len() != expected {
        return Err(IoError::SizeMismatch {
            expected,
            actual: buf.len(),
        });
    }

    let data = buf
        .chunks_exact(2)
        .map(|b| spec.byte_order.decode([b[0], b[1]]))
        .collect();

    Ok(Grid16::from_data(spec.width, spec.height, data)?)
}

/// Decode a raw capture file.
///
/// The file length is checked before reading so a wrong size reports the
/// real byte count.
pub fn read_raw_file(path: impl AsRef<Path>, spec: &RawSpec) -> IoResult<Grid16> {
    let file = File::open(path.as_ref())?;
    let actual = file.metadata()?.len() as usize;
    if actual != spec.byte_len() {
        return Err(IoError::SizeMismatch {
            expected: spec.byte_len(),
            actual,
        });
    }
    read_raw(BufReader::new(file), spec)
}

/// Encode a grid as raw samples.
pub fn write_raw<W: Write>(grid: &Grid16, mut writer: W, byte_order: ByteOrder) -> IoResult<()> {
    for &v in grid.data() {
        writer.write_all(&byte_order.encode(v))?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode a grid to a raw file.
pub fn write_raw_file(
    grid: &Grid16,
    path: impl AsRef<Path>,
    byte_order: ByteOrder,
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_raw(grid, BufWriter::new(file), byte_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_raw_little_endian() {
        let bytes = [0x01, 0x00, 0x00, 0x01, 0xff, 0xff, 0x34, 0x12];
        let grid = read_raw(&bytes[..], &RawSpec::new(2, 2)).unwrap();
        assert_eq!(grid.data(), &[1, 256, 65535, 0x1234]);
    }

    #[test]
    fn test_read_raw_big_endian() {
        let bytes = [0x12, 0x34, 0x00, 0x01];
        let spec = RawSpec::new(2, 1).with_byte_order(ByteOrder::Big);
        let grid = read_raw(&bytes[..], &spec).unwrap();
        assert_eq!(grid.data(), &[0x1234, 1]);
    }

    #[test]
    fn test_read_raw_size_mismatch() {
        let short = [0u8; 6];
        assert!(matches!(
            read_raw(&short[..], &RawSpec::new(2, 2)),
            Err(IoError::SizeMismatch {
                expected: 8,
                actual: 6
            })
        ));

        let long = [0u8; 12];
        assert!(matches!(
            read_raw(&long[..], &RawSpec::new(2, 2)),
            Err(IoError::SizeMismatch {
                expected: 8,
                actual: 9
            })
        ));
    }

    #[test]
    fn test_read_raw_zero_dimensions() {
        assert!(matches!(
            read_raw(&[][..], &RawSpec::new(0, 4)),
            Err(IoError::Core(_))
        ));
    }

    #[test]
    fn test_write_raw_big_endian() {
        let grid = Grid16::from_data(2, 1, vec![0x1234, 0xabcd]).unwrap();
        let mut out = Vec::new();
        write_raw(&grid, &mut out, ByteOrder::Big).unwrap();
        assert_eq!(out, vec![0x12, 0x34, 0xab, 0xcd]);
    }

    #[test]
    fn test_default_spec() {
        let spec = RawSpec::default();
        assert_eq!((spec.width, spec.height), (2048, 2560));
        assert_eq!(spec.byte_order, ByteOrder::Little);
        assert_eq!(spec.byte_len(), 2048 * 2560 * 2);
    }
}
