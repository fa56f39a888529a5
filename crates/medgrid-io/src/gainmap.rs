//! Flat-field gain maps
//!
//! A gain map is a text table of per-sample `f32` multipliers, one grid row
//! per line with values separated by commas. Blank lines and lines starting
//! with `#` are skipped. Every row must have the same number of values.

use crate::{IoError, IoResult};
use medgrid_core::GridF32;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a comma-separated gain map.
///
/// # Errors
///
/// Returns `IoError::DecodeError` for unparsable values, ragged rows or an
/// empty table.
pub fn read_gain_csv<R: BufRead>(reader: R) -> IoResult<GridF32> {
    let mut width = 0usize;
    let mut height = 0u32;
    let mut data = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let before = data.len();
        for field in trimmed.split(',') {
            let value = field.trim().parse::<f32>().map_err(|e| {
                IoError::DecodeError(format!(
                    "gain map line {}: invalid value '{}': {}",
                    lineno + 1,
                    field.trim(),
                    e
                ))
            })?;
            data.push(value);
        }

        let ncols = data.len() - before;
        if height == 0 {
            width = ncols;
        } else if ncols != width {
            return Err(IoError::DecodeError(format!(
                "gain map line {}: expected {} values, got {}",
                lineno + 1,
                width,
                ncols
            )));
        }
        height += 1;
    }

    if height == 0 {
        return Err(IoError::DecodeError("gain map has no rows".to_string()));
    }
    let width = u32::try_from(width)
        .map_err(|_| IoError::DecodeError(format!("gain map too wide: {} columns", width)))?;

    Ok(GridF32::from_data(width, height, data)?)
}

/// Read a gain map file.
pub fn read_gain_csv_file(path: impl AsRef<Path>) -> IoResult<GridF32> {
    let file = File::open(path.as_ref())?;
    read_gain_csv(BufReader::new(file))
}

/// Write a gain map, one row per line.
pub fn write_gain_csv<W: Write>(gains: &GridF32, writer: W) -> IoResult<()> {
    let mut writer = BufWriter::new(writer);
    for row in gains.data().chunks_exact(gains.width() as usize) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_gain_csv() {
        let text = "# gains\n1.0, 0.5,2\n\n 1e-1,3,4.25 \n";
        let gains = read_gain_csv(text.as_bytes()).unwrap();
        assert_eq!(gains.dimensions(), (3, 2));
        assert_eq!(gains.data(), &[1.0, 0.5, 2.0, 0.1, 3.0, 4.25]);
    }

    #[test]
    fn test_read_gain_csv_ragged() {
        let result = read_gain_csv("1,2,3\n4,5\n".as_bytes());
        assert!(matches!(result, Err(IoError::DecodeError(msg)) if msg.contains("line 2")));
    }

    #[test]
    fn test_read_gain_csv_bad_value() {
        assert!(matches!(
            read_gain_csv("1,x\n".as_bytes()),
            Err(IoError::DecodeError(_))
        ));
        assert!(matches!(
            read_gain_csv("# only a comment\n".as_bytes()),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let gains = GridF32::from_data(2, 2, vec![0.75, 1.0, 1.125, 2.5]).unwrap();
        let mut out = Vec::new();
        write_gain_csv(&gains, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "0.75,1\n1.125,2.5\n");
        assert_eq!(read_gain_csv(&out[..]).unwrap(), gains);
    }
}
