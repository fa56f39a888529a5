//! Raw capture I/O regression test
//!
//! Tests the capture conversion path:
//!   (1) raw write / read in both byte orders
//!   (2) raw -> PNG conversion with a median denoise step
//!   (3) directory conversion with mixed valid and invalid captures

use medgrid_core::{Grid16, Trim};
use medgrid_filter::{MedianFilterOptions, median_filter};
use medgrid_io::{
    ByteOrder, IoError, PngDepth, RawPipeline, RawSpec, convert_raw_dir, convert_raw_to_png,
    read_png_file, read_raw, read_raw_file, write_raw, write_raw_file,
};
use medgrid_test::{RegParams, random_grid};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("medgrid_rawio_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn rawio_reg_byte_order() {
    let mut rp = RegParams::new("rawio_byte_order");

    let grid = random_grid(33, 17, u16::MAX, 3);
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let mut bytes = Vec::new();
        write_raw(&grid, &mut bytes, order).expect("write_raw");
        rp.compare_values(33.0 * 17.0 * 2.0, bytes.len() as f64, 0.0);

        let spec = RawSpec::new(33, 17).with_byte_order(order);
        let back = read_raw(&bytes[..], &spec).expect("read_raw");
        rp.compare_grid(&grid, &back);
    }

    // Reading with the wrong byte order swaps every sample
    let mut bytes = Vec::new();
    write_raw(&grid, &mut bytes, ByteOrder::Little).expect("write_raw");
    let swapped = read_raw(&bytes[..], &RawSpec::new(33, 17).with_byte_order(ByteOrder::Big))
        .expect("read_raw big");
    rp.compare_values(
        grid.get_pixel(5, 5).unwrap().swap_bytes() as f64,
        swapped.get_pixel(5, 5).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "rawio_byte_order regression test failed");
}

#[test]
fn rawio_reg_denoise_to_png() {
    let mut rp = RegParams::new("rawio_denoise");
    let dir = scratch_dir("denoise");

    let grid = random_grid(24, 20, 4095, 8);
    let raw_path = dir.join("frame.raw");
    write_raw_file(&grid, &raw_path, ByteOrder::Little).expect("write_raw_file");

    let spec = RawSpec::new(24, 20);
    let decoded = read_raw_file(&raw_path, &spec).expect("read_raw_file");
    rp.compare_grid(&grid, &decoded);

    let pipeline = RawPipeline::new(spec)
        .with_trim(Trim::uniform(2))
        .with_denoise(MedianFilterOptions::with_ksize(3));
    let png_path = dir.join("frame.png");
    convert_raw_to_png(&raw_path, &png_path, &pipeline).expect("convert_raw_to_png");

    let expected = median_filter(&grid.crop(&Trim::uniform(2)).unwrap(), 3).unwrap();
    let written = read_png_file(&png_path).expect("read_png_file");
    rp.compare_grid(&expected, &written);

    // Wrong declared size is reported, not silently truncated
    let result = read_raw_file(&raw_path, &RawSpec::new(24, 21));
    assert!(matches!(
        result,
        Err(IoError::SizeMismatch {
            expected: 1008,
            actual: 960
        })
    ));

    let _ = fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "rawio_denoise regression test failed");
}

#[test]
fn rawio_reg_batch() {
    let mut rp = RegParams::new("rawio_batch");
    let dir = scratch_dir("batch");

    let spec = RawSpec::new(16, 8);
    let grids: Vec<Grid16> = (0..4).map(|i| random_grid(16, 8, 60000, 100 + i)).collect();
    for (i, grid) in grids.iter().enumerate() {
        write_raw_file(grid, dir.join(format!("cap_{}.raw", i)), ByteOrder::Little)
            .expect("write capture");
    }
    fs::write(dir.join("cap_broken.raw"), vec![0u8; 100]).expect("write broken capture");

    let pipeline = RawPipeline::new(spec).with_depth(PngDepth::Sixteen);
    let report = convert_raw_dir(&dir, None, &pipeline).expect("convert_raw_dir");

    rp.compare_values(4.0, report.converted.len() as f64, 0.0);
    rp.compare_values(1.0, report.failed.len() as f64, 0.0);
    for (i, grid) in grids.iter().enumerate() {
        let png = read_png_file(dir.join(format!("cap_{}.png", i))).expect("read converted");
        rp.compare_grid(grid, &png);
    }

    let eight = RawPipeline::new(spec).with_depth(PngDepth::Eight);
    let out_dir = dir.join("preview");
    let report = convert_raw_dir(&dir, Some(&out_dir), &eight).expect("8-bit batch");
    rp.compare_values(4.0, report.converted.len() as f64, 0.0);
    let preview = read_png_file(out_dir.join("cap_0.png")).expect("read preview");
    rp.compare_values(255.0, preview.max_value() as f64, 0.0);
    rp.compare_values(0.0, preview.min_value() as f64, 0.0);

    let _ = fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "rawio_batch regression test failed");
}
