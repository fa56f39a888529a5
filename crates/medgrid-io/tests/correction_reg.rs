//! Intensity correction regression test
//!
//! Runs the low/high exposure correction from files on disk:
//!   (1) gain maps loaded from a calibration directory
//!   (2) corrected output checked against an independent computation
//!       built on the brute-force median oracle
//!   (3) corrected intensities and their ratio match the calibration

use medgrid_core::{GridF32, Trim};
use medgrid_io::{
    ByteOrder, GAIN_FILE_HIGH, GAIN_FILE_LOW, INTENSITY_HIGH, INTENSITY_LOW, PairCorrection,
    RawSpec, write_gain_csv, write_raw_file,
};
use medgrid_test::{RegParams, random_grid, reference_median_filter};
use std::fs::{self, File};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("medgrid_corr_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn gain_map(width: u32, height: u32, tilt: f32) -> GridF32 {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| 1.0 + tilt * (x + y) as f32))
        .collect();
    GridF32::from_data(width, height, data).expect("gain map")
}

#[test]
fn correction_reg_pair_from_files() {
    let mut rp = RegParams::new("correction_pair");
    let dir = scratch_dir("pair");

    let (w, h) = (30u32, 24u32);
    let trim = Trim::new(2, 3, 5, 1);
    let (cw, ch) = (w - 3 - 5, h - 2 - 1);

    let gains_low = gain_map(cw, ch, 0.01);
    let gains_high = gain_map(cw, ch, 0.02);
    write_gain_csv(&gains_low, File::create(dir.join(GAIN_FILE_LOW)).unwrap()).unwrap();
    write_gain_csv(&gains_high, File::create(dir.join(GAIN_FILE_HIGH)).unwrap()).unwrap();

    let low = random_grid(w, h, 9000, 41);
    let high = random_grid(w, h, 15000, 42);
    write_raw_file(&low, dir.join("low.raw"), ByteOrder::Little).unwrap();
    write_raw_file(&high, dir.join("high.raw"), ByteOrder::Little).unwrap();

    let mut pair = PairCorrection::from_calibration_dir(&dir).expect("load gain maps");
    // Gain values survive the CSV text form exactly
    rp.compare_values(1.0, (pair.low.gains == gains_low) as u8 as f64, 0.0);
    rp.compare_values(1.0, (pair.high.gains == gains_high) as u8 as f64, 0.0);
    pair.low.trim = trim;
    pair.high.trim = trim;

    let out = pair
        .apply_raw_files(dir.join("low.raw"), dir.join("high.raw"), &RawSpec::new(w, h))
        .expect("correct pair");

    // Independent: crop, oracle median, gains, normalize by top-half mean
    let denoised = reference_median_filter(&low.crop(&trim).unwrap(), 3);
    let flat = GridF32::from_grid(&denoised).mul(&gains_low).unwrap();
    let scale = INTENSITY_LOW / flat.mean_of_top_half();
    for (i, (&f, &o)) in flat.data().iter().zip(out.low.data()).enumerate() {
        if !rp.compare_values(f as f64 * scale, o as f64, 0.01) {
            eprintln!("  sample {}", i);
            break;
        }
    }

    rp.compare_values(INTENSITY_LOW, out.mean_low, 0.05);
    rp.compare_values(INTENSITY_HIGH, out.mean_high, 0.05);
    rp.compare_values(INTENSITY_HIGH / INTENSITY_LOW, out.ratio(), 1e-5);
    rp.compare_values(0.0, out.ratio_deviation(), 1e-4);

    let _ = fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "correction_pair regression test failed");
}

#[test]
fn correction_reg_missing_gain_map() {
    let dir = scratch_dir("missing");
    assert!(PairCorrection::from_calibration_dir(&dir).is_err());
    let _ = fs::remove_dir_all(&dir);
}
