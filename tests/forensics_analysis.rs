// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Error-level analysis through the `image`-backed codec.

use pixseal_core::{analyze, forensics_analyze, ElaParams, FileCodec, ImageCodec, RasterImage, RiskLevel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ALLOWED_SCORES: [u8; 3] = [96, 72, 45];

fn noise_raster(width: usize, height: usize, channels: usize, seed: u64) -> RasterImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut samples = vec![0u8; width * height * channels];
    rng.fill(&mut samples[..]);
    RasterImage::from_samples(width, height, channels, samples).unwrap()
}

/// Smooth diagonal gradient, which JPEG reproduces closely.
fn gradient_raster(width: usize, height: usize) -> RasterImage {
    let mut raster = RasterImage::filled(width, height, 3, 0).unwrap();
    for row in 0..height {
        for col in 0..width {
            let v = ((row + col) * 255 / (width + height - 2)) as u8;
            raster.set(row, col, 0, v);
            raster.set(row, col, 1, v);
            raster.set(row, col, 2, v);
        }
    }
    raster
}

#[test]
fn report_shape_and_consistency() {
    let params = ElaParams::default();
    for raster in [noise_raster(48, 32, 3, 11), gradient_raster(48, 32)] {
        let report = analyze(&FileCodec, &raster, &params).unwrap();
        assert_eq!(report.heatmap.dimensions(), raster.dimensions());
        assert_eq!(report.heatmap.channels(), raster.channels());
        assert!((0.0..=255.0).contains(&report.anomaly_intensity));
        assert!(ALLOWED_SCORES.contains(&report.score));
        assert_eq!(params.classify(report.anomaly_intensity), (report.risk_level, report.score));
    }
}

#[test]
fn noise_scores_worse_than_gradient() {
    let params = ElaParams::default();
    let noisy = analyze(&FileCodec, &noise_raster(64, 64, 3, 12), &params).unwrap();
    let smooth = analyze(&FileCodec, &gradient_raster(64, 64), &params).unwrap();
    assert!(noisy.anomaly_intensity > smooth.anomaly_intensity);
    assert_eq!(noisy.risk_level, RiskLevel::High);
}

#[test]
fn alpha_channel_preserved_in_heatmap() {
    let raster = noise_raster(16, 16, 4, 13);
    let report = analyze(&FileCodec, &raster, &ElaParams::default()).unwrap();
    assert_eq!(report.heatmap.channels(), 4);
    assert_eq!(report.heatmap.channel_plane(3), raster.channel_plane(3));
}

#[test]
fn file_pipeline_writes_preview() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("ela.png");
    FileCodec.encode(&noise_raster(40, 24, 3, 14), &input).unwrap();

    let result = forensics_analyze(&FileCodec, &input, &output, &ElaParams::default()).unwrap();
    assert!(result.success);
    assert_eq!(result.preview_path, output);
    assert!(ALLOWED_SCORES.contains(&result.score));

    let preview = FileCodec.decode(&output).unwrap();
    assert_eq!(preview.dimensions(), (40, 24));
}

#[test]
fn unreadable_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ela.png");
    let err = forensics_analyze(&FileCodec, &dir.path().join("absent.png"), &output, &ElaParams::default());
    assert!(err.is_err());
    assert!(!output.exists());
}
