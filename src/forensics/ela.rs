// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Error-level analysis (ELA).
//!
//! An image is recompressed at a fixed JPEG quality and compared with itself.
//! Regions that were already compressed at that quality change little; pasted
//! or retouched regions with a different compression history change more.
//!
//! Pipeline:
//! 1. Lossy round trip through the codec at [`ElaParams::quality`]
//! 2. Per-channel absolute difference over the first three channels
//! 3. Amplify by [`ElaParams::amplification`], saturating at 255
//! 4. Fixed-point BT.601 luma reduction to one intensity plane
//! 5. Mean intensity → risk band and score
//! 6. Jet heatmap of the intensity plane blended over the original
//!
//! The thresholds and scores are fixed heuristics. They have never been
//! calibrated against labelled data and the score is not a probability.

use serde::{Deserialize, Serialize};

use crate::forensics::heatmap;
use crate::forensics::{ForensicsReport, RiskLevel};
use crate::raster::codec::ImageCodec;
use crate::raster::error::{RasterError, Result};
use crate::raster::RasterImage;

/// JPEG quality of the recompression step.
pub const DEFAULT_QUALITY: u8 = 90;

/// Difference multiplier. Raw compression error is a few levels at most.
pub const DEFAULT_AMPLIFICATION: f64 = 15.0;

/// Mean intensity at or below this is [`RiskLevel::Low`].
pub const LOW_RISK_THRESHOLD: f64 = 8.0;

/// Mean intensity at or below this (and above the low threshold) is [`RiskLevel::Medium`].
pub const MEDIUM_RISK_THRESHOLD: f64 = 15.0;

pub const LOW_RISK_SCORE: u8 = 96;
pub const MEDIUM_RISK_SCORE: u8 = 72;
pub const HIGH_RISK_SCORE: u8 = 45;

/// Weight of the original image in the preview blend.
pub const ORIGINAL_WEIGHT: f64 = 0.6;
/// Weight of the heatmap in the preview blend.
pub const HEATMAP_WEIGHT: f64 = 0.4;

// BT.601 luma in 14-bit fixed point; the weights sum to 1 << 14.
const LUMA_SHIFT: u32 = 14;
const LUMA_W0: u32 = 4899;
const LUMA_W1: u32 = 9617;
const LUMA_W2: u32 = 1868;

/// Tunables for [`analyze`]. Defaults are the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElaParams {
    pub quality: u8,
    pub amplification: f64,
    pub low_threshold: f64,
    pub medium_threshold: f64,
    pub low_score: u8,
    pub medium_score: u8,
    pub high_score: u8,
    pub original_weight: f64,
    pub heatmap_weight: f64,
}

impl Default for ElaParams {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            amplification: DEFAULT_AMPLIFICATION,
            low_threshold: LOW_RISK_THRESHOLD,
            medium_threshold: MEDIUM_RISK_THRESHOLD,
            low_score: LOW_RISK_SCORE,
            medium_score: MEDIUM_RISK_SCORE,
            high_score: HIGH_RISK_SCORE,
            original_weight: ORIGINAL_WEIGHT,
            heatmap_weight: HEATMAP_WEIGHT,
        }
    }
}

impl ElaParams {
    /// Map a mean intensity to its risk band and score.
    ///
    /// Bands are closed at the top: `≤ low` is Low, `≤ medium` is Medium,
    /// anything above is High.
    pub fn classify(&self, anomaly_intensity: f64) -> (RiskLevel, u8) {
        if anomaly_intensity <= self.low_threshold {
            (RiskLevel::Low, self.low_score)
        } else if anomaly_intensity <= self.medium_threshold {
            (RiskLevel::Medium, self.medium_score)
        } else {
            (RiskLevel::High, self.high_score)
        }
    }

    /// Check that the parameters describe a usable analysis.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if !(1..=100).contains(&self.quality) {
            return Err("quality must be in 1..=100");
        }
        if !(self.amplification.is_finite() && self.amplification > 0.0) {
            return Err("amplification must be positive");
        }
        if !(self.low_threshold.is_finite() && self.medium_threshold.is_finite())
            || self.low_threshold > self.medium_threshold
        {
            return Err("low_threshold must not exceed medium_threshold");
        }
        if [self.low_score, self.medium_score, self.high_score].iter().any(|&s| s > 100) {
            return Err("scores must be in 0..=100");
        }
        let weights_ok = |w: f64| w.is_finite() && w >= 0.0;
        if !(weights_ok(self.original_weight) && weights_ok(self.heatmap_weight)) {
            return Err("blend weights must be non-negative");
        }
        Ok(())
    }
}

/// Run error-level analysis on `raster`, using `codec` for the lossy round trip.
///
/// # Errors
/// Returns [`RasterError`] if recompression fails or returns a raster of a
/// different size.
pub fn analyze<C: ImageCodec + ?Sized>(codec: &C, raster: &RasterImage, params: &ElaParams) -> Result<ForensicsReport> {
    let recompressed = codec.recompress(raster, params.quality)?;
    analyze_recompressed(raster, &recompressed, params)
}

/// Error-level analysis on an image and an already recompressed copy of it.
///
/// # Errors
/// Returns [`RasterError::DimensionMismatch`] if the rasters differ in size.
pub fn analyze_recompressed(
    original: &RasterImage,
    recompressed: &RasterImage,
    params: &ElaParams,
) -> Result<ForensicsReport> {
    if original.dimensions() != recompressed.dimensions() {
        return Err(RasterError::DimensionMismatch {
            expected: original.dimensions(),
            actual: recompressed.dimensions(),
        });
    }

    let plane = intensity_plane(original, recompressed, params.amplification);
    let total: u64 = plane.iter().map(|&v| v as u64).sum();
    let anomaly_intensity = total as f64 / plane.len() as f64;
    let (risk_level, score) = params.classify(anomaly_intensity);

    let heat = heatmap::false_color(&plane, original.width(), original.height())?;
    let heatmap = heatmap::blend(original, &heat, params.original_weight, params.heatmap_weight)?;

    Ok(ForensicsReport { anomaly_intensity, risk_level, score, heatmap })
}

/// Amplified, luma-reduced difference of one pixel pair.
fn pixel_intensity(a: &[u8], b: &[u8], amplification: f64) -> u8 {
    let amp = |c: usize| ((a[c].abs_diff(b[c]) as f64) * amplification).round().min(255.0) as u32;
    let luma = amp(0) * LUMA_W0 + amp(1) * LUMA_W1 + amp(2) * LUMA_W2;
    ((luma + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

#[cfg(feature = "parallel")]
fn intensity_plane(original: &RasterImage, recompressed: &RasterImage, amplification: f64) -> Vec<u8> {
    use rayon::prelude::*;

    original
        .samples()
        .par_chunks_exact(original.channels())
        .zip(recompressed.samples().par_chunks_exact(recompressed.channels()))
        .map(|(a, b)| pixel_intensity(a, b, amplification))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn intensity_plane(original: &RasterImage, recompressed: &RasterImage, amplification: f64) -> Vec<u8> {
    original
        .pixels()
        .zip(recompressed.pixels())
        .map(|(a, b)| pixel_intensity(a, b, amplification))
        .collect()
}
