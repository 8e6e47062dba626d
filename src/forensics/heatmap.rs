// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! False-color heatmap rendering and weighted blending.

use crate::raster::error::{RasterError, Result};
use crate::raster::RasterImage;

/// Jet colormap: 0 → dark blue, 128 → green-ish, 255 → dark red. Returns RGB.
pub fn jet(value: u8) -> [u8; 3] {
    let v = value as f64 / 255.0;
    let ramp = |center: f64| {
        let x = (1.5 - (4.0 * v - center).abs()).clamp(0.0, 1.0);
        (x * 255.0).round() as u8
    };
    [ramp(3.0), ramp(2.0), ramp(1.0)]
}

/// Render a single-channel `width × height` plane as an RGB jet heatmap.
pub fn false_color(plane: &[u8], width: usize, height: usize) -> Result<RasterImage> {
    let samples: Vec<u8> = plane.iter().flat_map(|&v| jet(v)).collect();
    RasterImage::from_samples(width, height, 3, samples)
}

/// Weighted sum `base_weight·base + overlay_weight·overlay`, rounded and
/// saturated, over the first three channels. Channels of `base` beyond the
/// third are copied unchanged.
///
/// # Errors
/// Returns [`RasterError::DimensionMismatch`] if the rasters differ in size.
pub fn blend(base: &RasterImage, overlay: &RasterImage, base_weight: f64, overlay_weight: f64) -> Result<RasterImage> {
    if base.dimensions() != overlay.dimensions() {
        return Err(RasterError::DimensionMismatch {
            expected: base.dimensions(),
            actual: overlay.dimensions(),
        });
    }

    let mut samples = Vec::with_capacity(base.samples().len());
    for (b, o) in base.pixels().zip(overlay.pixels()) {
        for c in 0..3 {
            let v = base_weight * b[c] as f64 + overlay_weight * o[c] as f64;
            samples.push(v.round().clamp(0.0, 255.0) as u8);
        }
        samples.extend_from_slice(&b[3..]);
    }
    RasterImage::from_samples(base.width(), base.height(), base.channels(), samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints() {
        assert_eq!(jet(0), [0, 0, 128]);
        assert_eq!(jet(255), [128, 0, 0]);
        // Mid-scale is dominated by green.
        let mid = jet(128);
        assert_eq!(mid[1], 255);
        assert!(mid[0] < 255 && mid[2] < 255);
    }

    #[test]
    fn false_color_geometry() {
        let heat = false_color(&[0, 255, 0, 255, 0, 255], 3, 2).unwrap();
        assert_eq!(heat.dimensions(), (3, 2));
        assert_eq!(heat.channels(), 3);
        assert_eq!(heat.pixel(0, 1), &[128, 0, 0]);
    }

    #[test]
    fn blend_weights_and_alpha() {
        let base = RasterImage::filled(2, 2, 4, 100).unwrap();
        let overlay = RasterImage::filled(2, 2, 3, 200).unwrap();
        let out = blend(&base, &overlay, 0.6, 0.4).unwrap();
        // 0.6 * 100 + 0.4 * 200 = 140
        assert_eq!(out.pixel(1, 1), &[140, 140, 140, 100]);
    }

    #[test]
    fn blend_saturates() {
        let base = RasterImage::filled(1, 1, 3, 255).unwrap();
        let out = blend(&base, &base, 1.0, 1.0).unwrap();
        assert_eq!(out.pixel(0, 0), &[255, 255, 255]);
    }

    #[test]
    fn blend_rejects_mismatched_sizes() {
        let a = RasterImage::filled(2, 2, 3, 0).unwrap();
        let b = RasterImage::filled(3, 2, 3, 0).unwrap();
        assert!(matches!(blend(&a, &b, 0.5, 0.5), Err(RasterError::DimensionMismatch { .. })));
    }
}
