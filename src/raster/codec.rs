// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Image codec boundary.
//!
//! The watermark and forensics code never touches files directly. They ask an
//! [`ImageCodec`] to decode a source into a [`RasterImage`], encode a raster to
//! a destination, or run a lossy JPEG round trip in memory.
//!
//! [`FileCodec`] is the filesystem implementation backed by the `image` crate.
//! Images with an alpha channel decode to 4 channels (RGBA), everything else
//! to 3 (RGB).

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use super::error::{RasterError, Result};
use super::RasterImage;

/// Decode, encode and recompress rasters.
///
/// Implementations must be shareable across worker threads; each call owns
/// the raster it returns.
pub trait ImageCodec: Send + Sync {
    /// Decode the image at `source`.
    fn decode(&self, source: &Path) -> Result<RasterImage>;

    /// Encode `raster` to `destination`. The format is implementation-defined
    /// (for [`FileCodec`], chosen from the file extension).
    fn encode(&self, raster: &RasterImage, destination: &Path) -> Result<()>;

    /// Lossy JPEG round trip at `quality` (1–100). The result has the same
    /// width, height and channel count as the input.
    fn recompress(&self, raster: &RasterImage, quality: u8) -> Result<RasterImage>;
}

/// [`ImageCodec`] backed by the `image` crate (PNG, JPEG, BMP).
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCodec;

impl FileCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode `raster` into an in-memory buffer in the given format.
    pub fn encode_to_vec(&self, raster: &RasterImage, format: ImageFormat) -> Result<Vec<u8>> {
        let img = prepare_for_format(to_dynamic(raster)?, format);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).map_err(|source| RasterError::Write {
            path: format!("<memory:{format:?}>").into(),
            source,
        })?;
        Ok(out.into_inner())
    }
}

impl ImageCodec for FileCodec {
    fn decode(&self, source: &Path) -> Result<RasterImage> {
        let img = image::open(source).map_err(|e| RasterError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        from_dynamic(img)
    }

    fn encode(&self, raster: &RasterImage, destination: &Path) -> Result<()> {
        let mut img = to_dynamic(raster)?;
        if let Ok(format) = ImageFormat::from_path(destination) {
            img = prepare_for_format(img, format);
        }
        img.save(destination).map_err(|source| RasterError::Write {
            path: destination.to_path_buf(),
            source,
        })
    }

    fn recompress(&self, raster: &RasterImage, quality: u8) -> Result<RasterImage> {
        let (w, h) = dims_u32(raster)?;
        let rgb: Vec<u8> = raster.pixels().flat_map(|px| px[..3].iter().copied()).collect();
        let rgb = RgbImage::from_raw(w, h, rgb).ok_or(RasterError::InvalidDimensions)?;

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
            .encode_image(&rgb)
            .map_err(RasterError::Recompress)?;

        let decoded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
            .map_err(RasterError::Recompress)?
            .to_rgb8();
        if decoded.dimensions() != (w, h) {
            return Err(RasterError::DimensionMismatch {
                expected: raster.dimensions(),
                actual: (decoded.width() as usize, decoded.height() as usize),
            });
        }

        if raster.channels() == 3 {
            return RasterImage::from_samples(raster.width(), raster.height(), 3, decoded.into_raw());
        }

        // Extra channels (alpha) do not take part in the JPEG round trip.
        let channels = raster.channels();
        let mut samples = Vec::with_capacity(raster.samples().len());
        for (src, lossy) in raster.pixels().zip(decoded.as_raw().chunks_exact(3)) {
            samples.extend_from_slice(lossy);
            samples.extend_from_slice(&src[3..]);
        }
        RasterImage::from_samples(raster.width(), raster.height(), channels, samples)
    }
}

/// Convert a decoded `image` value into a raster (RGB or RGBA).
pub fn from_dynamic(img: DynamicImage) -> Result<RasterImage> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if img.color().has_alpha() {
        RasterImage::from_samples(w, h, 4, img.to_rgba8().into_raw())
    } else {
        RasterImage::from_samples(w, h, 3, img.to_rgb8().into_raw())
    }
}

/// Convert a raster into an `image` value. Only 3- and 4-channel rasters
/// have a matching pixel type.
pub fn to_dynamic(raster: &RasterImage) -> Result<DynamicImage> {
    let (w, h) = dims_u32(raster)?;
    let samples = raster.samples().to_vec();
    let img = match raster.channels() {
        3 => RgbImage::from_raw(w, h, samples).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, samples).map(DynamicImage::ImageRgba8),
        n => return Err(RasterError::UnsupportedChannels(n)),
    };
    img.ok_or(RasterError::InvalidDimensions)
}

/// JPEG has no alpha channel; drop it rather than fail the write.
fn prepare_for_format(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    if format == ImageFormat::Jpeg && img.color().has_alpha() {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    }
}

fn dims_u32(raster: &RasterImage) -> Result<(u32, u32)> {
    let w = u32::try_from(raster.width()).map_err(|_| RasterError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| RasterError::InvalidDimensions)?;
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize, channels: usize) -> RasterImage {
        let mut r = RasterImage::filled(width, height, channels, 255).unwrap();
        for row in 0..height {
            for col in 0..width {
                r.set(row, col, 0, (row * 16) as u8);
                r.set(row, col, 1, (col * 16) as u8);
                r.set(row, col, 2, ((row + col) * 8) as u8);
            }
        }
        r
    }

    #[test]
    fn png_file_roundtrip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.png");
        let original = gradient(16, 12, 3);

        FileCodec.encode(&original, &path).unwrap();
        let decoded = FileCodec.decode(&path).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn alpha_survives_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let mut original = gradient(8, 8, 4);
        original.set(3, 3, 3, 17);

        FileCodec.encode(&original, &path).unwrap();
        let decoded = FileCodec.decode(&path).unwrap();
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.get(3, 3, 3), 17);
    }

    #[test]
    fn jpeg_destination_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        FileCodec.encode(&gradient(16, 16, 4), &path).unwrap();
        let decoded = FileCodec.decode(&path).unwrap();
        assert_eq!(decoded.channels(), 3);
        assert_eq!(decoded.dimensions(), (16, 16));
    }

    #[test]
    fn recompress_preserves_geometry_and_extra_channels() {
        let mut original = gradient(24, 20, 4);
        original.set(5, 7, 3, 99);
        let lossy = FileCodec.recompress(&original, 90).unwrap();
        assert_eq!(lossy.dimensions(), original.dimensions());
        assert_eq!(lossy.channels(), 4);
        assert_eq!(lossy.get(5, 7, 3), 99);
    }

    #[test]
    fn missing_source_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCodec.decode(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, RasterError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.png");
        let err = FileCodec.encode(&gradient(4, 4, 3), &path).unwrap_err();
        assert!(matches!(err, RasterError::Write { .. }), "got {err:?}");
    }

    #[test]
    fn five_channels_cannot_be_encoded() {
        let r = RasterImage::filled(2, 2, 5, 0).unwrap();
        assert!(matches!(to_dynamic(&r), Err(RasterError::UnsupportedChannels(5))));
    }

    #[test]
    fn encode_to_vec_png() {
        let original = gradient(8, 4, 3);
        let bytes = FileCodec.encode_to_vec(&original, ImageFormat::Png).unwrap();
        let back = from_dynamic(image::load_from_memory(&bytes).unwrap()).unwrap();
        assert_eq!(back, original);
    }
}
