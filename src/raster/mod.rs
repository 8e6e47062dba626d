// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! In-memory raster images and the codec boundary.
//!
//! [`RasterImage`] is the only image representation the watermark and
//! forensics code sees: an owned `height × width × channels` buffer of 8-bit
//! samples, stored row-major with interleaved channels. Channel order is fixed
//! by the codec (R, G, B[, A] for [`codec::FileCodec`]); channel 0 is the
//! carrier channel for LSB embedding.
//!
//! File formats, paths and lossy recompression live behind the
//! [`codec::ImageCodec`] trait so the core stays testable without touching
//! the filesystem.

pub mod codec;
pub mod error;

use error::{RasterError, Result};

/// Minimum number of channels per pixel.
pub const MIN_CHANNELS: usize = 3;

/// Owned 8-bit raster image.
///
/// Samples are stored in row-major order, channels interleaved:
/// index = `(row * width + col) * channels + channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl RasterImage {
    /// Create a raster with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        let len = checked_len(width, height, channels)?;
        Ok(Self { width, height, channels, samples: vec![value; len] })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    /// - [`RasterError::InvalidDimensions`] if `width` or `height` is zero.
    /// - [`RasterError::TooFewChannels`] if `channels < 3`.
    /// - [`RasterError::BufferSizeMismatch`] if `samples` has the wrong length.
    pub fn from_samples(width: usize, height: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = checked_len(width, height, channels)?;
        if samples.len() != expected {
            return Err(RasterError::BufferSizeMismatch { expected, actual: samples.len() });
        }
        Ok(Self { width, height, channels, samples })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get a sample value.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.samples[self.index(row, col, channel)]
    }

    /// Set a sample value.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, val: u8) {
        let idx = self.index(row, col, channel);
        self.samples[idx] = val;
    }

    /// All channels of the pixel at (row, col).
    pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
        let start = self.index(row, col, 0);
        &self.samples[start..start + self.channels]
    }

    /// Iterate pixels in scan order (top row first, left to right).
    ///
    /// Each item is the `channels`-long slice of one pixel.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.channels)
    }

    /// Mutable counterpart of [`RasterImage::pixels`].
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.samples.chunks_exact_mut(self.channels)
    }

    /// Raw read-only access to all samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the raster and return its sample buffer.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Copy of channel `channel` as a `height × width` plane.
    pub fn channel_plane(&self, channel: usize) -> Vec<u8> {
        debug_assert!(channel < self.channels, "channel {channel} >= {}", self.channels);
        self.pixels().map(|px| px[channel]).collect()
    }

    fn index(&self, row: usize, col: usize, channel: usize) -> usize {
        debug_assert!(row < self.height, "row {row} >= {}", self.height);
        debug_assert!(col < self.width, "col {col} >= {}", self.width);
        debug_assert!(channel < self.channels, "channel {channel} >= {}", self.channels);
        (row * self.width + col) * self.channels + channel
    }
}

fn checked_len(width: usize, height: usize, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions);
    }
    if channels < MIN_CHANNELS {
        return Err(RasterError::TooFewChannels(channels));
    }
    width
        .checked_mul(height)
        .and_then(|p| p.checked_mul(channels))
        .ok_or(RasterError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_get_set() {
        let mut r = RasterImage::filled(3, 2, 3, 0).unwrap();
        assert_eq!(r.dimensions(), (3, 2));
        assert_eq!(r.pixel_count(), 6);
        assert_eq!(r.samples().len(), 18);

        r.set(1, 2, 1, 42);
        assert_eq!(r.get(1, 2, 1), 42);
        assert_eq!(r.pixel(1, 2), &[0, 42, 0]);

        // Neighbours untouched
        assert_eq!(r.get(1, 2, 0), 0);
        assert_eq!(r.get(0, 2, 1), 0);
    }

    #[test]
    fn row_major_layout() {
        let samples: Vec<u8> = (0..24).collect();
        let r = RasterImage::from_samples(2, 3, 4, samples).unwrap();
        // Pixel (row 1, col 0) is the third pixel in scan order.
        assert_eq!(r.pixel(1, 0), &[8, 9, 10, 11]);
        assert_eq!(r.pixels().nth(2).unwrap(), &[8, 9, 10, 11]);
        assert_eq!(r.channel_plane(0), vec![0, 4, 8, 12, 16, 20]);
    }

    #[test]
    fn rejects_invalid_geometry() {
        assert!(matches!(RasterImage::filled(0, 4, 3, 0), Err(RasterError::InvalidDimensions)));
        assert!(matches!(RasterImage::filled(4, 0, 3, 0), Err(RasterError::InvalidDimensions)));
        assert!(matches!(RasterImage::filled(4, 4, 1, 0), Err(RasterError::TooFewChannels(1))));
        assert!(matches!(
            RasterImage::from_samples(2, 2, 3, vec![0; 11]),
            Err(RasterError::BufferSizeMismatch { expected: 12, actual: 11 })
        ));
    }

    #[test]
    fn pixels_mut_writes_through() {
        let mut r = RasterImage::filled(2, 2, 3, 7).unwrap();
        for px in r.pixels_mut().take(2) {
            px[0] = 1;
        }
        assert_eq!(r.channel_plane(0), vec![1, 1, 7, 7]);
        assert_eq!(r.channel_plane(2), vec![7, 7, 7, 7]);
    }
}
