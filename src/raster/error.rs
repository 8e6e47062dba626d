// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for raster construction and the image codec boundary.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while building, decoding, encoding, or
/// recompressing a raster.
#[derive(Debug)]
pub enum RasterError {
    /// Width or height is zero, or the sample count overflows `usize`.
    InvalidDimensions,
    /// Fewer than 3 channels per pixel.
    TooFewChannels(usize),
    /// The sample buffer does not match `width * height * channels`.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// Two rasters that must share a geometry do not.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// The codec cannot represent this channel count (only 3 and 4 are supported).
    UnsupportedChannels(usize),
    /// The source image could not be read or decoded.
    Read { path: PathBuf, source: image::ImageError },
    /// The destination could not be encoded or written.
    Write { path: PathBuf, source: image::ImageError },
    /// The in-memory lossy round trip failed.
    Recompress(image::ImageError),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "invalid raster dimensions"),
            Self::TooFewChannels(n) => write!(f, "raster needs at least 3 channels, got {n}"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "sample buffer holds {actual} bytes, expected {expected}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "raster is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::UnsupportedChannels(n) => write!(f, "cannot encode a raster with {n} channels"),
            Self::Read { path, source } => write!(f, "cannot read image {}: {source}", path.display()),
            Self::Write { path, source } => write!(f, "cannot write image {}: {source}", path.display()),
            Self::Recompress(e) => write!(f, "lossy recompression failed: {e}"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Recompress(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;
