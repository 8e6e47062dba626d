// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the watermark pipeline.
//!
//! [`StegoError`] covers payload framing, capacity checks and codec failures.
//! A failed *extraction* is not an error: it is reported through
//! [`VerifyResult`](super::VerifyResult) with a low confidence.

use core::fmt;

use crate::raster::error::RasterError;

/// Errors that can occur while embedding a watermark.
#[derive(Debug)]
pub enum StegoError {
    /// The payload text is empty.
    EmptyPayload,
    /// Header plus payload exceed the 8-bit length prefix.
    PayloadTooLarge { framed_len: usize },
    /// The framed bitstream needs more bits than the raster has pixels.
    InsufficientCapacity { needed: usize, available: usize },
    /// The cover image could not be decoded or the result could not be written.
    Raster(RasterError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "watermark payload is empty"),
            Self::PayloadTooLarge { framed_len } => write!(
                f,
                "watermark payload too large ({framed_len} framed bytes, max {})",
                super::frame::MAX_FRAMED_LEN
            ),
            Self::InsufficientCapacity { needed, available } => write!(
                f,
                "image too small for watermark (needs {needed} bits, holds {available})"
            ),
            Self::Raster(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Raster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::Raster(e)
    }
}
