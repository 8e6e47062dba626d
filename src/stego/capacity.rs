// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Watermark capacity checks.
//!
//! One bit is embedded per pixel (in the carrier channel), so a raster holds
//! exactly `width × height` bits.

use crate::raster::RasterImage;
use crate::stego::error::StegoError;
use crate::stego::frame::{framed_bit_len, MAGIC_HEADER, MAX_PAYLOAD_LEN};

/// Embeddable bit count of `raster`.
pub fn capacity(raster: &RasterImage) -> usize {
    raster.pixel_count()
}

/// Ensure `raster` can hold `bit_count` bits.
///
/// # Errors
/// Returns [`StegoError::InsufficientCapacity`] if `bit_count` exceeds
/// [`capacity`].
pub fn check_capacity(raster: &RasterImage, bit_count: usize) -> Result<(), StegoError> {
    let available = capacity(raster);
    if bit_count > available {
        return Err(StegoError::InsufficientCapacity { needed: bit_count, available });
    }
    Ok(())
}

/// Largest payload in bytes (header excluded) that fits `raster`.
///
/// Bounded by both the pixel count and the u8 length prefix. Returns 0 when
/// not even a one-byte payload fits.
pub fn max_payload_len(raster: &RasterImage) -> usize {
    let framed_bytes = capacity(raster).saturating_sub(framed_bit_len(0)) / 8;
    framed_bytes.saturating_sub(MAGIC_HEADER.len()).min(MAX_PAYLOAD_LEN)
}
