// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! LSB extraction from the carrier channel.

use tracing::debug;

use crate::raster::RasterImage;
use crate::stego::capacity::capacity;
use crate::stego::frame::{self, framed_bit_len, VerifyResult, LENGTH_PREFIX_BITS};
use crate::stego::CARRIER_CHANNEL;

/// Read a watermark from the carrier LSBs of `raster`.
///
/// Reads the 8-pixel length prefix first. If it is zero or claims more bits
/// than the raster has pixels, scanning stops there. Otherwise exactly
/// `8·L` more pixels are read and the bitstream is handed to
/// [`frame::unframe`] for header validation and sanitization.
pub fn extract(raster: &RasterImage) -> VerifyResult {
    let available = capacity(raster);
    if available < LENGTH_PREFIX_BITS {
        debug!(pixels = available, "raster too small for a length prefix");
        return VerifyResult::invalid_length();
    }

    let mut bits = read_carrier_bits(raster, 0, LENGTH_PREFIX_BITS);
    let len = frame::read_length_prefix(&bits).unwrap_or(0);
    let total = framed_bit_len(len);
    if len == 0 || total > available {
        debug!(len, total, available, "implausible length prefix");
        return VerifyResult::invalid_length();
    }

    bits.extend(read_carrier_bits(raster, LENGTH_PREFIX_BITS, total - LENGTH_PREFIX_BITS));
    frame::unframe(&bits)
}

/// Carrier LSBs of `count` pixels starting at scan position `start`.
fn read_carrier_bits(raster: &RasterImage, start: usize, count: usize) -> Vec<u8> {
    raster
        .pixels()
        .skip(start)
        .take(count)
        .map(|px| px[CARRIER_CHANNEL] & 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::embed::embed_bits;
    use crate::stego::frame::{bytes_to_bits, frame_payload, FrameStatus};

    #[test]
    fn roundtrip_abc_exact_fit() {
        let cover = RasterImage::filled(8, 8, 3, 128).unwrap();
        let marked = embed_bits(cover, &frame_payload("ABC").unwrap()).unwrap();
        let result = extract(&marked);
        assert!(result.success);
        assert_eq!(result.extracted_text, "ABC");
        assert_eq!(result.status, FrameStatus::Verified);
    }

    #[test]
    fn blank_raster_has_no_payload() {
        let r = RasterImage::filled(16, 16, 3, 0).unwrap();
        let result = extract(&r);
        assert!(!result.success);
        assert_eq!(result.confidence, 0.0);
        assert!(result.extracted_text.is_empty());
    }

    #[test]
    fn oversized_length_stops_early() {
        // All-odd carrier samples decode to L = 255, far beyond 16×16 = 256 bits.
        let r = RasterImage::filled(16, 16, 3, 1).unwrap();
        let result = extract(&r);
        assert_eq!(result.status, FrameStatus::InvalidLength);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn tiny_raster_rejected() {
        let r = RasterImage::filled(7, 1, 3, 1).unwrap();
        assert_eq!(extract(&r).status, FrameStatus::InvalidLength);
    }

    #[test]
    fn foreign_frame_reports_mismatch() {
        let mut framed = vec![4u8];
        framed.extend_from_slice(b"nope");
        let cover = RasterImage::filled(8, 8, 3, 0).unwrap();
        let marked = embed_bits(cover, &bytes_to_bits(&framed)).unwrap();

        let result = extract(&marked);
        assert!(!result.success);
        assert_eq!(result.status, FrameStatus::HeaderMismatch);
        assert!(result.confidence <= 0.1);
    }
}
