// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! LSB embedding into the carrier channel.
//!
//! Pixels are visited in scan order (top row first, left to right) and the
//! first `bits.len()` of them get their carrier-sample LSB overwritten with
//! the next bit. Embedding is a pure overwrite, so the same bitstream applied
//! to the same cover always yields the same carrier channel.

use tracing::error;

use crate::raster::RasterImage;
use crate::stego::capacity::check_capacity;
use crate::stego::error::StegoError;
use crate::stego::CARRIER_CHANNEL;

/// Write `bits` into the carrier LSBs of `carrier` and return it.
///
/// Takes ownership of the raster so callers that still need the cover pass a
/// clone; the caller's original is never touched.
///
/// # Errors
/// Returns [`StegoError::InsufficientCapacity`] (and writes nothing) if
/// `bits` does not fit. The pipeline always runs
/// [`check_capacity`] first, so hitting this is a caller bug.
pub fn embed_bits(mut carrier: RasterImage, bits: &[u8]) -> Result<RasterImage, StegoError> {
    if let Err(e) = check_capacity(&carrier, bits.len()) {
        error!(bits = bits.len(), pixels = carrier.pixel_count(), "embed called without a capacity check");
        return Err(e);
    }

    for (px, &bit) in carrier.pixels_mut().zip(bits) {
        px[CARRIER_CHANNEL] = (px[CARRIER_CHANNEL] & !1) | (bit & 1);
    }

    Ok(carrier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_only_carrier_lsbs() {
        let cover = RasterImage::filled(4, 2, 3, 0b1010_1010).unwrap();
        let bits = [1u8, 0, 1, 1, 0];
        let marked = embed_bits(cover.clone(), &bits).unwrap();

        let carrier = marked.channel_plane(CARRIER_CHANNEL);
        assert_eq!(carrier[..5], [0b1010_1011, 0b1010_1010, 0b1010_1011, 0b1010_1011, 0b1010_1010]);
        // Pixels beyond the bit count are untouched.
        assert_eq!(carrier[5..], [0b1010_1010; 3]);
        // Other channels are untouched.
        assert_eq!(marked.channel_plane(1), cover.channel_plane(1));
        assert_eq!(marked.channel_plane(2), cover.channel_plane(2));
    }

    #[test]
    fn clears_set_lsbs() {
        let cover = RasterImage::filled(2, 2, 3, 0xFF).unwrap();
        let marked = embed_bits(cover, &[0, 0, 0, 0]).unwrap();
        assert_eq!(marked.channel_plane(CARRIER_CHANNEL), vec![0xFE; 4]);
    }

    #[test]
    fn original_is_left_alone() {
        let cover = RasterImage::filled(3, 3, 3, 0).unwrap();
        let marked = embed_bits(cover.clone(), &[1; 9]).unwrap();
        assert_ne!(marked, cover);
        assert_eq!(cover.channel_plane(CARRIER_CHANNEL), vec![0; 9]);
    }

    #[test]
    fn overflow_writes_nothing() {
        let cover = RasterImage::filled(2, 2, 3, 0).unwrap();
        let result = embed_bits(cover, &[1; 5]);
        assert!(matches!(
            result,
            Err(StegoError::InsufficientCapacity { needed: 5, available: 4 })
        ));
    }
}
