// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! LSB watermark embedding and verification.
//!
//! A short text payload is prefixed with the magic header, framed behind an
//! 8-bit length field ([`frame`]), and written one bit per pixel into the
//! least-significant bit of the carrier channel ([`embed`]). Verification
//! reads the same pixels back in the same order ([`extract`]) and reports a
//! confidence instead of failing hard.
//!
//! This is a marking scheme, not encryption: anyone who knows the layout can
//! read or overwrite the payload, and any geometric transform or lossy
//! re-encode destroys it.

pub mod error;
pub mod frame;
pub mod capacity;
pub mod embed;
pub mod extract;
mod pipeline;

pub use error::StegoError;
pub use frame::{FrameStatus, VerifyResult, MAGIC_HEADER, MAX_PAYLOAD_LEN};
pub use pipeline::{watermark_encode, watermark_verify, EmbedResult};

use crate::raster::RasterImage;

/// Channel whose LSBs carry the payload.
pub const CARRIER_CHANNEL: usize = 0;

/// Algorithm name reported for watermark embeds.
pub const ALGORITHM_TAG: &str = "watermark";

/// Frame `text`, check capacity, and embed it into a copy of `cover`.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] / [`StegoError::PayloadTooLarge`] for bad text.
/// - [`StegoError::InsufficientCapacity`] if `cover` has too few pixels.
pub fn embed_watermark(cover: &RasterImage, text: &str) -> Result<RasterImage, StegoError> {
    let bits = frame::frame_payload(text)?;
    capacity::check_capacity(cover, bits.len())?;
    embed::embed_bits(cover.clone(), &bits)
}

/// Extract and verify a watermark from `raster`.
pub fn verify_watermark(raster: &RasterImage) -> VerifyResult {
    extract::extract(raster)
}

#[cfg(test)]
mod watermark_tests {
    use super::*;

    #[test]
    fn embed_verify_roundtrip() {
        let cover = RasterImage::filled(32, 32, 3, 200).unwrap();
        let marked = embed_watermark(&cover, "hidden").unwrap();
        let result = verify_watermark(&marked);
        assert!(result.success);
        assert_eq!(result.extracted_text, "hidden");
        // Cover is unchanged.
        assert_eq!(cover.channel_plane(CARRIER_CHANNEL), vec![200; 1024]);
    }

    #[test]
    fn capacity_checked_before_embedding() {
        // 7×9 = 63 pixels, "ABC" needs 64 bits.
        let cover = RasterImage::filled(9, 7, 3, 0).unwrap();
        match embed_watermark(&cover, "ABC") {
            Err(StegoError::InsufficientCapacity { needed, available }) => {
                assert_eq!(needed, 64);
                assert_eq!(available, 63);
            }
            other => panic!("expected InsufficientCapacity, got {other:?}"),
        }
    }

    #[test]
    fn second_payload_overwrites_first() {
        let cover = RasterImage::filled(40, 40, 3, 0).unwrap();
        let first = embed_watermark(&cover, "first payload").unwrap();
        let second = embed_watermark(&first, "2nd").unwrap();
        assert_eq!(verify_watermark(&second).extracted_text, "2nd");
    }
}
