// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! File-backed watermark encode/verify pipeline.
//!
//! Encode:
//! 1. Frame the payload (fails before any I/O if the payload is invalid)
//! 2. Decode the cover through the codec
//! 3. Check capacity
//! 4. Embed into a copy of the cover
//! 5. Encode the result to the destination
//!
//! The destination is only written after steps 1–4 succeed.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{info, warn};

use crate::raster::codec::ImageCodec;
use crate::stego::capacity::check_capacity;
use crate::stego::embed::embed_bits;
use crate::stego::error::StegoError;
use crate::stego::frame::{frame_payload, VerifyResult};
use crate::stego::{extract, ALGORITHM_TAG};

/// Result of a successful watermark embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedResult {
    pub success: bool,
    pub embedded_text: String,
    /// Always [`ALGORITHM_TAG`].
    pub algorithm: &'static str,
    /// Where the watermarked image was written.
    pub preview_path: PathBuf,
}

/// Embed `text` into the image at `input` and write it to `output`.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] / [`StegoError::PayloadTooLarge`] for bad text.
/// - [`StegoError::InsufficientCapacity`] if the image has too few pixels.
/// - [`StegoError::Raster`] if `input` is unreadable or `output` unwritable.
pub fn watermark_encode<C: ImageCodec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
    text: &str,
) -> Result<EmbedResult, StegoError> {
    let bits = frame_payload(text)?;

    let cover = codec.decode(input)?;
    check_capacity(&cover, bits.len())?;
    let marked = embed_bits(cover, &bits)?;

    if is_lossy_destination(output) {
        warn!(output = %output.display(), "lossy output format will destroy the watermark bits");
    }
    codec.encode(&marked, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        payload_len = text.len(),
        "watermark embedded"
    );

    Ok(EmbedResult {
        success: true,
        embedded_text: text.to_owned(),
        algorithm: ALGORITHM_TAG,
        preview_path: output.to_path_buf(),
    })
}

/// Extract and verify a watermark from the image at `input`.
///
/// A missing or foreign watermark is not an error; it is reported through
/// [`VerifyResult::success`] and the confidence.
///
/// # Errors
/// Returns [`StegoError::Raster`] if `input` cannot be decoded.
pub fn watermark_verify<C: ImageCodec + ?Sized>(codec: &C, input: &Path) -> Result<VerifyResult, StegoError> {
    let raster = codec.decode(input)?;
    let result = extract::extract(&raster);
    info!(
        input = %input.display(),
        success = result.success,
        confidence = result.confidence,
        "watermark verified"
    );
    Ok(result)
}

fn is_lossy_destination(path: &Path) -> bool {
    matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg | ImageFormat::WebP))
}
