// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Payload frame construction and parsing.
//!
//! The frame is the self-delimiting bitstream written into the carrier LSBs:
//!
//! ```text
//! [8 bits ] framed length L (u8, MSB first) = 4 + payload_len
//! [32 bits] magic header "#IS#"
//! [8·(L-4)] payload bytes, each MSB first
//! ```
//!
//! Total bit count = 8 + 8·L. The header is not a checksum; it only separates
//! a real payload from a length field that happens to look plausible.

use crate::stego::error::StegoError;

/// Header prepended to every payload before framing.
pub const MAGIC_HEADER: &[u8; 4] = b"#IS#";

/// Largest framed length (header + payload) the u8 prefix can describe.
pub const MAX_FRAMED_LEN: usize = u8::MAX as usize;

/// Largest payload in bytes (255 - 4 = 251).
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAMED_LEN - MAGIC_HEADER.len();

/// Bits taken by the length prefix.
pub const LENGTH_PREFIX_BITS: usize = 8;

/// Confidence reported when the header matched.
pub const CONFIDENCE_VERIFIED: f64 = 0.99;

/// Confidence reported when a plausible length was found but the header did
/// not match (a foreign or corrupted payload, as opposed to no payload).
pub const CONFIDENCE_HEADER_MISMATCH: f64 = 0.1;

/// Replacement for bytes outside printable ASCII.
pub const PLACEHOLDER: char = '?';

/// Outcome category of an extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Length prefix and magic header both valid.
    Verified,
    /// Length prefix is zero, or more bits than are available.
    InvalidLength,
    /// Length prefix is plausible but the header did not match.
    HeaderMismatch,
}

/// Result of extracting and unframing a watermark.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyResult {
    pub success: bool,
    /// Sanitized payload text (empty unless `success`).
    pub extracted_text: String,
    /// Heuristic confidence in [0, 1].
    pub confidence: f64,
    pub status: FrameStatus,
}

impl VerifyResult {
    /// Failure with zero confidence: nothing that looks like a frame.
    pub fn invalid_length() -> Self {
        Self {
            success: false,
            extracted_text: String::new(),
            confidence: 0.0,
            status: FrameStatus::InvalidLength,
        }
    }

    fn header_mismatch() -> Self {
        Self {
            success: false,
            extracted_text: String::new(),
            confidence: CONFIDENCE_HEADER_MISMATCH,
            status: FrameStatus::HeaderMismatch,
        }
    }

    fn verified(text: String) -> Self {
        Self {
            success: true,
            extracted_text: text,
            confidence: CONFIDENCE_VERIFIED,
            status: FrameStatus::Verified,
        }
    }
}

/// Build the framed bitstream for `payload`.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] if `payload` is empty.
/// - [`StegoError::PayloadTooLarge`] if header + payload exceed 255 bytes.
pub fn frame_payload(payload: &str) -> Result<Vec<u8>, StegoError> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }
    let framed_len = MAGIC_HEADER.len() + payload.len();
    if framed_len > MAX_FRAMED_LEN {
        return Err(StegoError::PayloadTooLarge { framed_len });
    }

    let mut framed = Vec::with_capacity(1 + framed_len);
    framed.push(framed_len as u8);
    framed.extend_from_slice(MAGIC_HEADER);
    framed.extend_from_slice(payload.as_bytes());

    Ok(bytes_to_bits(&framed))
}

/// Number of bits `frame_payload` produces for a framed length of `framed_len` bytes.
pub fn framed_bit_len(framed_len: usize) -> usize {
    LENGTH_PREFIX_BITS + 8 * framed_len
}

/// Read the u8 length prefix from the first 8 bits. Returns `None` if fewer
/// than 8 bits are given.
pub fn read_length_prefix(bits: &[u8]) -> Option<usize> {
    let prefix = bits.get(..LENGTH_PREFIX_BITS)?;
    Some(prefix.iter().fold(0usize, |acc, &b| (acc << 1) | (b & 1) as usize))
}

/// Parse a framed bitstream.
///
/// `bits` may be longer than the frame; only `8 + 8·L` bits are consumed.
pub fn unframe(bits: &[u8]) -> VerifyResult {
    let Some(len) = read_length_prefix(bits) else {
        return VerifyResult::invalid_length();
    };
    let total = framed_bit_len(len);
    if len == 0 || bits.len() < total {
        return VerifyResult::invalid_length();
    }

    let framed = bits_to_bytes(&bits[LENGTH_PREFIX_BITS..total]);
    match framed.strip_prefix(MAGIC_HEADER.as_slice()) {
        Some(payload) => VerifyResult::verified(sanitize(payload)),
        None => VerifyResult::header_mismatch(),
    }
}

/// Map bytes to text, replacing anything outside printable ASCII (32..=126)
/// with [`PLACEHOLDER`].
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { PLACEHOLDER })
        .collect()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
