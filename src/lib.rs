// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! # pixseal-core
//!
//! Image watermarking and tamper screening behind a request/response boundary.
//!
//! - **Watermark** (`stego`): embeds a short text payload one bit per pixel
//!   into the least-significant bit of the carrier channel, behind an 8-bit
//!   length prefix and a magic header, and reads it back with a confidence
//!   score. This is a marking scheme, not encryption.
//! - **Forensics** (`forensics`): error-level analysis. The image is
//!   recompressed as JPEG, the amplified difference is reduced to a mean
//!   intensity, and a fixed three-band heuristic turns that into a risk level
//!   and score. A blended heatmap is rendered for inspection.
//!
//! Files and formats are handled by an [`ImageCodec`]; [`FileCodec`] is the
//! `image`-crate implementation. The `service` module validates JSON request
//! bodies and dispatches them.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pixseal_core::{embed_watermark, verify_watermark, RasterImage};
//!
//! let cover = RasterImage::filled(64, 64, 3, 128).unwrap();
//! let marked = embed_watermark(&cover, "owner:42").unwrap();
//! let result = verify_watermark(&marked);
//! assert!(result.success);
//! assert_eq!(result.extracted_text, "owner:42");
//! ```

pub mod forensics;
pub mod raster;
pub mod service;
pub mod stego;

pub use raster::codec::{FileCodec, ImageCodec};
pub use raster::error::RasterError;
pub use raster::RasterImage;
pub use stego::{embed_watermark, verify_watermark, watermark_encode, watermark_verify, EmbedResult, StegoError};
pub use stego::{FrameStatus, VerifyResult, MAGIC_HEADER, MAX_PAYLOAD_LEN};
pub use forensics::{analyze, forensics_analyze, AnalyzeResult, ElaParams, ForensicsReport, RiskLevel};
pub use service::{Processor, Response, ServiceConfig, ServiceError, ServiceStats};
