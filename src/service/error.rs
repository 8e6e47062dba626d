// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Request-level errors.
//!
//! [`ServiceError`] wraps everything a single request can fail with. None of
//! it is fatal to the process: the dispatcher turns it into a
//! `{ "success": false, "error": ... }` response.

use core::fmt;

use crate::raster::error::RasterError;
use crate::service::request::RequestError;
use crate::stego::StegoError;

/// Coarse failure category, used for logging and request statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source unreadable, destination unwritable, or codec failure.
    Io,
    /// Empty or oversized watermark payload.
    Payload,
    /// Payload does not fit the image.
    Capacity,
    /// The `algorithm` field names no known operation.
    UnknownAlgorithm,
    /// Malformed body, missing or mistyped field.
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Io => "io",
            Self::Payload => "payload",
            Self::Capacity => "capacity",
            Self::UnknownAlgorithm => "unknown_algorithm",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a single request.
#[derive(Debug)]
pub enum ServiceError {
    Request(RequestError),
    Stego(StegoError),
    Raster(RasterError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(RequestError::UnknownAlgorithm(_)) => ErrorKind::UnknownAlgorithm,
            Self::Request(_) => ErrorKind::InvalidRequest,
            Self::Stego(StegoError::EmptyPayload | StegoError::PayloadTooLarge { .. }) => ErrorKind::Payload,
            Self::Stego(StegoError::InsufficientCapacity { .. }) => ErrorKind::Capacity,
            Self::Stego(StegoError::Raster(_)) | Self::Raster(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "{e}"),
            Self::Stego(e) => write!(f, "{e}"),
            Self::Raster(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::Stego(e) => Some(e),
            Self::Raster(e) => Some(e),
        }
    }
}

impl From<RequestError> for ServiceError {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

impl From<StegoError> for ServiceError {
    fn from(e: StegoError) -> Self {
        Self::Stego(e)
    }
}

impl From<RasterError> for ServiceError {
    fn from(e: RasterError) -> Self {
        Self::Raster(e)
    }
}
