// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Wire request validation.
//!
//! Request bodies arrive as loosely typed JSON. They are converted into typed
//! requests before anything touches an image, so a missing field, a field of
//! the wrong type, and an unknown algorithm are all distinct errors.
//!
//! ```text
//! process: { "inputPath", "outputPath", "algorithm": "watermark", "watermarkData" }
//! process: { "inputPath", "outputPath", "algorithm": "forensics" }
//! verify:  { "inputPath" }
//! ```

use core::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::service::stats::Operation;

pub const FIELD_INPUT_PATH: &str = "inputPath";
pub const FIELD_OUTPUT_PATH: &str = "outputPath";
pub const FIELD_ALGORITHM: &str = "algorithm";
pub const FIELD_WATERMARK_DATA: &str = "watermarkData";

/// Errors from request validation.
#[derive(Debug)]
pub enum RequestError {
    /// The raw body is not valid JSON.
    MalformedBody(serde_json::Error),
    /// The body is valid JSON but not an object.
    NotAnObject,
    /// A required field is absent (or `null`).
    MissingField(&'static str),
    /// A field is present with the wrong JSON type.
    WrongType { field: &'static str, expected: &'static str },
    /// The `algorithm` value names no known operation.
    UnknownAlgorithm(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody(e) => write!(f, "malformed request body: {e}"),
            Self::NotAnObject => write!(f, "request body must be a JSON object"),
            Self::MissingField(field) => write!(f, "missing required field '{field}'"),
            Self::WrongType { field, expected } => write!(f, "field '{field}' must be a {expected}"),
            Self::UnknownAlgorithm(name) => write!(f, "unknown algorithm: {name}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedBody(e) => Some(e),
            _ => None,
        }
    }
}

/// Operation selected by the `algorithm` field of a process request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Watermark,
    Forensics,
}

impl Algorithm {
    pub fn parse(name: &str) -> Result<Self, RequestError> {
        match name {
            crate::stego::ALGORITHM_TAG => Ok(Self::Watermark),
            crate::forensics::ALGORITHM_TAG => Ok(Self::Forensics),
            other => Err(RequestError::UnknownAlgorithm(other.to_owned())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watermark => crate::stego::ALGORITHM_TAG,
            Self::Forensics => crate::forensics::ALGORITHM_TAG,
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            Self::Watermark => Operation::Embed,
            Self::Forensics => Operation::Analyze,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub watermark_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub input_path: PathBuf,
}

/// A validated process request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessRequest {
    Embed(EmbedRequest),
    Analyze(AnalyzeRequest),
}

impl ProcessRequest {
    /// Validate a process body. `algorithm` is checked first, then the paths,
    /// then the algorithm-specific fields.
    pub fn from_value(body: &Value) -> Result<Self, RequestError> {
        let obj = as_object(body)?;
        let algorithm = algorithm_field(obj)?;
        let input_path = PathBuf::from(required_str(obj, FIELD_INPUT_PATH)?);
        let output_path = PathBuf::from(required_str(obj, FIELD_OUTPUT_PATH)?);

        Ok(match algorithm {
            Algorithm::Watermark => Self::Embed(EmbedRequest {
                input_path,
                output_path,
                watermark_data: required_str(obj, FIELD_WATERMARK_DATA)?.to_owned(),
            }),
            Algorithm::Forensics => Self::Analyze(AnalyzeRequest { input_path, output_path }),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Embed(_) => Algorithm::Watermark,
            Self::Analyze(_) => Algorithm::Forensics,
        }
    }

    pub fn input_path(&self) -> &Path {
        match self {
            Self::Embed(r) => &r.input_path,
            Self::Analyze(r) => &r.input_path,
        }
    }

    pub fn operation(&self) -> Operation {
        self.algorithm().operation()
    }
}

impl VerifyRequest {
    pub fn from_value(body: &Value) -> Result<Self, RequestError> {
        let obj = as_object(body)?;
        Ok(Self { input_path: PathBuf::from(required_str(obj, FIELD_INPUT_PATH)?) })
    }
}

/// Validate only the `algorithm` field of a process body.
pub fn requested_algorithm(body: &Value) -> Result<Algorithm, RequestError> {
    algorithm_field(as_object(body)?)
}

fn algorithm_field(obj: &Map<String, Value>) -> Result<Algorithm, RequestError> {
    Algorithm::parse(required_str(obj, FIELD_ALGORITHM)?)
}

/// Parse a raw request body.
pub fn parse_body(raw: &str) -> Result<Value, RequestError> {
    serde_json::from_str(raw).map_err(RequestError::MalformedBody)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, RequestError> {
    body.as_object().ok_or(RequestError::NotAnObject)
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, RequestError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(RequestError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(RequestError::WrongType { field, expected: "string" }),
    }
}
