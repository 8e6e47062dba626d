// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Wire responses. Field names are part of the external contract.

use serde::Serialize;

use crate::forensics::{AnalyzeResult, RiskLevel};
use crate::service::error::ServiceError;
use crate::stego::{EmbedResult, VerifyResult};

/// Returned when even the fallback response cannot be serialized.
pub const SERIALIZATION_FAILURE: &str = r#"{"success":false,"error":"response serialization failed"}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResponse {
    pub success: bool,
    pub preview_path: String,
    pub embedded_text: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub extracted_text: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub preview_path: String,
    pub score: u8,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Any response the dispatcher can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Embed(EmbedResponse),
    Verify(VerifyResponse),
    Analyze(AnalyzeResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Embed(r) => r.success,
            Self::Verify(r) => r.success,
            Self::Analyze(r) => r.success,
            Self::Error(_) => false,
        }
    }

    pub fn error(err: &ServiceError) -> Self {
        Self::Error(ErrorResponse { success: false, error: err.to_string() })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| SERIALIZATION_FAILURE.to_owned())
    }
}

impl From<EmbedResult> for Response {
    fn from(r: EmbedResult) -> Self {
        Self::Embed(EmbedResponse {
            success: r.success,
            preview_path: r.preview_path.display().to_string(),
            embedded_text: r.embedded_text,
            algorithm: r.algorithm.to_owned(),
        })
    }
}

impl From<VerifyResult> for Response {
    fn from(r: VerifyResult) -> Self {
        Self::Verify(VerifyResponse {
            success: r.success,
            extracted_text: r.extracted_text,
            confidence_score: r.confidence,
        })
    }
}

impl From<AnalyzeResult> for Response {
    fn from(r: AnalyzeResult) -> Self {
        Self::Analyze(AnalyzeResponse {
            success: r.success,
            preview_path: r.preview_path.display().to_string(),
            score: r.score,
            risk_level: r.risk_level,
        })
    }
}
