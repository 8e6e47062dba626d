// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! File-backed forensics pipeline: decode, analyze, write the blended heatmap.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::forensics::ela::{self, ElaParams};
use crate::forensics::RiskLevel;
use crate::raster::codec::ImageCodec;
use crate::raster::error::Result;

/// Summary of a file-backed analysis. The heatmap itself is at `preview_path`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeResult {
    pub success: bool,
    pub anomaly_intensity: f64,
    pub risk_level: RiskLevel,
    pub score: u8,
    pub preview_path: PathBuf,
}

/// Analyze the image at `input` and write the heatmap preview to `output`.
///
/// # Errors
/// Returns [`RasterError`](crate::raster::error::RasterError) if `input` is
/// unreadable, recompression fails, or `output` is unwritable. Nothing is
/// written unless the analysis succeeded.
pub fn forensics_analyze<C: ImageCodec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
    params: &ElaParams,
) -> Result<AnalyzeResult> {
    let raster = codec.decode(input)?;
    let report = ela::analyze(codec, &raster, params)?;
    codec.encode(&report.heatmap, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        intensity = report.anomaly_intensity,
        risk = %report.risk_level,
        score = report.score,
        "forensics analysis complete"
    );

    Ok(AnalyzeResult {
        success: true,
        anomaly_intensity: report.anomaly_intensity,
        risk_level: report.risk_level,
        score: report.score,
        preview_path: output.to_path_buf(),
    })
}
