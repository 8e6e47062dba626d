// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Tamper-likelihood scoring by error-level analysis.
//!
//! See [`ela`] for the signal pipeline and [`heatmap`] for the preview
//! rendering. [`forensics_analyze`] runs the whole thing against files.

pub mod ela;
pub mod heatmap;
mod pipeline;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::raster::RasterImage;

pub use ela::{analyze, analyze_recompressed, ElaParams};
pub use pipeline::{forensics_analyze, AnalyzeResult};

/// Algorithm name reported for forensics requests.
pub const ALGORITHM_TAG: &str = "forensics";

/// Risk band derived from the mean error level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of error-level analysis.
#[derive(Debug, Clone)]
pub struct ForensicsReport {
    /// Mean of the amplified intensity plane (0–255).
    pub anomaly_intensity: f64,
    pub risk_level: RiskLevel,
    /// Heuristic score in 0..=100; higher means fewer anomalies.
    pub score: u8,
    /// Jet heatmap blended over the original.
    pub heatmap: RasterImage,
}
