// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Processor configuration.
//!
//! Every field has a built-in default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! { "forensics": { "quality": 90, "amplification": 15.0, "low_threshold": 8.0 } }
//! ```

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forensics::ElaParams;

/// Errors from loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "invalid config JSON: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Error-level analysis tunables.
    pub forensics: ElaParams,
}

impl ServiceConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// The document and its `forensics` section must be JSON objects; serde
    /// would otherwise accept a sequence in place of a struct.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        let Some(obj) = value.as_object() else {
            return Err(ConfigError::Invalid("config must be a JSON object"));
        };
        if obj.get("forensics").is_some_and(|v| !v.is_object()) {
            return Err(ConfigError::Invalid("forensics must be a JSON object"));
        }
        let config: Self = serde_json::from_value(value).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.forensics.validate().map_err(ConfigError::Invalid)
    }
}
