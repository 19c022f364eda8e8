// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Detection configuration

use crate::error::{DetectError, DetectResult};
use crate::geometry::MatchStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default per-axis tolerance for comparing mesh bounding boxes
pub const DEFAULT_MESH_TOLERANCE: f64 = 0.01;

/// Default per-axis tolerance for comparing face vertex positions
pub const DEFAULT_FACE_TOLERANCE: f64 = 0.001;

/// File picked up by [`DetectionConfig::load`] when present
pub const CONFIG_FILE_NAME: &str = "dupes.toml";

/// Detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Tolerance for bounding-box corners
    pub mesh_tolerance: f64,
    /// Tolerance for face vertex positions
    pub face_tolerance: f64,
    /// Point-set pairing used by the face detector
    pub strategy: MatchStrategy,
    /// Spread pair comparisons over the rayon pool
    pub parallel: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mesh_tolerance: DEFAULT_MESH_TOLERANCE,
            face_tolerance: DEFAULT_FACE_TOLERANCE,
            strategy: MatchStrategy::FirstFit,
            parallel: false,
        }
    }
}

impl DetectionConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: DetectionConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE_NAME).exists() {
            Self::from_file(CONFIG_FILE_NAME)?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `DUPES_*` overrides using the given variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("DUPES_MESH_TOLERANCE") {
            self.mesh_tolerance = value
                .parse()
                .with_context(|| format!("DUPES_MESH_TOLERANCE is not a number: {}", value))?;
        }

        if let Some(value) = lookup("DUPES_FACE_TOLERANCE") {
            self.face_tolerance = value
                .parse()
                .with_context(|| format!("DUPES_FACE_TOLERANCE is not a number: {}", value))?;
        }

        if let Some(value) = lookup("DUPES_STRATEGY") {
            self.strategy = value.parse().map_err(anyhow::Error::msg)?;
        }

        if let Some(value) = lookup("DUPES_PARALLEL") {
            self.parallel = value
                .parse()
                .with_context(|| format!("DUPES_PARALLEL is not a boolean: {}", value))?;
        }

        self.validate()?;
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject negative or non-finite tolerances
    pub fn validate(&self) -> DetectResult<()> {
        check_tolerance("mesh", self.mesh_tolerance)?;
        check_tolerance("face", self.face_tolerance)?;
        Ok(())
    }
}

fn check_tolerance(name: &'static str, value: f64) -> DetectResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DetectError::InvalidTolerance { name, value })
    }
}
