// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Report export

use crate::detect::SceneReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialize a scan report as pretty JSON
pub fn report_to_json(report: &SceneReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Write a scan report as JSON, creating parent directories as needed
pub fn write_report(report: &SceneReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {:?}", parent))?;
    }
    std::fs::write(path, report_to_json(report)?)
        .with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

/// Read back a report written by [`write_report`]
pub fn read_report(path: impl AsRef<Path>) -> Result<SceneReport> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read report: {:?}", path.as_ref()))?;
    serde_json::from_str(&content).context("Failed to parse report JSON")
}
