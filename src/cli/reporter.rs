// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::detect::{FaceReport, SceneReport};
use crate::geometry::face_label;
use colored::*;
use std::time::Duration;

const NO_MESHES: &str = "No mesh present in the scene";

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report duplicate mesh pairs given as labels, out of `mesh_count` scanned meshes
    pub fn report_duplicate_meshes(
        pairs: &[(String, String)],
        mesh_count: usize,
        tolerance: f64,
        duration: Duration,
    ) {
        Self::header("Duplicate Meshes", tolerance);

        if let Some(message) = Self::mesh_status(mesh_count, pairs.len()) {
            Self::success(message);
        } else {
            for (first, second) in pairs {
                println!("  {}", "Duplicate Mesh detected".yellow().bold());
                println!("    {}", first.cyan());
                println!("    {}", second.cyan());
            }
            println!("\n  {} {}", "Pairs:".bright_black(), pairs.len().to_string().yellow());
        }

        Self::footer(duration);
    }

    /// Report duplicate faces for each scanned mesh
    pub fn report_duplicate_faces(reports: &[(String, FaceReport)], tolerance: f64, duration: Duration) {
        Self::header("Duplicate Faces", tolerance);

        let mut found = 0;
        for (label, report) in reports {
            for invalid in &report.invalid {
                Self::report_warning(&format!(
                    "{} references missing vertex {}",
                    face_label(label, invalid.polygon),
                    invalid.vertex
                ));
            }

            if report.matches.is_empty() {
                continue;
            }
            found += report.matches.len();

            println!("  {} {}", "Duplicate Faces detected in".yellow().bold(), label.cyan());
            for pair in &report.matches {
                println!(
                    "    {} {} {}",
                    face_label(label, *pair.first()),
                    "↔".bright_black(),
                    face_label(label, *pair.second())
                );
            }
        }

        if let Some(message) = Self::face_status(reports.len(), found) {
            Self::success(message);
        } else {
            println!("\n  {} {}", "Pairs:".bright_black(), found.to_string().yellow());
        }

        Self::footer(duration);
    }

    /// Report a full scene scan
    pub fn report_scan(report: &SceneReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{}", "Scene Scan".bold());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Mesh count:".bright_black(),
            report.meshes_scanned.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Polygon count:".bright_black(),
            report.polygons_scanned.to_string().cyan()
        );
        println!(
            "  {} {} / {}",
            "Tolerance:".bright_black(),
            format!("{}", report.mesh_tolerance).cyan(),
            format!("{}", report.face_tolerance).cyan()
        );

        if report.meshes_scanned == 0 {
            Self::success(NO_MESHES);
            Self::footer(duration);
            return;
        }

        println!("\n{}", "Duplicate meshes:".bold());
        if let Some(message) = Self::mesh_status(report.meshes_scanned, report.duplicate_meshes.len()) {
            Self::success(message);
        }
        for group in &report.mesh_groups {
            println!("  {} {}", "•".yellow(), group.join(", ").cyan());
        }

        println!("\n{}", "Duplicate faces:".bold());
        if let Some(message) = Self::face_status(report.meshes_scanned, report.duplicate_face_pairs()) {
            Self::success(message);
        }
        for entry in &report.duplicate_faces {
            for invalid in &entry.invalid {
                Self::report_warning(&format!(
                    "{} references missing vertex {}",
                    face_label(&entry.mesh, invalid.polygon),
                    invalid.vertex
                ));
            }
            for group in &entry.groups {
                let faces: Vec<String> = group
                    .iter()
                    .map(|&face| face_label(&entry.mesh, face))
                    .collect();
                println!("  {} {}", "•".yellow(), faces.join(", "));
            }
        }

        Self::footer(duration);
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("  {} {}", "✅".green(), message.green());
    }

    fn header(title: &str, tolerance: f64) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {}",
            title.bold(),
            format!("(tolerance {})", tolerance).bright_black()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    fn footer(duration: Duration) {
        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Message for a mesh pass with nothing to list, if any
    fn mesh_status(mesh_count: usize, pairs: usize) -> Option<&'static str> {
        match (mesh_count, pairs) {
            (0, _) => Some(NO_MESHES),
            (_, 0) => Some("No duplicate meshes found"),
            _ => None,
        }
    }

    /// Message for a face pass with nothing to list, if any
    fn face_status(mesh_count: usize, pairs: usize) -> Option<&'static str> {
        match (mesh_count, pairs) {
            (0, _) => Some(NO_MESHES),
            (_, 0) => Some("No duplicate faces found"),
            _ => None,
        }
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
