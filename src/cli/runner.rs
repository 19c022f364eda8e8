// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command runner: load a scene, run a detector, time it

use crate::detect::{
    scan_scene, DetectionConfig, DuplicateFaceDetector, DuplicateMeshDetector, FaceReport,
    MatchSet, SceneReport,
};
use crate::geometry::MeshId;
use crate::io::{self, Scene};
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Result of a duplicate mesh run
pub struct MeshRun {
    pub scene: Scene,
    pub matches: MatchSet<MeshId>,
    pub duration: Duration,
}

impl MeshRun {
    /// Matches as label pairs, in match order
    pub fn label_pairs(&self) -> Vec<(String, String)> {
        self.matches
            .iter()
            .map(|pair| (self.scene.label(*pair.first()), self.scene.label(*pair.second())))
            .collect()
    }
}

/// Result of a duplicate face run, one entry per scanned mesh
pub struct FaceRun {
    pub reports: Vec<(String, FaceReport)>,
    pub duration: Duration,
}

/// Result of a full scene scan
pub struct ScanRun {
    pub report: SceneReport,
    pub duration: Duration,
}

/// Runner for detection commands
pub struct Runner {
    config: DetectionConfig,
}

impl Runner {
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate().context("Invalid detection configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Find duplicate meshes in a scene file
    pub fn run_meshes(&self, input: &Path) -> Result<MeshRun> {
        let scene = io::import_scene(input)?;
        let start = Instant::now();

        let detector = DuplicateMeshDetector::new(&self.config)?;
        let matches = detector.detect(&scene.mesh_handles());

        Ok(MeshRun {
            scene,
            matches,
            duration: start.elapsed(),
        })
    }

    /// Find duplicate faces in every mesh of a scene file, or in the meshes with one label
    pub fn run_faces(&self, input: &Path, mesh_label: Option<&str>) -> Result<FaceRun> {
        let scene = io::import_scene(input)?;

        let targets: Vec<_> = match mesh_label {
            Some(label) => {
                let found = scene.find_all(label);
                if found.is_empty() {
                    bail!("Mesh not found in scene: {}", label);
                }
                found
            }
            None => scene.meshes.iter().collect(),
        };

        let start = Instant::now();
        let detector = DuplicateFaceDetector::new(&self.config)?;
        let reports = targets
            .into_iter()
            .map(|entry| (entry.mesh.label.clone(), detector.detect(&entry.mesh)))
            .collect();

        Ok(FaceRun {
            reports,
            duration: start.elapsed(),
        })
    }

    /// Run both passes over a scene file
    pub fn run_scan(&self, input: &Path) -> Result<ScanRun> {
        let scene = io::import_scene(input)?;
        let start = Instant::now();
        let report = scan_scene(&scene, &self.config)?;

        Ok(ScanRun {
            report,
            duration: start.elapsed(),
        })
    }
}
