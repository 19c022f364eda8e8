// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Dupes
//!
//! Finds duplicate geometry in a polygon scene snapshot:
//! meshes whose world-space bounding boxes coincide, and faces of a mesh
//! whose vertex positions coincide, both under a per-axis tolerance.

pub mod cli;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod io;

pub use detect::{
    scan_scene, DetectionConfig, DuplicateFaceDetector, DuplicateMeshDetector, FaceReport,
    MatchPair, MatchSet, SceneReport, DEFAULT_FACE_TOLERANCE, DEFAULT_MESH_TOLERANCE,
};
pub use error::{DetectError, DetectResult};
pub use geometry::{face_label, BoundingBox, MatchStrategy, MeshHandle, MeshId, PolyMesh, Polygon, VertexTable};
pub use io::{import_scene, parse_scene, Scene};

use anyhow::Result;

/// Scan a scene file with the default tolerances
pub fn scan_file(path: &str) -> Result<SceneReport> {
    let scene = import_scene(path)?;
    scan_scene(&scene, &DetectionConfig::default())
}
