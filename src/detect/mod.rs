// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Duplicate detection - mesh and face detectors, match sets, scene scan

mod config;
mod face;
mod matches;
mod mesh;
mod scan;

pub use config::{DetectionConfig, CONFIG_FILE_NAME, DEFAULT_FACE_TOLERANCE, DEFAULT_MESH_TOLERANCE};
pub use face::{DuplicateFaceDetector, FaceReport, InvalidPolygon};
pub use matches::{MatchPair, MatchSet};
pub use mesh::DuplicateMeshDetector;
pub use scan::{scan_scene, MeshFaceEntry, MeshPairEntry, SceneReport};
