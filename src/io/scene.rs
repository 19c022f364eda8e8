// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene snapshot import
//!
//! A scene file is JSON:
//!
//! ```json
//! { "meshes": [ { "label": "|body|bodyShape",
//!                 "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0]],
//!                 "polygons": [[0, 1, 2]],
//!                 "bbox": { "min": [0, 0, 0], "max": [1, 1, 0] },
//!                 "transform": [1, 0, 0, 0,  0, 1, 0, 0,  0, 0, 1, 0,  5, 0, 0, 1] } ] }
//! ```
//!
//! `bbox` and `transform` are optional. With a `transform` (16 floats,
//! column-major) the vertices and `bbox` are local and get mapped to world
//! space; without one they are already world space. A missing `bbox` is
//! computed from the world-space vertices.

use crate::error::{DetectError, DetectResult};
use crate::geometry::{BoundingBox, MeshHandle, MeshId, PolyMesh, Polygon, VertexTable};
use anyhow::{Context, Result};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneFile {
    meshes: Vec<MeshRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeshRecord {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    vertices: Vec<[f64; 3]>,
    #[serde(default)]
    polygons: Vec<Vec<usize>>,
    #[serde(default)]
    bbox: Option<BoxRecord>,
    #[serde(default)]
    transform: Option<[f64; 16]>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BoxRecord {
    min: [f64; 3],
    max: [f64; 3],
}

/// One mesh of a scene with its world-space box
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub mesh: PolyMesh,
    pub bbox: BoundingBox,
}

/// Read-only snapshot of the meshes to scan
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
}

impl Scene {
    pub fn new(meshes: Vec<SceneMesh>) -> Self {
        Self { meshes }
    }

    /// Build a scene from world-space meshes, boxing each from its vertices
    pub fn from_meshes(meshes: Vec<PolyMesh>) -> Self {
        Self::new(
            meshes
                .into_iter()
                .map(|mesh| {
                    let bbox = mesh.bounding_box();
                    SceneMesh { mesh, bbox }
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Handles in scene order; `MeshId(i)` is the i-th mesh
    pub fn mesh_handles(&self) -> Vec<MeshHandle> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, entry)| MeshHandle::new(MeshId(i), entry.mesh.label.clone(), entry.bbox))
            .collect()
    }

    pub fn get(&self, id: MeshId) -> Option<&SceneMesh> {
        self.meshes.get(id.0)
    }

    /// Display label for a mesh id, falling back to the id itself
    pub fn label(&self, id: MeshId) -> String {
        self.get(id)
            .map(|entry| entry.mesh.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Every mesh carrying `label`, in scene order; labels may repeat
    pub fn find_all(&self, label: &str) -> Vec<&SceneMesh> {
        self.meshes
            .iter()
            .filter(|entry| entry.mesh.label == label)
            .collect()
    }
}

/// Parse a scene from JSON text
pub fn parse_scene(source: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(source).context("Failed to parse scene JSON")?;
    let meshes = file
        .meshes
        .into_iter()
        .enumerate()
        .map(|(i, record)| to_scene_mesh(i, record))
        .collect::<DetectResult<Vec<_>>>()?;
    Ok(Scene::new(meshes))
}

/// Import a scene file
pub fn import_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read scene file: {:?}", path.as_ref()))?;
    parse_scene(&content).with_context(|| format!("Invalid scene file: {:?}", path.as_ref()))
}

fn to_scene_mesh(index: usize, record: MeshRecord) -> DetectResult<SceneMesh> {
    let label = record.label.unwrap_or_else(|| format!("mesh{}", index));

    let mut vertices = VertexTable::new(
        record
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect(),
    );
    let mut bbox = record
        .bbox
        .map(|b| BoundingBox::new(Point3::from(b.min), Point3::from(b.max)));

    if let Some(columns) = record.transform {
        if columns.iter().any(|v| !v.is_finite()) {
            return Err(DetectError::SceneFormat(format!(
                "mesh '{}' has a non-finite transform",
                label
            )));
        }
        let matrix = Matrix4::from_column_slice(&columns);
        vertices.transform(&matrix);
        bbox = bbox.map(|b| b.transform_corners(&matrix));
    }

    let polygons = record.polygons.into_iter().map(Polygon::new).collect();
    let mesh = PolyMesh::new(label, polygons, vertices);
    let bbox = bbox.unwrap_or_else(|| mesh.bounding_box());

    Ok(SceneMesh { mesh, bbox })
}
