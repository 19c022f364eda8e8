// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh snapshots used as detector input

use super::BoundingBox;
use crate::error::{DetectError, DetectResult};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a mesh within one detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeshId(pub usize);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mesh reduced to what duplicate-mesh detection needs
///
/// Identity is the `id`; the label is only for reporting and may repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshHandle {
    pub id: MeshId,
    pub label: String,
    pub bbox: BoundingBox,
}

impl MeshHandle {
    pub fn new(id: MeshId, label: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            id,
            label: label.into(),
            bbox,
        }
    }

    /// Build a handle from a local-space box and the mesh's world matrix
    pub fn from_local(
        id: MeshId,
        label: impl Into<String>,
        local_bbox: &BoundingBox,
        world_matrix: &Matrix4<f64>,
    ) -> Self {
        Self::new(id, label, local_bbox.transform_corners(world_matrix))
    }
}

/// A face given as an ordered list of vertex indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<usize>,
}

impl Polygon {
    pub fn new(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl From<Vec<usize>> for Polygon {
    fn from(vertices: Vec<usize>) -> Self {
        Self::new(vertices)
    }
}

/// World-space vertex positions of one mesh, indexed by vertex id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexTable {
    positions: Vec<Point3<f64>>,
}

impl VertexTable {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.positions.get(index)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.positions.iter()
    }

    /// Apply a world matrix to every position
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for position in &mut self.positions {
            *position = matrix.transform_point(position);
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.positions)
    }
}

impl From<Vec<Point3<f64>>> for VertexTable {
    fn from(positions: Vec<Point3<f64>>) -> Self {
        Self::new(positions)
    }
}

/// Polygon mesh snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolyMesh {
    pub label: String,
    pub polygons: Vec<Polygon>,
    pub vertices: VertexTable,
}

impl PolyMesh {
    pub fn new(label: impl Into<String>, polygons: Vec<Polygon>, vertices: VertexTable) -> Self {
        Self {
            label: label.into(),
            polygons,
            vertices,
        }
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Compute bounding box from the vertex table
    pub fn bounding_box(&self) -> BoundingBox {
        self.vertices.bounding_box()
    }

    /// Handle for duplicate-mesh detection, boxed from the vertex table
    pub fn handle(&self, id: MeshId) -> MeshHandle {
        MeshHandle::new(id, self.label.clone(), self.bounding_box())
    }

    /// Look up the positions of a polygon's vertices, in polygon order
    pub fn resolve_polygon(&self, index: usize) -> DetectResult<Vec<Point3<f64>>> {
        let polygon = self.polygons.get(index).ok_or_else(|| {
            DetectError::SceneFormat(format!(
                "polygon {} out of range (mesh has {} polygons)",
                index,
                self.polygons.len()
            ))
        })?;

        polygon
            .vertices
            .iter()
            .map(|&vertex| {
                self.vertices
                    .get(vertex)
                    .copied()
                    .ok_or(DetectError::InvalidVertexIndex {
                        polygon: index,
                        vertex,
                        vertex_count: self.vertices.len(),
                    })
            })
            .collect()
    }

    /// Display name of a face, e.g. `|group|body.f[3]`
    pub fn face_label(&self, index: usize) -> String {
        face_label(&self.label, index)
    }
}

/// Face name in `<mesh>.f[<index>]` form
pub fn face_label(mesh: &str, index: usize) -> String {
    format!("{}.f[{}]", mesh, index)
}
