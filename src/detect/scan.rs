// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Whole-scene scan: duplicate meshes across the scene, duplicate faces per mesh

use super::{DetectionConfig, DuplicateFaceDetector, DuplicateMeshDetector, InvalidPolygon};
use crate::geometry::face_label;
use crate::io::Scene;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Two meshes found to be duplicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPairEntry {
    pub first: String,
    pub second: String,
}

/// Duplicate faces found in one mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshFaceEntry {
    pub mesh: String,
    pub pairs: Vec<[usize; 2]>,
    pub groups: Vec<Vec<usize>>,
    pub invalid: Vec<InvalidPolygon>,
}

impl MeshFaceEntry {
    /// Face labels in `<mesh>.f[<index>]` form for every duplicate face
    pub fn face_labels(&self) -> Vec<String> {
        let mut faces: Vec<usize> = self.pairs.iter().flatten().copied().collect();
        faces.sort_unstable();
        faces.dedup();
        faces
            .into_iter()
            .map(|face| face_label(&self.mesh, face))
            .collect()
    }
}

/// Results of a full scene scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneReport {
    pub mesh_tolerance: f64,
    pub face_tolerance: f64,
    pub meshes_scanned: usize,
    pub polygons_scanned: usize,
    pub duplicate_meshes: Vec<MeshPairEntry>,
    pub mesh_groups: Vec<Vec<String>>,
    /// Only meshes with duplicate or invalid faces are listed
    pub duplicate_faces: Vec<MeshFaceEntry>,
}

impl SceneReport {
    pub fn duplicate_face_pairs(&self) -> usize {
        self.duplicate_faces.iter().map(|entry| entry.pairs.len()).sum()
    }

    pub fn invalid_polygons(&self) -> usize {
        self.duplicate_faces.iter().map(|entry| entry.invalid.len()).sum()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_meshes.is_empty() || self.duplicate_face_pairs() > 0
    }
}

/// Run the mesh pass over the whole scene and the face pass on every mesh
pub fn scan_scene(scene: &Scene, config: &DetectionConfig) -> Result<SceneReport> {
    let mesh_detector = DuplicateMeshDetector::new(config)?;
    let face_detector = DuplicateFaceDetector::new(config)?;

    let mesh_matches = mesh_detector.detect(&scene.mesh_handles());
    let duplicate_meshes = mesh_matches
        .iter()
        .map(|pair| MeshPairEntry {
            first: scene.label(*pair.first()),
            second: scene.label(*pair.second()),
        })
        .collect();
    let mesh_groups = mesh_matches
        .groups()
        .into_iter()
        .map(|group| group.into_iter().map(|id| scene.label(id)).collect())
        .collect();

    let mut duplicate_faces = Vec::new();
    let mut polygons_scanned = 0;
    for entry in &scene.meshes {
        if entry.mesh.polygons.is_empty() {
            continue;
        }
        polygons_scanned += entry.mesh.polygon_count();

        let report = face_detector.detect(&entry.mesh);
        if report.is_clean() {
            continue;
        }
        duplicate_faces.push(MeshFaceEntry {
            mesh: entry.mesh.label.clone(),
            pairs: report
                .matches
                .iter()
                .map(|pair| [*pair.first(), *pair.second()])
                .collect(),
            groups: report.matches.groups(),
            invalid: report.invalid,
        });
    }

    let report = SceneReport {
        mesh_tolerance: config.mesh_tolerance,
        face_tolerance: config.face_tolerance,
        meshes_scanned: scene.len(),
        polygons_scanned,
        duplicate_meshes,
        mesh_groups,
        duplicate_faces,
    };

    info!(
        meshes = report.meshes_scanned,
        polygons = report.polygons_scanned,
        duplicate_meshes = report.duplicate_meshes.len(),
        duplicate_faces = report.duplicate_face_pairs(),
        "scene scan complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PolyMesh, Polygon, VertexTable};
    use nalgebra::Point3;

    fn cube_corners(offset: f64) -> VertexTable {
        VertexTable::new(vec![
            Point3::new(offset, 0.0, 0.0),
            Point3::new(offset + 1.0, 0.0, 0.0),
            Point3::new(offset + 1.0, 1.0, 0.0),
            Point3::new(offset, 1.0, 0.0),
            Point3::new(offset, 0.0, 1.0),
            Point3::new(offset + 1.0, 1.0, 1.0),
        ])
    }

    #[test]
    fn test_scan_combines_both_passes() {
        let scene = Scene::from_meshes(vec![
            PolyMesh::new(
                "|a|aShape",
                vec![Polygon::new(vec![0, 1, 2, 3]), Polygon::new(vec![3, 2, 1, 0])],
                cube_corners(0.0),
            ),
            PolyMesh::new("|b|bShape", vec![Polygon::new(vec![0, 1, 2])], cube_corners(0.0)),
            PolyMesh::new("|c|cShape", vec![], cube_corners(4.0)),
        ]);

        let report = scan_scene(&scene, &DetectionConfig::default()).unwrap();

        assert_eq!(report.meshes_scanned, 3);
        assert_eq!(report.polygons_scanned, 3);
        assert_eq!(
            report.duplicate_meshes,
            vec![MeshPairEntry {
                first: "|a|aShape".into(),
                second: "|b|bShape".into(),
            }]
        );
        assert_eq!(report.duplicate_faces.len(), 1);
        assert_eq!(report.duplicate_faces[0].pairs, vec![[0, 1]]);
        assert_eq!(
            report.duplicate_faces[0].face_labels(),
            vec!["|a|aShape.f[0]".to_string(), "|a|aShape.f[1]".to_string()]
        );
        assert!(report.has_duplicates());
    }

    #[test]
    fn test_scan_empty_scene() {
        let report = scan_scene(&Scene::default(), &DetectionConfig::default()).unwrap();
        assert!(!report.has_duplicates());
        assert_eq!(report.meshes_scanned, 0);
    }
}
