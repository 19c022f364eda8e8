// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Duplicate face detection within a single mesh
//!
//! Two faces are duplicates when their vertex positions can be paired up
//! one-to-one within tolerance. Winding and starting vertex are ignored.
//! A run resolves every polygon once, then compares all O(p²) polygon pairs,
//! each pair costing O(v²) point tests for v-gons.

use super::{DetectionConfig, MatchSet};
use crate::error::{DetectError, DetectResult};
use crate::geometry::{point_sets_equivalent_with, MatchStrategy, PolyMesh};
use nalgebra::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A polygon that could not be resolved to positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidPolygon {
    /// Index of the polygon within its mesh
    pub polygon: usize,
    /// First vertex index missing from the vertex table
    pub vertex: usize,
}

/// Outcome of a duplicate face scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceReport {
    /// Pairs of polygon indices with equivalent vertex positions
    pub matches: MatchSet<usize>,
    /// Polygons skipped because they reference missing vertices
    pub invalid: Vec<InvalidPolygon>,
}

impl FaceReport {
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty() && self.invalid.is_empty()
    }
}

/// Finds faces of one mesh that sit on top of each other
#[derive(Debug, Clone)]
pub struct DuplicateFaceDetector {
    tolerance: f64,
    strategy: MatchStrategy,
    parallel: bool,
}

impl DuplicateFaceDetector {
    pub fn new(config: &DetectionConfig) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self {
            tolerance: config.face_tolerance,
            strategy: config.strategy,
            parallel: config.parallel,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Scan a mesh, skipping polygons that reference missing vertices
    #[instrument(skip(self, mesh), fields(mesh = %mesh.label, polygons = mesh.polygon_count()))]
    pub fn detect(&self, mesh: &PolyMesh) -> FaceReport {
        let mut invalid = Vec::new();
        let mut resolved = Vec::with_capacity(mesh.polygon_count());

        for index in 0..mesh.polygon_count() {
            match mesh.resolve_polygon(index) {
                Ok(points) => resolved.push(Some(points)),
                Err(DetectError::InvalidVertexIndex { polygon, vertex, .. }) => {
                    warn!(mesh = %mesh.label, polygon, vertex, "polygon references missing vertex");
                    invalid.push(InvalidPolygon { polygon, vertex });
                    resolved.push(None);
                }
                Err(other) => {
                    warn!(mesh = %mesh.label, polygon = index, error = %other, "polygon skipped");
                    resolved.push(None);
                }
            }
        }

        let matches = self.compare_all(&mesh.label, &resolved);

        info!(
            mesh = %mesh.label,
            polygons = mesh.polygon_count(),
            duplicate_pairs = matches.len(),
            invalid_polygons = invalid.len(),
            tolerance = self.tolerance,
            "duplicate face scan complete"
        );

        FaceReport { matches, invalid }
    }

    /// Scan a mesh, failing on the first polygon with a missing vertex
    pub fn detect_strict(&self, mesh: &PolyMesh) -> DetectResult<MatchSet<usize>> {
        let resolved = (0..mesh.polygon_count())
            .map(|index| mesh.resolve_polygon(index).map(Some))
            .collect::<DetectResult<Vec<_>>>()?;

        Ok(self.compare_all(&mesh.label, &resolved))
    }

    /// Are these two point sets the same face?
    pub fn is_duplicate(&self, a: &[Point3<f64>], b: &[Point3<f64>]) -> bool {
        point_sets_equivalent_with(a, b, self.tolerance, self.strategy)
    }

    fn compare_all(&self, label: &str, resolved: &[Option<Vec<Point3<f64>>>]) -> MatchSet<usize> {
        if self.parallel {
            (0..resolved.len())
                .into_par_iter()
                .flat_map_iter(|i| self.matches_after(label, resolved, i))
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            (0..resolved.len())
                .flat_map(|i| self.matches_after(label, resolved, i))
                .collect()
        }
    }

    fn matches_after<'a>(
        &'a self,
        label: &'a str,
        resolved: &'a [Option<Vec<Point3<f64>>>],
        i: usize,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let a = resolved[i].as_deref();
        resolved
            .iter()
            .enumerate()
            .skip(i + 1)
            .filter_map(move |(j, b)| {
                let (a, b) = (a?, b.as_deref()?);
                self.is_duplicate(a, b).then(|| {
                    debug!(mesh = label, first = i, second = j, "duplicate face detected");
                    (i, j)
                })
            })
    }
}

impl Default for DuplicateFaceDetector {
    fn default() -> Self {
        let config = DetectionConfig::default();
        Self {
            tolerance: config.face_tolerance,
            strategy: config.strategy,
            parallel: config.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Polygon, VertexTable};

    /// Two coincident quads (one reversed), a triangle and an offset quad
    fn stacked_mesh() -> PolyMesh {
        PolyMesh::new(
            "|stack|stackShape",
            vec![
                Polygon::new(vec![0, 1, 2, 3]),
                Polygon::new(vec![7, 6, 5, 4]),
                Polygon::new(vec![0, 1, 2]),
                Polygon::new(vec![8, 9, 10, 11]),
            ],
            VertexTable::new(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0005),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(0.0, 1.0, 1.0),
            ]),
        )
    }

    #[test]
    fn test_reversed_quad_detected() {
        let report = DuplicateFaceDetector::default().detect(&stacked_mesh());
        assert_eq!(report.matches.len(), 1);
        assert!(report.matches.contains(&0, &1));
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_triple_duplicates_report_every_pair() {
        let mut mesh = stacked_mesh();
        mesh.polygons.push(Polygon::new(vec![3, 2, 1, 0]));

        let report = DuplicateFaceDetector::default().detect(&mesh);
        assert_eq!(report.matches.len(), 3);
        assert!(report.matches.contains(&0, &4));
        assert!(report.matches.contains(&1, &4));
        assert_eq!(report.matches.groups(), vec![vec![0, 1, 4]]);
    }

    #[test]
    fn test_missing_vertex_is_skipped_and_recorded() {
        let mut mesh = stacked_mesh();
        mesh.polygons.push(Polygon::new(vec![0, 1, 2, 40]));

        let report = DuplicateFaceDetector::default().detect(&mesh);
        assert_eq!(report.invalid, vec![InvalidPolygon { polygon: 4, vertex: 40 }]);
        assert_eq!(report.matches.len(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_strict_fails_fast() {
        let mut mesh = stacked_mesh();
        mesh.polygons.push(Polygon::new(vec![99]));

        let err = DuplicateFaceDetector::default().detect_strict(&mesh).unwrap_err();
        assert!(matches!(err, DetectError::InvalidVertexIndex { polygon: 4, vertex: 99, .. }));
    }

    #[test]
    fn test_empty_polygons_only_match_each_other() {
        let mesh = PolyMesh::new(
            "empty",
            vec![Polygon::default(), Polygon::new(vec![0]), Polygon::default()],
            VertexTable::new(vec![Point3::origin()]),
        );

        let report = DuplicateFaceDetector::default().detect(&mesh);
        assert_eq!(report.matches.len(), 1);
        assert!(report.matches.contains(&0, &2));
    }

    #[test]
    fn test_tight_tolerance_rejects_offset_vertex() {
        let config = DetectionConfig {
            face_tolerance: 0.0001,
            ..Default::default()
        };
        let report = DuplicateFaceDetector::new(&config).unwrap().detect(&stacked_mesh());
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_report_from_json_keeps_pairs_queryable() {
        let report: FaceReport =
            serde_json::from_str(r#"{"matches":[{"first":1,"second":0}],"invalid":[]}"#).unwrap();
        assert!(report.matches.contains(&0, &1));
        assert!(!report.is_clean());

        let degenerate = r#"{"matches":[{"first":2,"second":2}],"invalid":[]}"#;
        assert!(serde_json::from_str::<FaceReport>(degenerate).is_err());
    }
}
