// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Duplicate mesh detection by world-space bounding box

use super::{DetectionConfig, MatchSet};
use crate::error::DetectResult;
use crate::geometry::{MeshHandle, MeshId};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// Finds meshes whose bounding boxes coincide within tolerance
///
/// Every unordered pair is compared once, so a run costs O(n²) box tests.
#[derive(Debug, Clone)]
pub struct DuplicateMeshDetector {
    tolerance: f64,
    parallel: bool,
}

impl DuplicateMeshDetector {
    pub fn new(config: &DetectionConfig) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self {
            tolerance: config.mesh_tolerance,
            parallel: config.parallel,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compare every pair of meshes and collect the matching ones
    #[instrument(skip(self, meshes), fields(mesh_count = meshes.len()))]
    pub fn detect(&self, meshes: &[MeshHandle]) -> MatchSet<MeshId> {
        let matches: MatchSet<MeshId> = if self.parallel {
            (0..meshes.len())
                .into_par_iter()
                .flat_map_iter(|i| self.matches_after(meshes, i))
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            (0..meshes.len())
                .flat_map(|i| self.matches_after(meshes, i))
                .collect()
        };

        info!(
            mesh_count = meshes.len(),
            duplicate_pairs = matches.len(),
            tolerance = self.tolerance,
            "duplicate mesh scan complete"
        );

        matches
    }

    /// Is this pair of meshes a duplicate?
    pub fn is_duplicate(&self, a: &MeshHandle, b: &MeshHandle) -> bool {
        a.bbox.approx_eq(&b.bbox, self.tolerance)
    }

    /// Matches between mesh `i` and every mesh after it
    fn matches_after<'a>(
        &'a self,
        meshes: &'a [MeshHandle],
        i: usize,
    ) -> impl Iterator<Item = (MeshId, MeshId)> + 'a {
        let a = &meshes[i];
        meshes[i + 1..]
            .iter()
            .filter(move |b| self.is_duplicate(a, b))
            .map(move |b| {
                debug!(first = %a.label, second = %b.label, "duplicate mesh detected");
                (a.id, b.id)
            })
    }
}

impl Default for DuplicateMeshDetector {
    fn default() -> Self {
        let config = DetectionConfig::default();
        Self {
            tolerance: config.mesh_tolerance,
            parallel: config.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use nalgebra::Point3;

    fn unit_box(id: usize, offset: f64) -> MeshHandle {
        MeshHandle::new(
            MeshId(id),
            format!("|mesh{}", id),
            BoundingBox::new(
                Point3::new(offset, 0.0, 0.0),
                Point3::new(offset + 1.0, 1.0, 1.0),
            ),
        )
    }

    #[test]
    fn test_identical_boxes_match_once() {
        let detector = DuplicateMeshDetector::default();
        let matches = detector.detect(&[unit_box(0, 0.0), unit_box(1, 0.0)]);
        assert_eq!(matches.len(), 1);
        assert!(matches.contains(&MeshId(0), &MeshId(1)));
    }

    #[test]
    fn test_box_outside_tolerance() {
        let detector = DuplicateMeshDetector::default();
        let mut shifted = unit_box(1, 0.0);
        shifted.bbox.max.x += 0.02;
        assert!(detector.detect(&[unit_box(0, 0.0), shifted]).is_empty());
    }

    #[test]
    fn test_pairs_beyond_first_are_compared() {
        // Only meshes 2 and 3 coincide; a scan that stops after the first
        // outer index would miss them.
        let meshes = vec![
            unit_box(0, 0.0),
            unit_box(1, 5.0),
            unit_box(2, 10.0),
            unit_box(3, 10.0),
        ];
        let matches = DuplicateMeshDetector::default().detect(&meshes);
        assert_eq!(matches.len(), 1);
        assert!(matches.contains(&MeshId(2), &MeshId(3)));
    }

    #[test]
    fn test_empty_and_single_input() {
        let detector = DuplicateMeshDetector::default();
        assert!(detector.detect(&[]).is_empty());
        assert!(detector.detect(&[unit_box(0, 0.0)]).is_empty());
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let config = DetectionConfig {
            mesh_tolerance: -0.1,
            ..Default::default()
        };
        assert!(DuplicateMeshDetector::new(&config).is_err());
    }
}
