// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Duplicate face detection tests

use anyhow::Result;
use nalgebra::Point3;
use polyframe_dupes::geometry::{point_sets_equivalent, point_sets_equivalent_with};
use polyframe_dupes::{
    DetectError, DetectionConfig, DuplicateFaceDetector, MatchStrategy, PolyMesh, Polygon,
    VertexTable,
};

fn square() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]
}

/// A flat n×n grid of quads with every quad duplicated at the end
fn doubled_grid(n: usize) -> PolyMesh {
    let mut positions = Vec::new();
    for y in 0..=n {
        for x in 0..=n {
            positions.push(Point3::new(x as f64, y as f64, 0.0));
        }
    }

    let row = n + 1;
    let mut polygons = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let v = y * row + x;
            polygons.push(Polygon::new(vec![v, v + 1, v + row + 1, v + row]));
        }
    }
    let originals = polygons.len();
    for i in 0..originals {
        let mut reversed = polygons[i].vertices.clone();
        reversed.reverse();
        polygons.push(Polygon::new(reversed));
    }

    PolyMesh::new("|grid|gridShape", polygons, VertexTable::new(positions))
}

#[test]
fn test_square_matches_reversed_square() {
    let mut reversed = square();
    reversed.reverse();

    assert!(point_sets_equivalent(&square(), &reversed, 0.001));
}

#[test]
fn test_square_never_matches_triangle() {
    let quad = square();
    let triangle = &quad[..3];

    assert!(!point_sets_equivalent(&quad, triangle, 0.001));
    assert!(!point_sets_equivalent(&quad, triangle, 1000.0));
}

#[test]
fn test_first_fit_behavior_is_pinned() {
    // Three points on a line, each within tolerance of a neighbour.
    // First-fit hands b[0] to a[0] and leaves a[1] with nothing in reach.
    let a = vec![
        Point3::new(0.1, 0.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.2, 0.0, 0.0),
    ];
    let b = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.2, 0.0, 0.0),
        Point3::new(0.3, 0.0, 0.0),
    ];
    let tol = 0.15;

    assert!(!point_sets_equivalent(&a, &b, tol));
    // a[0]→b[1], a[1]→b[0], a[2]→b[2] is a valid pairing.
    assert!(point_sets_equivalent_with(&a, &b, tol, MatchStrategy::Bipartite));
}

#[test]
fn test_grid_duplicates_pair_with_their_partner() {
    let mesh = doubled_grid(4);
    let report = DuplicateFaceDetector::default().detect(&mesh);

    assert_eq!(report.matches.len(), 16);
    for i in 0..16 {
        assert!(report.matches.contains(&i, &(i + 16)), "face {} unmatched", i);
    }
    assert_eq!(report.matches.members().len(), 32);
    assert!(report.invalid.is_empty());
}

#[test]
fn test_triangle_and_quad_sharing_points_do_not_match() {
    let mesh = PolyMesh::new(
        "mixed",
        vec![Polygon::new(vec![0, 1, 2]), Polygon::new(vec![0, 1, 2, 2])],
        VertexTable::new(square()),
    );

    assert!(DuplicateFaceDetector::default().detect(&mesh).matches.is_empty());
}

#[test]
fn test_repeated_vertex_needs_repeated_partner() {
    // [p, p, q] against [p, q, q]: same size, every point has a neighbour,
    // but no one-to-one pairing exists.
    let mesh = PolyMesh::new(
        "degenerate",
        vec![Polygon::new(vec![0, 0, 1]), Polygon::new(vec![0, 1, 1])],
        VertexTable::new(square()),
    );

    for strategy in [MatchStrategy::FirstFit, MatchStrategy::Bipartite] {
        let config = DetectionConfig {
            strategy,
            ..Default::default()
        };
        let report = DuplicateFaceDetector::new(&config).unwrap().detect(&mesh);
        assert!(report.matches.is_empty(), "{:?}", strategy);
    }
}

#[test]
fn test_invalid_polygon_does_not_abort_scan() {
    let mut mesh = doubled_grid(2);
    mesh.polygons.push(Polygon::new(vec![0, 1, 500]));

    let report = DuplicateFaceDetector::default().detect(&mesh);
    assert_eq!(report.matches.len(), 4);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].polygon, 8);
    assert_eq!(report.invalid[0].vertex, 500);

    let strict = DuplicateFaceDetector::default().detect_strict(&mesh);
    assert!(matches!(strict, Err(DetectError::InvalidVertexIndex { polygon: 8, .. })));
}

#[test]
fn test_parallel_and_repeat_runs_agree() -> Result<()> {
    let mesh = doubled_grid(6);

    let sequential = DuplicateFaceDetector::default();
    let parallel = DuplicateFaceDetector::new(&DetectionConfig {
        parallel: true,
        ..Default::default()
    })?;

    let first = sequential.detect(&mesh);
    assert_eq!(first, sequential.detect(&mesh));
    assert_eq!(first, parallel.detect(&mesh));
    assert_eq!(first.matches, sequential.detect_strict(&mesh)?);
    Ok(())
}

#[test]
fn test_mesh_without_polygons() {
    let mesh = PolyMesh::new("empty", vec![], VertexTable::new(square()));
    let report = DuplicateFaceDetector::default().detect(&mesh);
    assert!(report.is_clean());
}
