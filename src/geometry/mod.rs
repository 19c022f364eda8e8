// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh snapshots and tolerance comparisons

mod bbox;
mod equivalence;
mod mesh;

pub use bbox::BoundingBox;
pub use equivalence::{
    point_sets_equivalent, point_sets_equivalent_with, points_equivalent, MatchStrategy,
};
pub use mesh::{face_label, MeshHandle, MeshId, PolyMesh, Polygon, VertexTable};
