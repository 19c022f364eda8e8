// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for duplicate detection

use thiserror::Error;

/// Result type for detection operations.
pub type DetectResult<T> = Result<T, DetectError>;

/// Errors that can occur while preparing or running a detection pass.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DetectError {
    /// A polygon references a vertex that is not in the vertex table.
    #[error("polygon {polygon} references vertex {vertex} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// Index of the offending polygon.
        polygon: usize,
        /// The missing vertex index.
        vertex: usize,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A tolerance was negative or not finite.
    #[error("invalid {name} tolerance: {value}")]
    InvalidTolerance {
        /// Which tolerance was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Scene data could not be turned into detector input.
    #[error("malformed scene: {0}")]
    SceneFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DetectError::InvalidVertexIndex {
            polygon: 3,
            vertex: 12,
            vertex_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "polygon 3 references vertex 12 (mesh has 8 vertices)"
        );

        let err = DetectError::InvalidTolerance {
            name: "face",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "invalid face tolerance: -1");
    }
}
