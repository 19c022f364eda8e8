// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerance-based point and point-set equivalence
//!
//! Points are compared per axis: two points are equivalent when every
//! coordinate differs by at most `tol`. This is a box test, not a distance
//! test, so points up to `tol * sqrt(3)` apart diagonally still match.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// How to pair up the points of two sets when testing set equivalence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Each point takes the first unused equivalent point, in order.
    /// Order dependent; can miss a valid pairing when points cluster.
    #[default]
    FirstFit,
    /// Maximum bipartite matching over the equivalence graph.
    /// Finds a pairing whenever one exists.
    Bipartite,
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-fit" | "firstfit" | "greedy" => Ok(Self::FirstFit),
            "bipartite" | "optimal" => Ok(Self::Bipartite),
            other => Err(format!("unknown match strategy: {}", other)),
        }
    }
}

/// Check if two points are equivalent within a per-axis tolerance
pub fn points_equivalent(p: &Point3<f64>, q: &Point3<f64>, tol: f64) -> bool {
    (p.x - q.x).abs() <= tol && (p.y - q.y).abs() <= tol && (p.z - q.z).abs() <= tol
}

/// Check if two point sets are equivalent using greedy first-fit pairing
pub fn point_sets_equivalent(a: &[Point3<f64>], b: &[Point3<f64>], tol: f64) -> bool {
    point_sets_equivalent_with(a, b, tol, MatchStrategy::FirstFit)
}

/// Check if two point sets are equivalent using the given pairing strategy
pub fn point_sets_equivalent_with(
    a: &[Point3<f64>],
    b: &[Point3<f64>],
    tol: f64,
    strategy: MatchStrategy,
) -> bool {
    if a.len() != b.len() {
        return false;
    }

    match strategy {
        MatchStrategy::FirstFit => first_fit(a, b, tol),
        MatchStrategy::Bipartite => bipartite(a, b, tol),
    }
}

fn first_fit(a: &[Point3<f64>], b: &[Point3<f64>], tol: f64) -> bool {
    let mut remaining: Vec<&Point3<f64>> = b.iter().collect();

    for p in a {
        match remaining.iter().position(|q| points_equivalent(p, q, tol)) {
            Some(index) => {
                remaining.remove(index);
            }
            None => return false,
        }
    }

    remaining.is_empty()
}

fn bipartite(a: &[Point3<f64>], b: &[Point3<f64>], tol: f64) -> bool {
    let adjacency: Vec<Vec<usize>> = a
        .iter()
        .map(|p| {
            b.iter()
                .enumerate()
                .filter(|(_, q)| points_equivalent(p, q, tol))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    // Any point with no candidate rules out a perfect matching early.
    if adjacency.iter().any(|candidates| candidates.is_empty()) {
        return false;
    }

    let mut owner: Vec<Option<usize>> = vec![None; b.len()];
    for i in 0..a.len() {
        let mut visited = vec![false; b.len()];
        if !augment(i, &adjacency, &mut owner, &mut visited) {
            return false;
        }
    }

    true
}

/// Try to find an augmenting path starting from `i` (Kuhn's algorithm)
fn augment(
    i: usize,
    adjacency: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &j in &adjacency[i] {
        if visited[j] {
            continue;
        }
        visited[j] = true;

        let free = match owner[j] {
            None => true,
            Some(current) => augment(current, adjacency, owner, visited),
        };
        if free {
            owner[j] = Some(i);
            return true;
        }
    }
    false
}
