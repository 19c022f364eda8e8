// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Match pairs and match sets

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unordered pair of items known to be equivalent
///
/// Members are stored smallest first, so `(a, b)` and `(b, a)` are the same pair.
/// Deserialized pairs go through [`MatchPair::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "PairRecord<T>",
    bound(deserialize = "T: Ord + Deserialize<'de>")
)]
pub struct MatchPair<T> {
    first: T,
    second: T,
}

/// Serialized form of a pair, before normalization
#[derive(Deserialize)]
struct PairRecord<T> {
    first: T,
    second: T,
}

impl<T: Ord> TryFrom<PairRecord<T>> for MatchPair<T> {
    type Error = &'static str;

    fn try_from(record: PairRecord<T>) -> Result<Self, Self::Error> {
        MatchPair::new(record.first, record.second).ok_or("an item cannot be matched with itself")
    }
}

impl<T: Ord> MatchPair<T> {
    /// Create a pair; an item cannot be paired with itself
    pub fn new(a: T, b: T) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> &T {
        &self.first
    }

    pub fn second(&self) -> &T {
        &self.second
    }

    pub fn contains(&self, item: &T) -> bool {
        &self.first == item || &self.second == item
    }

    /// The other member of the pair, if `item` is one of them
    pub fn partner(&self, item: &T) -> Option<&T> {
        if &self.first == item {
            Some(&self.second)
        } else if &self.second == item {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Ordered set of match pairs, each unordered pair stored once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet<T: Ord> {
    pairs: BTreeSet<MatchPair<T>>,
}

impl<T: Ord + Clone> MatchSet<T> {
    pub fn new() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Record a match; returns false if the pair was already present or degenerate
    pub fn insert(&mut self, a: T, b: T) -> bool {
        match MatchPair::new(a, b) {
            Some(pair) => self.pairs.insert(pair),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, a: &T, b: &T) -> bool {
        match MatchPair::new(a.clone(), b.clone()) {
            Some(pair) => self.pairs.contains(&pair),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchPair<T>> {
        self.pairs.iter()
    }

    /// Every item that takes part in at least one match, ascending
    pub fn members(&self) -> Vec<T> {
        let members: BTreeSet<&T> = self
            .pairs
            .iter()
            .flat_map(|pair| [&pair.first, &pair.second])
            .collect();
        members.into_iter().cloned().collect()
    }

    /// Merge pairs into equivalence classes (transitive closure)
    ///
    /// Each group is sorted ascending and groups are ordered by their
    /// smallest member.
    pub fn groups(&self) -> Vec<Vec<T>> {
        let members = self.members();
        let index: BTreeMap<&T, usize> = members.iter().enumerate().map(|(i, m)| (m, i)).collect();

        let mut sets = UnionFind::new(members.len());
        for pair in &self.pairs {
            sets.union(index[&pair.first], index[&pair.second]);
        }

        let mut by_root: AHashMap<usize, Vec<T>> = AHashMap::new();
        let mut order = Vec::new();
        for (i, member) in members.iter().enumerate() {
            let root = sets.find(i);
            by_root
                .entry(root)
                .or_insert_with(|| {
                    order.push(root);
                    Vec::new()
                })
                .push(member.clone());
        }

        order
            .into_iter()
            .filter_map(|root| by_root.remove(&root))
            .collect()
    }

    /// Relabel every member, e.g. mesh ids to display labels
    pub fn map<U: Ord + Clone>(&self, mut f: impl FnMut(&T) -> U) -> MatchSet<U> {
        let mut mapped = MatchSet::new();
        for pair in &self.pairs {
            mapped.insert(f(&pair.first), f(&pair.second));
        }
        mapped
    }
}

impl<T: Ord + Clone> Default for MatchSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Extend<(T, T)> for MatchSet<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (a, b) in iter {
            self.insert(a, b);
        }
    }
}

impl<T: Ord + Clone> FromIterator<(T, T)> for MatchSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: Ord> IntoIterator for &'a MatchSet<T> {
    type Item = &'a MatchPair<T>;
    type IntoIter = std::collections::btree_set::Iter<'a, MatchPair<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Disjoint-set forest with path compression and union by rank
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }
}
