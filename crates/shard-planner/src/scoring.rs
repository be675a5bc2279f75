// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-shard scoring of an arriving node.
//!
//! # Linear Deterministic Greedy
//!
//! ```text
//! intersect[s] = |{ v in neighbors : shard(v) == s }|
//! penalty(s)   = 1 - occupancy[s] / capacity
//! score[s]     = intersect[s] * penalty(s)
//! ```
//!
//! The penalty turns negative once a shard passes its capacity target, so a
//! full shard with many neighbors actively repels further nodes instead of
//! merely attracting them less. Nothing here forbids a placement; that is
//! decided by candidate selection in the assigner.

use crate::AssignmentStore;
use graph_source::NodeId;

/// Computes one score per shard for a node about to be placed.
///
/// Implementations must return exactly `store.num_shards()` values and must
/// not depend on anything but their arguments, so a run is reproducible
/// from its arrival order and tie-break seed.
pub trait ScoringPolicy: Send + Sync {
    /// Human-readable name of this policy.
    fn name(&self) -> &str;

    /// Scores every shard for a node with the given neighbor set.
    fn score(&self, neighbors: &[NodeId], store: &AssignmentStore, capacity: f64) -> Vec<f64>;
}

/// Neighbor count discounted by a linear capacity penalty.
///
/// A shard holding none of the neighbors scores exactly `0.0`, whatever its
/// occupancy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDeterministic;

impl LinearDeterministic {
    pub fn new() -> Self {
        Self
    }
}

impl ScoringPolicy for LinearDeterministic {
    fn name(&self) -> &str {
        "linear-deterministic-greedy"
    }

    fn score(&self, neighbors: &[NodeId], store: &AssignmentStore, capacity: f64) -> Vec<f64> {
        intersections(neighbors, store)
            .into_iter()
            .zip(store.occupancy())
            .map(|(hits, &occupancy)| match hits {
                0 => 0.0,
                hits => hits as f64 * penalty(occupancy, capacity),
            })
            .collect()
    }
}

/// Counts, per shard, how many of `neighbors` are already placed there.
///
/// Unplaced neighbors are skipped. Repeated neighbors count once per
/// occurrence.
pub fn intersections(neighbors: &[NodeId], store: &AssignmentStore) -> Vec<usize> {
    let mut hits = vec![0usize; store.num_shards()];
    for shard in neighbors.iter().filter_map(|&n| store.shard_of(n)) {
        hits[shard] += 1;
    }
    hits
}

/// `1 - occupancy / capacity`; reaches zero at capacity and goes negative
/// beyond it.
pub fn penalty(occupancy: usize, capacity: f64) -> f64 {
    1.0 - occupancy as f64 / capacity
}
