// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Assignment state and its exportable snapshot.
//!
//! [`AssignmentStore`] is the mutable, append-only record owned by one
//! assigner. [`Assignment`] is the immutable snapshot handed to exporters
//! once (or while) a run completes.

use crate::{AssignError, ShardConfig, ShardId};
use graph_source::NodeId;
use std::collections::{HashMap, HashSet};

/// Append-only node → shard mapping with per-shard occupancy.
///
/// Invariant: `occupancy.iter().sum() == len()` after every operation.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    shard_of: HashMap<NodeId, ShardId>,
    occupancy: Vec<usize>,
    /// Nodes in the order they were placed.
    arrivals: Vec<NodeId>,
}

impl AssignmentStore {
    /// Creates an empty store for `num_shards` shards.
    pub fn new(num_shards: usize) -> Self {
        Self {
            shard_of: HashMap::new(),
            occupancy: vec![0; num_shards],
            arrivals: Vec::new(),
        }
    }

    pub fn num_shards(&self) -> usize {
        self.occupancy.len()
    }

    /// Number of nodes placed so far.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.shard_of.contains_key(&node)
    }

    /// Returns the shard that owns `node`, if it has been placed.
    pub fn shard_of(&self, node: NodeId) -> Option<ShardId> {
        self.shard_of.get(&node).copied()
    }

    /// Current node count per shard.
    pub fn occupancy(&self) -> &[usize] {
        &self.occupancy
    }

    /// Iterates `(node, shard)` pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, ShardId)> + '_ {
        self.arrivals.iter().map(|n| (*n, self.shard_of[n]))
    }

    /// Records a placement. Fails without side effects if the node is
    /// already placed.
    pub(crate) fn record(&mut self, node: NodeId, shard: ShardId) -> Result<(), AssignError> {
        if shard >= self.occupancy.len() {
            return Err(AssignError::ShardOutOfRange {
                shard,
                num_shards: self.occupancy.len(),
            });
        }
        if let Some(existing) = self.shard_of(node) {
            return Err(AssignError::DuplicateAssignment {
                node,
                shard: existing,
            });
        }
        self.shard_of.insert(node, shard);
        self.occupancy[shard] += 1;
        self.arrivals.push(node);
        Ok(())
    }

    /// Copies the current state into an exportable [`Assignment`].
    pub fn snapshot(&self, config: &ShardConfig) -> Assignment {
        Assignment {
            num_shards: self.num_shards(),
            capacity: config.capacity(),
            occupancy: self.occupancy.clone(),
            assignments: self
                .iter()
                .map(|(node, shard)| AssignmentRecord { node, shard })
                .collect(),
        }
    }
}

/// One placement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentRecord {
    pub node: NodeId,
    pub shard: ShardId,
}

/// Immutable result of a partitioning run, in placement order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Assignment {
    pub num_shards: usize,
    pub capacity: f64,
    pub occupancy: Vec<usize>,
    pub assignments: Vec<AssignmentRecord>,
}

impl Assignment {
    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Builds a lookup table from node to shard.
    pub fn to_map(&self) -> HashMap<NodeId, ShardId> {
        self.assignments.iter().map(|r| (r.node, r.shard)).collect()
    }

    /// Nodes owned by `shard`, in placement order.
    pub fn members(&self, shard: ShardId) -> impl Iterator<Item = NodeId> + '_ {
        self.assignments
            .iter()
            .filter(move |r| r.shard == shard)
            .map(|r| r.node)
    }

    /// Checks internal consistency, mainly for snapshots read back from disk.
    ///
    /// Checks:
    /// - `occupancy` has one entry per shard.
    /// - Every shard index is in range.
    /// - No node appears twice.
    /// - Occupancy matches the per-shard record counts.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.occupancy.len() != self.num_shards {
            return Err(AssignError::InvalidConfiguration(format!(
                "occupancy has {} entries for {} shards",
                self.occupancy.len(),
                self.num_shards,
            )));
        }

        let mut counts = vec![0usize; self.num_shards];
        let mut seen = HashSet::with_capacity(self.assignments.len());
        for record in &self.assignments {
            if record.shard >= self.num_shards {
                return Err(AssignError::InvalidConfiguration(format!(
                    "node {} assigned to shard {} but only {} shards exist",
                    record.node, record.shard, self.num_shards,
                )));
            }
            if !seen.insert(record.node) {
                return Err(AssignError::DuplicateAssignment {
                    node: record.node,
                    shard: record.shard,
                });
            }
            counts[record.shard] += 1;
        }

        if counts != self.occupancy {
            return Err(AssignError::InvalidConfiguration(format!(
                "occupancy {:?} does not match assignments {:?}",
                self.occupancy, counts,
            )));
        }
        Ok(())
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        let max = self.occupancy.iter().copied().max().unwrap_or(0);
        format!(
            "Assignment: {} nodes over {} shards, capacity {:.1}, max occupancy {} ({:.0}% of capacity), occupancy {:?}",
            self.len(),
            self.num_shards,
            self.capacity,
            max,
            max as f64 / self.capacity * 100.0,
            self.occupancy,
        )
    }
}
