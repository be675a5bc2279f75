// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Streaming linear deterministic greedy assignment.
//!
//! For each arriving node:
//!
//! ```text
//! 1. reject if already placed
//! 2. score[] = policy(neighbors, store, capacity)   // pre-placement state
//! 3. C = shards holding the running maximum, starting from best = 0
//! 4. C empty → NoEligibleShard (or least-loaded fallback if configured)
//! 5. |C| == 1 → that shard, otherwise tie-break on occupancy
//! 6. record, bump occupancy
//! ```
//!
//! Candidate selection starts its running maximum at zero, so a negative
//! score never becomes a candidate and a zero score only survives when no
//! shard scores above zero.
//!
//! # When to use
//! - Graphs too large to partition offline, or arriving incrementally.
//! - Placement must be decided once and never migrated.

use crate::scoring::{LinearDeterministic, ScoringPolicy};
use crate::strategy::PlacementStrategy;
use crate::tiebreak::TieBreaker;
use crate::{AssignError, Assignment, AssignmentStore, FallbackPolicy, ShardConfig, ShardId};
use graph_source::NodeId;

/// Owns the assignment state of one partitioning run.
///
/// # Example
/// ```
/// use graph_source::NodeId;
/// use shard_planner::{PartitionAssigner, ShardConfig, TieBreaker};
///
/// let config = ShardConfig::new(2, 2.0).unwrap();
/// let mut assigner = PartitionAssigner::new(config, TieBreaker::lowest_index()).unwrap();
///
/// let a = assigner.assign(NodeId::new(1), &[]).unwrap();
/// let b = assigner.assign(NodeId::new(2), &[NodeId::new(1)]).unwrap();
/// assert_eq!(a, b);
/// ```
pub struct PartitionAssigner {
    config: ShardConfig,
    store: AssignmentStore,
    scoring: Box<dyn ScoringPolicy>,
    tie_breaker: TieBreaker,
    fallback_placements: usize,
}

impl PartitionAssigner {
    /// Creates an assigner with [`LinearDeterministic`] scoring.
    pub fn new(config: ShardConfig, tie_breaker: TieBreaker) -> Result<Self, AssignError> {
        config.validate()?;
        tracing::debug!("partition assigner ready: {config}");
        Ok(Self {
            store: AssignmentStore::new(config.num_shards()),
            config,
            scoring: Box::new(LinearDeterministic),
            tie_breaker,
            fallback_placements: 0,
        })
    }

    /// Creates an assigner whose ties are drawn from a seeded generator.
    pub fn seeded(config: ShardConfig, seed: u64) -> Result<Self, AssignError> {
        Self::new(config, TieBreaker::seeded(seed))
    }

    /// Replaces the scoring policy. Only meaningful before the first
    /// placement.
    pub fn with_scoring(mut self, scoring: impl ScoringPolicy + 'static) -> Self {
        self.scoring = Box::new(scoring);
        self
    }

    /// Places `node` and returns its shard.
    ///
    /// On error the store is left untouched.
    pub fn assign(&mut self, node: NodeId, neighbors: &[NodeId]) -> Result<ShardId, AssignError> {
        if let Some(shard) = self.store.shard_of(node) {
            return Err(AssignError::DuplicateAssignment { node, shard });
        }

        let scores = self
            .scoring
            .score(neighbors, &self.store, self.config.capacity());
        if scores.len() != self.config.num_shards() {
            return Err(AssignError::InvalidConfiguration(format!(
                "scoring policy '{}' returned {} scores for {} shards",
                self.scoring.name(),
                scores.len(),
                self.config.num_shards(),
            )));
        }

        let mut candidates = select_candidates(&scores);
        let fell_back = candidates.is_empty();
        if fell_back {
            match self.config.fallback() {
                FallbackPolicy::Reject => {
                    tracing::debug!("node {node}: all scores negative {scores:?}");
                    return Err(AssignError::NoEligibleShard { node });
                }
                FallbackPolicy::LeastLoaded => {
                    tracing::warn!(
                        "node {node}: no eligible shard, falling back to least-loaded placement"
                    );
                    candidates = (0..self.config.num_shards()).collect();
                }
            }
        }

        let shard = match candidates.as_slice() {
            [only] => *only,
            _ => self
                .tie_breaker
                .resolve(&candidates, self.store.occupancy())?,
        };

        self.store.record(node, shard)?;
        if fell_back {
            self.fallback_placements += 1;
        }
        tracing::debug!(
            "node {node} → shard {shard} (scores {scores:?}, candidates {candidates:?})"
        );
        Ok(shard)
    }

    /// Returns the shard owning `node`, if placed.
    pub fn shard_of(&self, node: NodeId) -> Option<ShardId> {
        self.store.shard_of(node)
    }

    /// Number of nodes placed through the least-loaded fallback.
    pub fn fallback_placements(&self) -> usize {
        self.fallback_placements
    }

    /// Name of the active scoring policy.
    pub fn scoring_name(&self) -> &str {
        self.scoring.name()
    }

    /// Consumes the assigner and returns its final snapshot.
    pub fn into_assignment(self) -> Assignment {
        self.store.snapshot(&self.config)
    }
}

impl PlacementStrategy for PartitionAssigner {
    fn name(&self) -> &str {
        "ldg"
    }

    fn place(&mut self, node: NodeId, neighbors: &[NodeId]) -> Result<ShardId, AssignError> {
        self.assign(node, neighbors)
    }

    fn store(&self) -> &AssignmentStore {
        &self.store
    }

    fn config(&self) -> &ShardConfig {
        &self.config
    }

    fn fallback_placements(&self) -> usize {
        self.fallback_placements
    }
}

impl std::fmt::Debug for PartitionAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionAssigner")
            .field("config", &self.config)
            .field("scoring", &self.scoring.name())
            .field("placed", &self.store.len())
            .field("occupancy", &self.store.occupancy())
            .finish()
    }
}

/// Shards tied at the running maximum score, in index order.
///
/// The maximum starts at `0.0`: a shard joins when its score equals the
/// current best and replaces the set when it is strictly greater. Negative
/// scores never qualify.
pub fn select_candidates(scores: &[f64]) -> Vec<ShardId> {
    let mut best = 0.0_f64;
    let mut candidates = Vec::new();
    for (shard, &score) in scores.iter().enumerate() {
        if score > best {
            best = score;
            candidates.clear();
            candidates.push(shard);
        } else if score == best {
            candidates.push(shard);
        }
    }
    candidates
}
