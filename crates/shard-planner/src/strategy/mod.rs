// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`PlacementStrategy`] trait and its implementations.

pub mod hash;
pub mod ldg;

use crate::{AssignError, Assignment, AssignmentStore, ShardConfig, ShardId};
use graph_source::{GraphSource, NodeId};

/// A streaming placement strategy.
///
/// Each node is placed exactly once, in arrival order, and the decision is
/// final. Strategies are purely algorithmic (no I/O), which keeps them
/// trivially unit-testable.
pub trait PlacementStrategy: Send {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Places one node given its neighbor set.
    fn place(&mut self, node: NodeId, neighbors: &[NodeId]) -> Result<ShardId, AssignError>;

    /// The placements made so far.
    fn store(&self) -> &AssignmentStore;

    /// The configuration this strategy was built with.
    fn config(&self) -> &ShardConfig;

    /// Number of placements made outside the strategy's normal rule
    /// (see [`crate::FallbackPolicy::LeastLoaded`]).
    fn fallback_placements(&self) -> usize {
        0
    }

    /// Copies the current placements into an exportable snapshot.
    fn snapshot(&self) -> Assignment {
        self.store().snapshot(self.config())
    }

    /// Drains `source`, stopping at the first error.
    ///
    /// Nodes placed before the error stay placed; the failing node is not.
    fn place_all(&mut self, source: impl GraphSource) -> Result<usize, AssignError>
    where
        Self: Sized,
    {
        let mut placed = 0;
        for arrival in source {
            self.place(arrival.node, &arrival.neighbors)?;
            placed += 1;
        }
        Ok(placed)
    }
}
