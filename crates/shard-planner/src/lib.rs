// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # shard-planner
//!
//! Streaming shard assignment: every node of a graph is placed on one of a
//! fixed number of shards the moment it arrives, and never moved again.
//!
//! # Strategies
//!
//! | Strategy | Uses neighbors | Uses capacity | Edge locality |
//! |---|---|---|---|
//! | [`PartitionAssigner`] (LDG) | Yes | Soft target | High |
//! | [`HashPlacement`] | No | No | Baseline |
//!
//! # Building Blocks
//!
//! - [`ShardConfig`]: shard count and capacity target, plus the fallback policy.
//! - [`AssignmentStore`]: append-only node → shard map with occupancy.
//! - [`ScoringPolicy`] / [`LinearDeterministic`]: per-shard scores.
//! - [`TieBreaker`] / [`ChoiceSource`]: least-loaded, then injected choice.
//!
//! # Example
//! ```
//! use graph_source::{ArrivalOrder, InputGraph};
//! use shard_planner::{PartitionAssigner, PlacementStrategy, ShardConfig};
//!
//! let graph = InputGraph::from_edges("path", [(1u64, 2u64), (2, 3), (3, 4)])
//!     .validate()
//!     .unwrap();
//! let config = ShardConfig::new(3, 2.0).unwrap();
//! let mut assigner = PartitionAssigner::seeded(config, 42).unwrap();
//! assigner.place_all(graph.arrivals(ArrivalOrder::Insertion, 0)).unwrap();
//!
//! let assignment = assigner.into_assignment();
//! assert_eq!(assignment.occupancy.iter().sum::<usize>(), 4);
//! ```

mod config;
mod error;
pub mod scoring;
mod store;
pub mod strategy;
pub mod tiebreak;

/// Index of a shard, in `0..num_shards`.
pub type ShardId = usize;

pub use config::{FallbackPolicy, ShardConfig};
pub use error::AssignError;
pub use scoring::{LinearDeterministic, ScoringPolicy};
pub use store::{Assignment, AssignmentRecord, AssignmentStore};
pub use strategy::hash::HashPlacement;
pub use strategy::ldg::{select_candidates, PartitionAssigner};
pub use strategy::PlacementStrategy;
pub use tiebreak::{ChoiceSource, FirstChoice, SeededChoice, TieBreaker};

/// Builds the strategy named `name` (`"ldg"` or `"hash"`).
///
/// The tie-break seed only matters for `"ldg"`; `None` seeds from the OS.
pub fn create_strategy(
    name: &str,
    config: ShardConfig,
    seed: Option<u64>,
) -> Result<Box<dyn PlacementStrategy>, AssignError> {
    match name.to_lowercase().as_str() {
        "ldg" | "greedy" => {
            let tie_breaker = match seed {
                Some(seed) => TieBreaker::seeded(seed),
                None => TieBreaker::new(SeededChoice::from_entropy()),
            };
            tracing::info!("using linear deterministic greedy placement ({config})");
            Ok(Box::new(PartitionAssigner::new(config, tie_breaker)?))
        }
        "hash" | "modulo" => {
            tracing::info!("using hash placement ({config})");
            Ok(Box::new(HashPlacement::new(config)?))
        }
        other => Err(AssignError::InvalidConfiguration(format!(
            "unknown strategy '{other}'; expected 'ldg' or 'hash'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_strategy_by_name() {
        let config = ShardConfig::new(2, 4.0).unwrap();
        assert_eq!(create_strategy("ldg", config, Some(1)).unwrap().name(), "ldg");
        assert_eq!(create_strategy("greedy", config, None).unwrap().name(), "ldg");
        assert_eq!(create_strategy("hash", config, None).unwrap().name(), "hash");
        assert!(create_strategy("metis", config, None).is_err());
    }

    #[test]
    fn test_boxed_strategy_places() {
        let config = ShardConfig::new(2, 4.0).unwrap();
        let mut s = create_strategy("ldg", config, Some(9)).unwrap();
        s.place(graph_source::NodeId::new(1), &[]).unwrap();
        assert_eq!(s.snapshot().len(), 1);
    }
}
