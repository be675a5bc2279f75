// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! num_shards = 5
//! capacity = 2.0          # omit to derive from the node count and `slack`
//! slack = 1.1
//! seed = 42               # omit for an OS-seeded tie-breaker
//! order = "breadth-first" # insertion | ascending | breadth-first | shuffled
//! fallback = "reject"     # reject | least-loaded
//! strategy = "ldg"        # ldg | hash
//! ```

use graph_source::ArrivalOrder;
use shard_planner::{FallbackPolicy, PlacementStrategy, ShardConfig};
use std::path::Path;

/// Configuration for one partitioning run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// Number of shards to place nodes on.
    pub num_shards: usize,
    /// Soft per-shard capacity target. `None` derives it from the graph.
    pub capacity: Option<f64>,
    /// Multiplier on the perfectly balanced load when `capacity` is derived.
    #[serde(default = "default_slack")]
    pub slack: f64,
    /// Seed for the tie-breaker and for shuffled arrival order.
    pub seed: Option<u64>,
    /// Order in which nodes are revealed to the strategy.
    #[serde(default)]
    pub order: ArrivalOrder,
    /// Behaviour when no shard is eligible.
    #[serde(default)]
    pub fallback: FallbackPolicy,
    /// Placement strategy name: `"ldg"` or `"hash"`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_slack() -> f64 {
    1.1
}

fn default_strategy() -> String {
    "ldg".to_string()
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Resolves the shard configuration for a graph of `num_nodes` nodes.
    pub fn shard_config(&self, num_nodes: usize) -> Result<ShardConfig, super::RuntimeError> {
        let config = match self.capacity {
            Some(capacity) => ShardConfig::new(self.num_shards, capacity)?,
            None => ShardConfig::balanced(num_nodes, self.num_shards, self.slack)?,
        };
        Ok(config.with_fallback(self.fallback))
    }

    /// Seed used for shuffled arrival order (`0` when unseeded).
    pub fn order_seed(&self) -> u64 {
        self.seed.unwrap_or(0)
    }

    /// Creates the placement strategy specified by this config.
    pub fn create_strategy(
        &self,
        num_nodes: usize,
    ) -> Result<Box<dyn PlacementStrategy>, super::RuntimeError> {
        let shard_config = self.shard_config(num_nodes)?;
        Ok(shard_planner::create_strategy(
            &self.strategy,
            shard_config,
            self.seed,
        )?)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_shards: 4,
            capacity: None,
            slack: default_slack(),
            seed: None,
            order: ArrivalOrder::Insertion,
            fallback: FallbackPolicy::Reject,
            strategy: default_strategy(),
        }
    }
}
