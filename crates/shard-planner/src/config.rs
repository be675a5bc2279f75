// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning parameters: shard count, capacity target, fallback policy.

use crate::AssignError;
use std::fmt;
use std::str::FromStr;

/// What to do when no shard is eligible for a node (every score negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Report [`AssignError::NoEligibleShard`].
    #[default]
    Reject,
    /// Treat every shard as a candidate and let the tie-breaker pick the
    /// least loaded one.
    LeastLoaded,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::LeastLoaded => "least-loaded",
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "none" => Ok(Self::Reject),
            "least-loaded" | "least_loaded" => Ok(Self::LeastLoaded),
            other => Err(AssignError::InvalidConfiguration(format!(
                "unknown fallback policy '{other}'; expected 'reject' or 'least-loaded'"
            ))),
        }
    }
}

/// Parameters of one partitioning run.
///
/// `capacity` is a soft per-shard target. It only shapes the score penalty;
/// occupancy is allowed to exceed it.
///
/// # Examples
/// ```
/// use shard_planner::ShardConfig;
///
/// let config = ShardConfig::new(4, 250.0).unwrap();
/// assert_eq!(config.num_shards(), 4);
///
/// assert!(ShardConfig::new(0, 10.0).is_err());
/// assert!(ShardConfig::new(4, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShardConfig {
    num_shards: usize,
    capacity: f64,
    #[serde(default)]
    fallback: FallbackPolicy,
}

impl ShardConfig {
    /// Creates a validated configuration with the default fallback policy.
    pub fn new(num_shards: usize, capacity: f64) -> Result<Self, AssignError> {
        let config = Self {
            num_shards,
            capacity,
            fallback: FallbackPolicy::Reject,
        };
        config.validate()?;
        Ok(config)
    }

    /// Derives the capacity from the expected node count:
    /// `ceil(num_nodes / num_shards) * slack`.
    ///
    /// A slack of `1.0` targets perfect balance; values slightly above one
    /// trade balance for locality.
    pub fn balanced(num_nodes: usize, num_shards: usize, slack: f64) -> Result<Self, AssignError> {
        if num_shards == 0 {
            return Self::new(0, 1.0);
        }
        if !(slack.is_finite() && slack > 0.0) {
            return Err(AssignError::InvalidConfiguration(format!(
                "slack must be a positive number, got {slack}"
            )));
        }
        let per_shard = num_nodes.div_ceil(num_shards).max(1);
        Self::new(num_shards, per_shard as f64 * slack)
    }

    /// Replaces the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Checks the invariants `num_shards > 0` and `capacity > 0`.
    ///
    /// Deserialised configurations bypass [`ShardConfig::new`], so the
    /// assigner re-checks on construction.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.num_shards == 0 {
            return Err(AssignError::InvalidConfiguration(
                "num_shards must be greater than zero".into(),
            ));
        }
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(AssignError::InvalidConfiguration(format!(
                "capacity must be a positive number, got {}",
                self.capacity
            )));
        }
        Ok(())
    }

    pub fn num_shards(&self) -> usize {
        self.num_shards
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}

impl fmt::Display for ShardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shards, capacity {}, fallback {}",
            self.num_shards,
            self.capacity,
            self.fallback.as_str(),
        )
    }
}
