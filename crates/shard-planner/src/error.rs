// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for shard assignment.

use crate::ShardId;
use graph_source::NodeId;

/// Errors reported by [`crate::PartitionAssigner::assign`] and its parts.
///
/// None of these are recovered internally. When `assign` returns an error
/// the assignment store is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
    /// Shard count is zero or the capacity target is not a positive number.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The node already owns a shard; assignments are never revised.
    #[error("node {node} is already assigned to shard {shard}")]
    DuplicateAssignment { node: NodeId, shard: ShardId },

    /// Every shard scored strictly below zero for this node.
    #[error("no eligible shard for node {node}: every shard scored below zero")]
    NoEligibleShard { node: NodeId },

    /// A shard index outside `0..num_shards` reached the store.
    #[error("shard {shard} is out of range for {num_shards} shards")]
    ShardOutOfRange { shard: ShardId, num_shards: usize },

    /// The tie-breaker was handed an empty candidate set.
    #[error("tie-break invoked with no candidate shards")]
    NoCandidate,
}
