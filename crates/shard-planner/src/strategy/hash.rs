// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Locality-blind baseline: `shard = id mod num_shards`.
//!
//! Useful as the reference point when measuring how much edge locality the
//! greedy assigner buys. Ignores neighbors and capacity entirely.

use crate::strategy::PlacementStrategy;
use crate::{AssignError, AssignmentStore, ShardConfig, ShardId};
use graph_source::NodeId;

/// Modulo placement over node ids.
#[derive(Debug, Clone)]
pub struct HashPlacement {
    config: ShardConfig,
    store: AssignmentStore,
}

impl HashPlacement {
    pub fn new(config: ShardConfig) -> Result<Self, AssignError> {
        config.validate()?;
        Ok(Self {
            store: AssignmentStore::new(config.num_shards()),
            config,
        })
    }
}

impl PlacementStrategy for HashPlacement {
    fn name(&self) -> &str {
        "hash"
    }

    fn place(&mut self, node: NodeId, _neighbors: &[NodeId]) -> Result<ShardId, AssignError> {
        let shard = (node.as_u64() % self.config.num_shards() as u64) as ShardId;
        self.store.record(node, shard)?;
        Ok(shard)
    }

    fn store(&self) -> &AssignmentStore {
        &self.store
    }

    fn config(&self) -> &ShardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_placement() {
        let mut h = HashPlacement::new(ShardConfig::new(3, 1.0).unwrap()).unwrap();
        assert_eq!(h.place(NodeId::new(7), &[]), Ok(1));
        assert_eq!(h.place(NodeId::new(9), &[NodeId::new(7)]), Ok(0));
        assert_eq!(h.store().occupancy(), &[1, 1, 0]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut h = HashPlacement::new(ShardConfig::new(2, 1.0).unwrap()).unwrap();
        h.place(NodeId::new(4), &[]).unwrap();
        assert!(matches!(
            h.place(NodeId::new(4), &[]),
            Err(AssignError::DuplicateAssignment { .. })
        ));
        assert_eq!(h.store().len(), 1);
    }

    #[test]
    fn test_name() {
        let h = HashPlacement::new(ShardConfig::new(2, 1.0).unwrap()).unwrap();
        assert_eq!(h.name(), "hash");
    }
}
