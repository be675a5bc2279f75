// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partition quality: edge locality and load balance of an assignment.
//!
//! ```text
//! edge_cut_ratio = cut_edges / (cut_edges + local_edges)
//! load_imbalance = max(occupancy) / mean(occupancy)
//! ```
//!
//! Edges with an unplaced endpoint (partial runs) are counted separately
//! and excluded from the ratio.

use graph_source::graph::Validated;
use graph_source::InputGraph;
use shard_planner::Assignment;

/// Locality and balance figures for one assignment of one graph.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PartitionQuality {
    pub total_edges: usize,
    /// Edges whose endpoints live on different shards.
    pub cut_edges: usize,
    /// Edges whose endpoints share a shard.
    pub local_edges: usize,
    /// Edges with at least one unplaced endpoint.
    pub unassigned_edges: usize,
    pub edge_cut_ratio: f64,
    pub occupancy: Vec<usize>,
    pub max_occupancy: usize,
    pub load_imbalance: f64,
}

impl PartitionQuality {
    /// Measures `assignment` against the edges of `graph`.
    pub fn measure(graph: &InputGraph<Validated>, assignment: &Assignment) -> Self {
        let shard_of = assignment.to_map();
        let (mut cut, mut local, mut unassigned) = (0usize, 0usize, 0usize);

        for (a, b) in graph.edges() {
            match (shard_of.get(&a), shard_of.get(&b)) {
                (Some(sa), Some(sb)) if sa == sb => local += 1,
                (Some(_), Some(_)) => cut += 1,
                _ => unassigned += 1,
            }
        }

        let placed_edges = cut + local;
        let edge_cut_ratio = if placed_edges == 0 {
            0.0
        } else {
            cut as f64 / placed_edges as f64
        };

        let max_occupancy = assignment.occupancy.iter().copied().max().unwrap_or(0);
        let mean = assignment.len() as f64 / assignment.num_shards.max(1) as f64;
        let load_imbalance = if mean > 0.0 {
            max_occupancy as f64 / mean
        } else {
            0.0
        };

        Self {
            total_edges: graph.num_edges(),
            cut_edges: cut,
            local_edges: local,
            unassigned_edges: unassigned,
            edge_cut_ratio,
            occupancy: assignment.occupancy.clone(),
            max_occupancy,
            load_imbalance,
        }
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Quality: {} edges, {} cut ({:.1}%), {} local, max occupancy {}, imbalance {:.3}, occupancy {:?}",
            self.total_edges,
            self.cut_edges,
            self.edge_cut_ratio * 100.0,
            self.local_edges,
            self.max_occupancy,
            self.load_imbalance,
            self.occupancy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_source::NodeId;
    use shard_planner::AssignmentRecord;

    fn square() -> InputGraph<Validated> {
        InputGraph::from_edges("square", [(1u64, 2u64), (2, 3), (3, 4), (4, 1)])
            .validate()
            .unwrap()
    }

    fn assignment(pairs: &[(u64, usize)], num_shards: usize) -> Assignment {
        let mut occupancy = vec![0; num_shards];
        let assignments = pairs
            .iter()
            .map(|&(node, shard)| {
                occupancy[shard] += 1;
                AssignmentRecord {
                    node: NodeId::new(node),
                    shard,
                }
            })
            .collect();
        Assignment {
            num_shards,
            capacity: 2.0,
            occupancy,
            assignments,
        }
    }

    #[test]
    fn test_all_local() {
        let q = PartitionQuality::measure(&square(), &assignment(&[(1, 0), (2, 0), (3, 0), (4, 0)], 2));
        assert_eq!(q.cut_edges, 0);
        assert_eq!(q.local_edges, 4);
        assert_eq!(q.edge_cut_ratio, 0.0);
        assert_eq!(q.load_imbalance, 2.0);
    }

    #[test]
    fn test_half_cut() {
        // {1,2} and {3,4}: edges 2-3 and 4-1 cross.
        let q = PartitionQuality::measure(&square(), &assignment(&[(1, 0), (2, 0), (3, 1), (4, 1)], 2));
        assert_eq!(q.cut_edges, 2);
        assert_eq!(q.local_edges, 2);
        assert_eq!(q.edge_cut_ratio, 0.5);
        assert_eq!(q.load_imbalance, 1.0);
        assert_eq!(q.max_occupancy, 2);
    }

    #[test]
    fn test_partial_assignment() {
        let q = PartitionQuality::measure(&square(), &assignment(&[(1, 0), (2, 1)], 2));
        assert_eq!(q.cut_edges, 1);
        assert_eq!(q.unassigned_edges, 3);
        assert_eq!(q.total_edges, 4);
        assert_eq!(q.edge_cut_ratio, 1.0);
    }

    #[test]
    fn test_empty_assignment() {
        let q = PartitionQuality::measure(&square(), &assignment(&[], 3));
        assert_eq!(q.edge_cut_ratio, 0.0);
        assert_eq!(q.load_imbalance, 0.0);
        assert_eq!(q.unassigned_edges, 4);
    }

    #[test]
    fn test_summary() {
        let q = PartitionQuality::measure(&square(), &assignment(&[(1, 0), (2, 0), (3, 1), (4, 1)], 2));
        let s = q.summary();
        assert!(s.contains("4 edges"));
        assert!(s.contains("2 cut (50.0%)"));
    }
}
