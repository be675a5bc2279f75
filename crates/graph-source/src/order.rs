// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Explicit arrival orders and the lazy [`Arrivals`] stream.
//!
//! A streaming partitioner is only reproducible if the order nodes arrive
//! in is reproducible. Every order here is a pure function of the graph
//! (and, for [`ArrivalOrder::Shuffled`], a seed).

use crate::graph::{InputGraph, Validated};
use crate::{GraphError, NodeArrival};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::str::FromStr;

/// The order in which a graph's nodes are revealed to the assigner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrivalOrder {
    /// First-seen order of the input (edge list order).
    #[default]
    Insertion,
    /// Ascending node id.
    Ascending,
    /// Breadth-first traversal, one component after another.
    BreadthFirst,
    /// Uniform random permutation from a seed.
    Shuffled,
}

impl ArrivalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Ascending => "ascending",
            Self::BreadthFirst => "breadth-first",
            Self::Shuffled => "shuffled",
        }
    }

    /// Computes the permutation of dense node indices for this order.
    pub(crate) fn sequence(&self, graph: &InputGraph<Validated>, seed: u64) -> Vec<usize> {
        let n = graph.num_nodes();
        match self {
            Self::Insertion => (0..n).collect(),
            Self::Ascending => {
                let mut seq: Vec<usize> = (0..n).collect();
                seq.sort_by_key(|&i| graph.node_at(i));
                seq
            }
            Self::BreadthFirst => breadth_first(graph),
            Self::Shuffled => {
                let mut seq: Vec<usize> = (0..n).collect();
                seq.shuffle(&mut StdRng::seed_from_u64(seed));
                seq
            }
        }
    }
}

impl FromStr for ArrivalOrder {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" | "input" => Ok(Self::Insertion),
            "ascending" | "sorted" => Ok(Self::Ascending),
            "breadth-first" | "bfs" => Ok(Self::BreadthFirst),
            "shuffled" | "random" => Ok(Self::Shuffled),
            other => Err(GraphError::InvalidGraph(format!(
                "unknown arrival order '{other}'; expected 'insertion', 'ascending', 'breadth-first', or 'shuffled'"
            ))),
        }
    }
}

/// Breadth-first over every component; each component starts at its
/// first-seen unvisited node.
fn breadth_first(graph: &InputGraph<Validated>) -> Vec<usize> {
    let n = graph.num_nodes();
    let mut visited = vec![false; n];
    let mut seq = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        queue.push_back(root);
        while let Some(idx) = queue.pop_front() {
            seq.push(idx);
            for &next in graph.adjacency_at(idx) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    seq
}

/// Lazy stream of [`NodeArrival`]s over a validated graph.
///
/// Neighbor lists are materialised one node at a time as the stream is
/// pulled; the stream cannot be rewound.
pub struct Arrivals<'g> {
    graph: &'g InputGraph<Validated>,
    sequence: std::vec::IntoIter<usize>,
}

impl<'g> Arrivals<'g> {
    pub(crate) fn new(graph: &'g InputGraph<Validated>, sequence: Vec<usize>) -> Self {
        Self {
            graph,
            sequence: sequence.into_iter(),
        }
    }
}

impl Iterator for Arrivals<'_> {
    type Item = NodeArrival;

    fn next(&mut self) -> Option<NodeArrival> {
        let idx = self.sequence.next()?;
        Some(NodeArrival {
            node: self.graph.node_at(idx),
            neighbors: self
                .graph
                .adjacency_at(idx)
                .iter()
                .map(|&n| self.graph.node_at(n))
                .collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sequence.size_hint()
    }
}

impl ExactSizeIterator for Arrivals<'_> {}
