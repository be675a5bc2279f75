// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Input graph: an undirected adjacency structure with a stable node order.
//!
//! # Type-State Pattern
//!
//! ```text
//! InputGraph<Loaded>     : edges collected, may contain self-loops and
//!       │                  parallel edges.
//!       │  .validate()
//!       ▼
//! InputGraph<Validated>  : simple graph, non-empty, ready to stream.
//! ```
//!
//! Only a validated graph can produce [`Arrivals`], so the assigner never
//! sees a node listed as its own neighbor.

use crate::order::{ArrivalOrder, Arrivals};
use crate::{GraphError, NodeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: edges collected, not yet validated.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: graph is simple and non-empty.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for graph states.
pub trait GraphState: fmt::Debug + Clone {}
impl GraphState for Loaded {}
impl GraphState for Validated {}

// ── InputGraph ─────────────────────────────────────────────────────

/// An undirected graph keyed by [`NodeId`].
///
/// Nodes are stored densely in first-seen order; that order is what
/// [`ArrivalOrder::Insertion`] replays.
#[derive(Debug, Clone)]
pub struct InputGraph<S: GraphState = Loaded> {
    /// Human-readable graph name (usually the file stem).
    pub name: String,
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<usize>>,
    _state: std::marker::PhantomData<S>,
}

// ── Loaded state ───────────────────────────────────────────────────

impl InputGraph<Loaded> {
    /// Creates an empty graph in the `Loaded` state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            _state: std::marker::PhantomData,
        }
    }

    /// Builds a graph from an iterator of undirected edges.
    pub fn from_edges<I, N>(name: impl Into<String>, edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
        N: Into<NodeId>,
    {
        let mut graph = Self::new(name);
        for (a, b) in edges {
            graph.add_edge(a.into(), b.into());
        }
        graph
    }

    /// Returns the number of nodes collected so far.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Adds a node if it is not already present and returns its dense index.
    pub fn add_node(&mut self, node: NodeId) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(node, idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds an undirected edge, creating either endpoint on first sight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        self.adjacency[ia].push(ib);
        if ia != ib {
            self.adjacency[ib].push(ia);
        }
    }

    /// Validates the graph and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - The graph has at least one node.
    /// - Self-loops are removed (logged, not fatal).
    /// - Parallel edges collapse to one, keeping first-seen neighbor order.
    pub fn validate(mut self) -> Result<InputGraph<Validated>, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::InvalidGraph(format!(
                "graph '{}' contains no nodes",
                self.name
            )));
        }

        let mut self_loops = 0usize;
        for (idx, neighbors) in self.adjacency.iter_mut().enumerate() {
            let before = neighbors.len();
            neighbors.retain(|&n| n != idx);
            self_loops += before - neighbors.len();

            let mut seen = HashSet::with_capacity(neighbors.len());
            neighbors.retain(|&n| seen.insert(n));
        }
        if self_loops > 0 {
            tracing::warn!(
                "graph '{}': dropped {} self-loop(s)",
                self.name,
                self_loops,
            );
        }

        Ok(InputGraph {
            name: self.name,
            nodes: self.nodes,
            index: self.index,
            adjacency: self.adjacency,
            _state: std::marker::PhantomData,
        })
    }
}

// ── Validated state ────────────────────────────────────────────────

impl InputGraph<Validated> {
    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns `true` if `node` is part of the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Iterates nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Iterates the neighbors of `node`; empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(&node)
            .map(|&idx| self.adjacency[idx].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&n| self.nodes[n])
    }

    /// Returns the degree of `node`, or `None` if it is not in the graph.
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).map(|&idx| self.adjacency[idx].len())
    }

    /// Returns the largest degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns the mean degree.
    pub fn avg_degree(&self) -> f64 {
        2.0 * self.num_edges() as f64 / self.num_nodes() as f64
    }

    /// Iterates each undirected edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(a, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| (self.nodes[a], self.nodes[b]))
        })
    }

    /// Streams the graph as node arrivals in the requested order.
    ///
    /// `seed` only affects [`ArrivalOrder::Shuffled`].
    pub fn arrivals(&self, order: ArrivalOrder, seed: u64) -> Arrivals<'_> {
        Arrivals::new(self, order.sequence(self, seed))
    }

    /// Returns a summary string describing the graph.
    pub fn summary(&self) -> String {
        format!(
            "Graph '{}': {} nodes, {} edges, avg degree {:.2}, max degree {}",
            self.name,
            self.num_nodes(),
            self.num_edges(),
            self.avg_degree(),
            self.max_degree(),
        )
    }

    pub(crate) fn node_at(&self, idx: usize) -> NodeId {
        self.nodes[idx]
    }

    pub(crate) fn adjacency_at(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: GraphState> fmt::Display for InputGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "InputGraph '{}' ({} nodes):", self.name, self.nodes.len())?;
        for (idx, node) in self.nodes.iter().enumerate() {
            let neighbors: Vec<String> = self.adjacency[idx]
                .iter()
                .map(|&n| self.nodes[n].to_string())
                .collect();
            writeln!(f, "  {node}: [{}]", neighbors.join(", "))?;
        }
        Ok(())
    }
}
