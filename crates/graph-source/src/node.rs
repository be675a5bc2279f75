// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Node identifiers and the per-node arrival record.

use std::fmt;

/// Opaque identifier of a graph node.
///
/// Identifiers are unique within one graph. The wrapped integer carries no
/// meaning beyond identity; it is exposed so loaders and exporters can
/// round-trip external ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One step of a graph stream: a node together with its neighbor set as
/// known at the moment it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeArrival {
    pub node: NodeId,
    pub neighbors: Vec<NodeId>,
}

impl NodeArrival {
    pub fn new(node: impl Into<NodeId>, neighbors: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            node: node.into(),
            neighbors: neighbors.into_iter().collect(),
        }
    }

    /// Returns the number of neighbors carried by this arrival.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// A lazy, finite, single-pass sequence of node arrivals.
///
/// Any iterator of [`NodeArrival`] qualifies. The order it yields is the
/// order nodes are placed in, so reproducible placement requires a
/// reproducible source.
pub trait GraphSource: Iterator<Item = NodeArrival> {}

impl<I: Iterator<Item = NodeArrival>> GraphSource for I {}
