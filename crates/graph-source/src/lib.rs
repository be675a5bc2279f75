// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-source
//!
//! Input side of the streaming partitioner: graphs, node identifiers, and
//! the explicit orders in which nodes are revealed.
//!
//! - [`NodeId`]: opaque node identifier.
//! - [`NodeArrival`]: a node plus its neighbor set at arrival time.
//! - [`GraphSource`]: any single-pass iterator of arrivals.
//! - [`InputGraph`]: undirected adjacency with a **type-state pattern**
//!   (`Loaded` → `Validated`).
//! - [`EdgeListLoader`]: SNAP-style edge list reader.
//! - [`ArrivalOrder`] / [`Arrivals`]: caller-chosen, reproducible streams.
//!
//! # Example
//! ```no_run
//! use graph_source::{ArrivalOrder, EdgeListLoader};
//! use std::path::Path;
//!
//! let graph = EdgeListLoader::load(Path::new("./data/email-Enron.txt")).unwrap();
//! for arrival in graph.arrivals(ArrivalOrder::BreadthFirst, 0).take(3) {
//!     println!("{} has {} neighbors", arrival.node, arrival.degree());
//! }
//! ```

mod error;
pub mod graph;
mod loader;
mod node;
mod order;

pub use error::GraphError;
pub use graph::InputGraph;
pub use loader::EdgeListLoader;
pub use node::{GraphSource, NodeArrival, NodeId};
pub use order::{ArrivalOrder, Arrivals};
