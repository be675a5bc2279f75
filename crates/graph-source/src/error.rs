// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for graph loading and validation.

/// Errors that can occur when reading or validating an input graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The edge list file could not be read.
    #[error("failed to read edge list: {0}")]
    ReadError(#[from] std::io::Error),

    /// A line of the edge list could not be parsed.
    #[error("malformed edge on line {line}: {detail}")]
    MalformedEdge { line: usize, detail: String },

    /// The graph is empty or otherwise unusable.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}
