// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for partitioning runs.

/// Errors that can occur while configuring, running, or exporting a run.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A placement failed; the run stopped at that node.
    #[error("assignment error: {0}")]
    AssignError(#[from] shard_planner::AssignError),

    /// The input graph could not be loaded.
    #[error("graph error: {0}")]
    GraphError(#[from] graph_source::GraphError),

    /// Writing the export failed.
    #[error("export error: {0}")]
    ExportError(#[from] std::io::Error),

    /// The assignment could not be serialised.
    #[error("serialisation error: {0}")]
    SerialiseError(#[from] serde_json::Error),

    /// The background placement task panicked or was cancelled.
    #[error("placement task failed: {0}")]
    TaskFailed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
