// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # shard-runtime
//!
//! Runs streaming shard assignment end to end.
//!
//! The runtime takes:
//! - A validated `InputGraph` from `graph-source`.
//! - A [`RunConfig`] (TOML or programmatic) naming the strategy, shard
//!   count, capacity, arrival order and seed.
//!
//! It drives the chosen `PlacementStrategy` from `shard-planner` over the
//! graph's arrivals, timing each placement, and produces a [`RunOutput`]:
//! the final `Assignment`, the [`RunMetrics`] and the resulting
//! [`PartitionQuality`].
//!
//! # Streaming
//! [`stream_partition`] runs the strategy on a blocking `tokio` task and
//! hands every placement over a bounded channel to an async JSON Lines
//! writer, so a consumer can follow the partition while it is built.

mod config;
mod driver;
mod error;
pub mod export;
mod metrics;
mod quality;

pub use config::RunConfig;
pub use driver::{stream_partition, PartitionRun, RunOutput};
pub use error::RuntimeError;
pub use metrics::RunMetrics;
pub use quality::PartitionQuality;
