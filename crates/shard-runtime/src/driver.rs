// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning driver: drains a graph source into a placement strategy.
//!
//! Two entry points:
//!
//! ```text
//! PartitionRun::execute          graph ─► strategy ─► RunOutput
//!
//! PartitionRun::stream           graph ─► strategy (blocking task)
//!                                            │ mpsc<AssignmentRecord>
//!                                            ▼
//!                                   JsonLinesSink (async task)
//! ```
//!
//! The strategy's state is never shared. Streaming consumers see each
//! placement through the channel, after it has been recorded.

use crate::export::JsonLinesSink;
use crate::{PartitionQuality, RunConfig, RunMetrics, RuntimeError};
use graph_source::graph::Validated;
use graph_source::{GraphSource, InputGraph};
use shard_planner::{Assignment, AssignmentRecord, PlacementStrategy};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;

/// Capacity of the hand-off channel used by [`PartitionRun::stream`].
const STREAM_CHANNEL_CAPACITY: usize = 1024;

/// Everything a finished run produces.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunOutput {
    pub assignment: Assignment,
    pub metrics: RunMetrics,
    pub quality: PartitionQuality,
}

/// A configured partitioning run.
#[derive(Debug, Clone)]
pub struct PartitionRun {
    config: RunConfig,
}

impl PartitionRun {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Partitions `graph` in the configured arrival order.
    pub fn execute(&self, graph: &InputGraph<Validated>) -> Result<RunOutput, RuntimeError> {
        let mut strategy = self.config.create_strategy(graph.num_nodes())?;
        tracing::info!(
            "partitioning '{}' ({} nodes) with {} in {} order",
            graph.name,
            graph.num_nodes(),
            strategy.name(),
            self.config.order.as_str(),
        );

        let source = graph.arrivals(self.config.order, self.config.order_seed());
        let metrics = drive(strategy.as_mut(), source, |_| true)?;
        let assignment = strategy.snapshot();
        let quality = PartitionQuality::measure(graph, &assignment);

        tracing::info!("{}", metrics.summary());
        tracing::info!("{}", quality.summary());
        Ok(RunOutput {
            assignment,
            metrics,
            quality,
        })
    }

    /// Partitions `graph` on a blocking task and streams every placement
    /// as a JSON line to `writer` while the run is in progress.
    ///
    /// If the writer fails, placement stops at the next node and the error
    /// is returned; the strategy's state up to that point is discarded.
    pub async fn stream<W>(
        &self,
        graph: Arc<InputGraph<Validated>>,
        writer: W,
    ) -> Result<RunOutput, RuntimeError>
    where
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::channel::<AssignmentRecord>(STREAM_CHANNEL_CAPACITY);
        let config = self.config.clone();
        let producer_graph = Arc::clone(&graph);

        let producer = tokio::task::spawn_blocking(move || {
            let graph = producer_graph;
            let mut strategy = config.create_strategy(graph.num_nodes())?;
            tracing::info!(
                "streaming partition of '{}' with {} in {} order",
                graph.name,
                strategy.name(),
                config.order.as_str(),
            );
            let source = graph.arrivals(config.order, config.order_seed());
            let metrics = drive(strategy.as_mut(), source, |record| {
                tx.blocking_send(record).is_ok()
            })?;
            Ok::<_, RuntimeError>((strategy.snapshot(), metrics))
        });

        let mut sink = JsonLinesSink::new(writer);
        let mut sink_result = Ok(());
        while let Some(record) = rx.recv().await {
            if let Err(e) = sink.write_record(&record).await {
                sink_result = Err(e);
                break;
            }
        }
        // Dropping the receiver makes the producer stop at its next send.
        drop(rx);

        let produced = producer
            .await
            .map_err(|e| RuntimeError::TaskFailed(e.to_string()))?;
        sink_result?;
        let (assignment, metrics) = produced?;
        let written = sink.written();
        sink.finish().await?;
        tracing::debug!("streamed {written} records");

        let quality = PartitionQuality::measure(&graph, &assignment);
        tracing::info!("{}", metrics.summary());
        tracing::info!("{}", quality.summary());
        Ok(RunOutput {
            assignment,
            metrics,
            quality,
        })
    }
}

/// Streams a partition of `graph` as JSON Lines to `writer`.
///
/// Shorthand for `PartitionRun::new(config).stream(graph, writer)`.
pub async fn stream_partition<W>(
    graph: Arc<InputGraph<Validated>>,
    config: RunConfig,
    writer: W,
) -> Result<RunOutput, RuntimeError>
where
    W: AsyncWrite + Unpin,
{
    PartitionRun::new(config).stream(graph, writer).await
}

/// Places every arrival of `source`, publishing each record to `publish`.
///
/// Stops early, without error, when `publish` returns `false`.
fn drive<F>(
    strategy: &mut dyn PlacementStrategy,
    source: impl GraphSource,
    mut publish: F,
) -> Result<RunMetrics, RuntimeError>
where
    F: FnMut(AssignmentRecord) -> bool,
{
    let mut metrics = RunMetrics::new(strategy.name());
    let started = Instant::now();

    for arrival in source {
        let t0 = Instant::now();
        let shard = strategy.place(arrival.node, &arrival.neighbors)?;
        metrics.record_assignment(arrival.degree(), t0.elapsed());

        if !publish(AssignmentRecord {
            node: arrival.node,
            shard,
        }) {
            tracing::warn!(
                "assignment consumer went away after {} nodes; stopping",
                metrics.nodes_assigned
            );
            break;
        }
    }

    metrics.finalise(started.elapsed(), strategy.fallback_placements());
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_source::{ArrivalOrder, NodeArrival, NodeId};
    use shard_planner::{PartitionAssigner, ShardConfig, TieBreaker};

    fn two_cliques() -> InputGraph<Validated> {
        // Two 4-cliques joined by a single bridge 3–4.
        let mut edges = Vec::new();
        for base in [0u64, 4] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((base + i, base + j));
                }
            }
        }
        edges.push((3, 4));
        InputGraph::from_edges("cliques", edges).validate().unwrap()
    }

    #[test]
    fn test_execute_places_every_node() {
        let run = PartitionRun::new(RunConfig {
            num_shards: 2,
            seed: Some(1),
            ..Default::default()
        });
        let out = run.execute(&two_cliques()).unwrap();
        assert_eq!(out.assignment.len(), 8);
        assert_eq!(out.metrics.nodes_assigned, 8);
        assert_eq!(out.quality.total_edges, 13);
        out.assignment.validate().unwrap();
    }

    #[test]
    fn test_execute_keeps_cliques_together() {
        let run = PartitionRun::new(RunConfig {
            num_shards: 2,
            capacity: Some(4.0),
            seed: Some(3),
            order: ArrivalOrder::BreadthFirst,
            ..Default::default()
        });
        let out = run.execute(&two_cliques()).unwrap();
        assert_eq!(out.quality.cut_edges, 1);
        assert_eq!(out.assignment.occupancy, vec![4, 4]);
    }

    #[test]
    fn test_drive_stops_when_consumer_leaves() {
        let config = ShardConfig::new(2, 10.0).unwrap();
        let mut asg = PartitionAssigner::new(config, TieBreaker::lowest_index()).unwrap();
        let arrivals = (1..=5u64).map(|i| NodeArrival::new(i, []));

        let mut seen = 0;
        let metrics = drive(&mut asg, arrivals, |_| {
            seen += 1;
            seen < 3
        })
        .unwrap();

        assert_eq!(metrics.nodes_assigned, 3);
        assert_eq!(asg.store().len(), 3);
        assert_eq!(asg.shard_of(NodeId::new(4)), None);
    }

    #[test]
    fn test_drive_propagates_assign_error() {
        let config = ShardConfig::new(2, 10.0).unwrap();
        let mut asg = PartitionAssigner::new(config, TieBreaker::lowest_index()).unwrap();
        let arrivals = vec![NodeArrival::new(1u64, []), NodeArrival::new(1u64, [])];

        let err = drive(&mut asg, arrivals.into_iter(), |_| true).unwrap_err();
        assert!(matches!(err, RuntimeError::AssignError(_)));
        assert_eq!(asg.store().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_matches_execute() {
        let graph = Arc::new(two_cliques());
        let run = PartitionRun::new(RunConfig {
            num_shards: 2,
            seed: Some(9),
            order: ArrivalOrder::Shuffled,
            ..Default::default()
        });

        let streamed = run.stream(Arc::clone(&graph), Vec::new()).await.unwrap();
        let direct = run.execute(&graph).unwrap();
        assert_eq!(streamed.assignment, direct.assignment);
    }
}
