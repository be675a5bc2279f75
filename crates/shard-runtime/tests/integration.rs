// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: end-to-end partitioning pipeline.
//!
//! These tests exercise the complete flow from edge list → validated graph
//! → arrivals → placement → export, proving that the three library crates
//! compose correctly.

use graph_source::{graph::Validated, ArrivalOrder, EdgeListLoader, InputGraph, NodeId};
use shard_planner::{
    AssignError, FallbackPolicy, PartitionAssigner, PlacementStrategy, ShardConfig, TieBreaker,
};
use shard_runtime::{export, stream_partition, PartitionQuality, PartitionRun, RunConfig, RuntimeError};
use std::sync::Arc;

// ── Helpers ────────────────────────────────────────────────────

/// `clusters` dense clusters of `size` nodes, chained by one bridge edge each.
fn clustered_graph(clusters: u64, size: u64) -> InputGraph<Validated> {
    let mut edges = Vec::new();
    for c in 0..clusters {
        let base = c * size;
        for i in 0..size {
            for j in (i + 1)..size {
                edges.push((base + i, base + j));
            }
        }
        if c + 1 < clusters {
            edges.push((base + size - 1, base + size));
        }
    }
    InputGraph::from_edges("clusters", edges).validate().unwrap()
}

fn config(num_shards: usize, seed: u64) -> RunConfig {
    RunConfig {
        num_shards,
        seed: Some(seed),
        order: ArrivalOrder::BreadthFirst,
        ..Default::default()
    }
}

// ── Full Pipeline Tests ────────────────────────────────────────

#[test]
fn test_path_walkthrough_from_edge_list() {
    let text = "# path A-B-C-D\n1 2\n2 3\n3 4\n";
    let graph = EdgeListLoader::parse("path", text).unwrap().validate().unwrap();

    let shard_config = ShardConfig::new(3, 2.0).unwrap();
    let mut asg = PartitionAssigner::new(shard_config, TieBreaker::first_candidate()).unwrap();
    let placed = asg
        .place_all(graph.arrivals(ArrivalOrder::Insertion, 0))
        .unwrap();
    assert_eq!(placed, 4);

    let assignment = asg.into_assignment();
    let shards: Vec<usize> = assignment.assignments.iter().map(|r| r.shard).collect();
    assert_eq!(shards, vec![0, 0, 0, 1]);
    assert_eq!(assignment.occupancy, vec![3, 1, 0]);

    let quality = PartitionQuality::measure(&graph, &assignment);
    assert_eq!(quality.cut_edges, 1);
    assert_eq!(quality.local_edges, 2);
}

#[test]
fn test_end_to_end_every_node_once() {
    let graph = clustered_graph(4, 6);
    let out = PartitionRun::new(config(4, 11)).execute(&graph).unwrap();

    assert_eq!(out.assignment.len(), graph.num_nodes());
    assert_eq!(out.assignment.occupancy.iter().sum::<usize>(), graph.num_nodes());
    out.assignment.validate().unwrap();
    for node in graph.nodes() {
        let hits = out.assignment.assignments.iter().filter(|r| r.node == node).count();
        assert_eq!(hits, 1, "node {node} placed {hits} times");
    }
}

#[test]
fn test_ldg_beats_hash_on_clustered_graph() {
    let graph = clustered_graph(4, 8);

    let ldg = PartitionRun::new(config(4, 5)).execute(&graph).unwrap();
    let hash = PartitionRun::new(RunConfig {
        strategy: "hash".into(),
        ..config(4, 5)
    })
    .execute(&graph)
    .unwrap();

    assert_eq!(hash.metrics.strategy, "hash");
    assert!(
        ldg.quality.cut_edges < hash.quality.cut_edges,
        "ldg cut {} vs hash cut {}",
        ldg.quality.cut_edges,
        hash.quality.cut_edges
    );
}

#[test]
fn test_same_order_and_seed_reproduce() {
    let graph = clustered_graph(3, 7);
    let cfg = RunConfig {
        order: ArrivalOrder::Shuffled,
        ..config(3, 99)
    };
    let a = PartitionRun::new(cfg.clone()).execute(&graph).unwrap();
    let b = PartitionRun::new(cfg).execute(&graph).unwrap();
    assert_eq!(a.assignment, b.assignment);
}

#[test]
fn test_no_eligible_shard_surfaces_through_runtime() {
    // A star with a tiny capacity: the hub's leaves soon see only
    // over-full shards.
    let edges: Vec<(u64, u64)> = (1..=6).map(|leaf| (0, leaf)).collect();
    let graph = InputGraph::from_edges("star", edges).validate().unwrap();
    let cfg = RunConfig {
        num_shards: 1,
        capacity: Some(1.0),
        seed: Some(1),
        ..Default::default()
    };

    let err = PartitionRun::new(cfg.clone()).execute(&graph).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::AssignError(AssignError::NoEligibleShard { .. })
    ));

    let relaxed = RunConfig {
        fallback: FallbackPolicy::LeastLoaded,
        ..cfg
    };
    let out = PartitionRun::new(relaxed).execute(&graph).unwrap();
    assert_eq!(out.assignment.len(), 7);
    assert!(out.metrics.fallback_placements > 0);
}

// ── Export ─────────────────────────────────────────────────────

#[test]
fn test_json_export_roundtrip_through_file() {
    let graph = clustered_graph(2, 5);
    let out = PartitionRun::new(config(2, 3)).execute(&graph).unwrap();

    let path = std::env::temp_dir().join(format!("ldg-export-{}.json", std::process::id()));
    export::write_json(&path, &out.assignment).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let back = export::from_json(&text).unwrap();
    assert_eq!(back, out.assignment);
}

#[tokio::test]
async fn test_streamed_lines_follow_arrival_order() {
    let graph = Arc::new(clustered_graph(3, 4));
    let out = stream_partition(Arc::clone(&graph), config(3, 8), Vec::new())
        .await
        .unwrap();

    let mut buf = Vec::new();
    let streamed = stream_partition(Arc::clone(&graph), config(3, 8), &mut buf)
        .await
        .unwrap();
    assert_eq!(streamed.assignment, out.assignment);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), graph.num_nodes());

    let expected: Vec<NodeId> = graph.arrivals(ArrivalOrder::BreadthFirst, 8).map(|a| a.node).collect();
    for (line, node) in lines.iter().zip(expected) {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["node"], node.as_u64());
    }
}

// ── Config ─────────────────────────────────────────────────────

#[test]
fn test_config_toml_drives_run() {
    let cfg = RunConfig::from_toml(
        r#"
        num_shards = 3
        capacity = 4.0
        seed = 42
        order = "ascending"
        "#,
    )
    .unwrap();
    let graph = clustered_graph(3, 4);
    let out = PartitionRun::new(cfg).execute(&graph).unwrap();
    assert_eq!(out.assignment.num_shards, 3);
    assert_eq!(out.assignment.capacity, 4.0);

    let first = out.assignment.assignments[0].node;
    assert_eq!(first, NodeId::new(0));
}
