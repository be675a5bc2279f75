// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ldg-shard inspect` command: display graph structure.
//!
//! Loads the edge list and prints size, degree statistics, a degree
//! profile in power-of-two buckets and the highest-degree nodes.

use super::{load_graph, truncate};
use graph_source::NodeId;
use std::path::PathBuf;

/// Number of hub nodes listed.
const TOP_HUBS: usize = 5;

pub async fn execute(input: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             ldg-shard · Graph Inspector              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let graph = load_graph(&input)?;

    // ── Summary ────────────────────────────────────────────────
    println!("  Graph:      {}", truncate(&graph.name, 40));
    println!("  Nodes:      {}", graph.num_nodes());
    println!("  Edges:      {}", graph.num_edges());
    println!("  Avg degree: {:.2}", graph.avg_degree());
    println!("  Max degree: {}", graph.max_degree());
    println!();

    let mut degrees: Vec<(NodeId, usize)> = graph
        .nodes()
        .map(|n| (n, graph.degree(n).unwrap_or(0)))
        .collect();

    // ── Degree Profile ─────────────────────────────────────────
    let profile = degree_profile(degrees.iter().map(|&(_, d)| d));
    println!("  {:<14} {:>10} {:>8}", "Degree", "Nodes", "Share");
    println!("  {}", "-".repeat(34));
    for (label, count) in &profile {
        println!(
            "  {:<14} {:>10} {:>7.1}%",
            label,
            count,
            *count as f64 / graph.num_nodes() as f64 * 100.0,
        );
    }
    println!();

    // ── Hubs ───────────────────────────────────────────────────
    degrees.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("  Highest-degree nodes:");
    for (node, degree) in degrees.iter().take(TOP_HUBS) {
        println!("   {node:>12}  degree {degree}");
    }
    println!();

    // ── Capacity Hint ──────────────────────────────────────────
    println!("  Balanced capacity per shard count (slack 1.0):");
    for shards in [2usize, 4, 8, 16] {
        println!(
            "   {:>3} shards → {}",
            shards,
            graph.num_nodes().div_ceil(shards),
        );
    }
    println!();
    Ok(())
}

/// Buckets degrees as `0`, `1`, `2-3`, `4-7`, ... and counts nodes per bucket.
fn degree_profile(degrees: impl Iterator<Item = usize>) -> Vec<(String, usize)> {
    let mut buckets: Vec<usize> = Vec::new();
    for d in degrees {
        let bucket = if d == 0 {
            0
        } else {
            (usize::BITS - d.leading_zeros()) as usize
        };
        if buckets.len() <= bucket {
            buckets.resize(bucket + 1, 0);
        }
        buckets[bucket] += 1;
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .map(|(bucket, count)| {
            let label = match bucket {
                0 => "0".to_string(),
                1 => "1".to_string(),
                b => format!("{}-{}", 1usize << (b - 1), (1usize << b) - 1),
            };
            (label, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_profile_buckets() {
        let profile = degree_profile([0, 1, 2, 3, 4, 7, 8].into_iter());
        assert_eq!(
            profile,
            vec![
                ("0".to_string(), 1),
                ("1".to_string(), 1),
                ("2-3".to_string(), 2),
                ("4-7".to_string(), 2),
                ("8-15".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_degree_profile_empty() {
        assert!(degree_profile(std::iter::empty()).is_empty());
    }
}
