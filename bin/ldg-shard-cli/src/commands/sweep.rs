// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ldg-shard sweep` command: LDG against the hash baseline.
//!
//! Runs both strategies at every requested shard count and prints a
//! comparison table of edge cut, balance and throughput.

use super::load_graph;
use graph_source::ArrivalOrder;
use shard_runtime::{PartitionRun, RunConfig};
use std::path::PathBuf;

struct SweepRow {
    shards: usize,
    strategy: String,
    cut_ratio: f64,
}

pub async fn execute(
    input: PathBuf,
    shards_str: String,
    slack: f64,
    order: ArrivalOrder,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              ldg-shard · Strategy Sweep              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let shard_counts = parse_shard_counts(&shards_str)?;
    let graph = load_graph(&input)?;
    println!("  {}", graph.summary());
    println!("  Shards: {shard_counts:?}  Slack: {slack}  Order: {}", order.as_str());
    println!();

    // ── Results Table ──────────────────────────────────────────
    println!(
        "  {:<8} {:<8} {:>10} {:>8} {:>10} {:>12}",
        "Shards", "Strategy", "Cut", "Cut %", "Imbalance", "Nodes/s",
    );
    println!("  {}", "-".repeat(62));

    let mut rows = Vec::new();
    for &num_shards in &shard_counts {
        for strategy in ["hash", "ldg"] {
            let config = RunConfig {
                num_shards,
                capacity: None,
                slack,
                seed,
                order,
                strategy: strategy.to_string(),
                ..Default::default()
            };
            match PartitionRun::new(config).execute(&graph) {
                Ok(out) => {
                    println!(
                        "  {:<8} {:<8} {:>10} {:>7.1}% {:>10.3} {:>12.0}",
                        num_shards,
                        strategy,
                        out.quality.cut_edges,
                        out.quality.edge_cut_ratio * 100.0,
                        out.quality.load_imbalance,
                        out.metrics.nodes_per_second(),
                    );
                    rows.push(SweepRow {
                        shards: num_shards,
                        strategy: strategy.to_string(),
                        cut_ratio: out.quality.edge_cut_ratio,
                    });
                }
                Err(e) => {
                    println!("  {:<8} {:<8}     FAILED: {e}", num_shards, strategy);
                }
            }
        }
    }
    println!();

    // ── Summary ────────────────────────────────────────────────
    println!("  Cut reduction of ldg over hash:");
    for &num_shards in &shard_counts {
        let cut = |name: &str| {
            rows.iter()
                .find(|r| r.shards == num_shards && r.strategy == name)
                .map(|r| r.cut_ratio)
        };
        match (cut("hash"), cut("ldg")) {
            (Some(h), Some(l)) if h > 0.0 => {
                println!("   {:>3} shards: {:>5.1}%", num_shards, (1.0 - l / h) * 100.0)
            }
            _ => println!("   {:>3} shards:     -", num_shards),
        }
    }
    println!();
    Ok(())
}

fn parse_shard_counts(s: &str) -> anyhow::Result<Vec<usize>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<usize>() {
                Ok(0) | Err(_) => Err(anyhow::anyhow!("invalid shard count '{part}'")),
                Ok(n) => Ok(n),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shard_counts() {
        assert_eq!(parse_shard_counts("2, 4,8").unwrap(), vec![2, 4, 8]);
        assert!(parse_shard_counts("2,0").is_err());
        assert!(parse_shard_counts("two").is_err());
    }
}
