// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ldg-shard assign` command: partition an edge list.
//!
//! Two modes:
//! ```text
//! batch:   load → execute → summary (+ JSON document with --output)
//! stream:  load → stream_partition → JSON Lines to --output or stdout
//! ```

use super::load_graph;
use shard_runtime::{export, stream_partition, PartitionRun, RunConfig, RunOutput};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn execute(
    input: PathBuf,
    config: RunConfig,
    output: Option<PathBuf>,
    stream: bool,
) -> anyhow::Result<()> {
    let graph = load_graph(&input)?;
    tracing::info!("{}", graph.summary());

    if stream {
        return run_streaming(graph, config, output).await;
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             ldg-shard · Shard Assignment             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    print_config(&config);
    println!("  {}", graph.summary());
    println!();

    let out = PartitionRun::new(config).execute(&graph)?;
    print_report(&out);

    if let Some(path) = output {
        export::write_json(&path, &out.assignment)?;
        println!("  Assignment written to {}", path.display());
        println!();
    }
    Ok(())
}

/// Streams placements as JSON Lines. The report goes to stderr so stdout
/// stays machine-readable.
async fn run_streaming(
    graph: graph_source::InputGraph<graph_source::graph::Validated>,
    config: RunConfig,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let graph = Arc::new(graph);
    let out = match &output {
        Some(path) => {
            let file = tokio::fs::File::create(path).await.map_err(|e| {
                anyhow::anyhow!("cannot create '{}': {e}", path.display())
            })?;
            stream_partition(graph, config, file).await?
        }
        None => stream_partition(graph, config, tokio::io::stdout()).await?,
    };

    eprintln!("{}", out.metrics.summary());
    eprintln!("{}", out.quality.summary());
    Ok(())
}

fn print_config(config: &RunConfig) {
    println!("  Config:");
    println!("   Strategy: {}", config.strategy);
    println!("   Shards:   {}", config.num_shards);
    match config.capacity {
        Some(c) => println!("   Capacity: {c}"),
        None => println!("   Capacity: balanced × {}", config.slack),
    }
    println!("   Order:    {}", config.order.as_str());
    match config.seed {
        Some(s) => println!("   Seed:     {s}"),
        None => println!("   Seed:     (entropy)"),
    }
    println!();
}

fn print_report(out: &RunOutput) {
    let assignment = &out.assignment;
    let quality = &out.quality;

    // ── Per-Shard Occupancy ────────────────────────────────────
    println!("  {:<6} {:>10} {:>10}", "Shard", "Nodes", "% cap");
    println!("  {}", "-".repeat(28));
    for (shard, &occ) in assignment.occupancy.iter().enumerate() {
        println!(
            "  {:<6} {:>10} {:>9.1}%",
            shard,
            occ,
            occ as f64 / assignment.capacity * 100.0,
        );
    }
    println!();

    // ── Locality ───────────────────────────────────────────────
    println!("  Edges:          {}", quality.total_edges);
    println!(
        "  Cut edges:      {} ({:.1}%)",
        quality.cut_edges,
        quality.edge_cut_ratio * 100.0,
    );
    println!("  Local edges:    {}", quality.local_edges);
    println!("  Load imbalance: {:.3}", quality.load_imbalance);
    println!();

    // ── Timing ─────────────────────────────────────────────────
    let m = &out.metrics;
    println!("  Nodes placed:   {}", m.nodes_assigned);
    println!(
        "  Wall time:      {:.2}ms ({:.0} nodes/s)",
        m.total_duration.as_secs_f64() * 1000.0,
        m.nodes_per_second(),
    );
    println!(
        "  Slowest node:   {:.1}µs",
        m.max_assign_duration.as_secs_f64() * 1_000_000.0,
    );
    if m.fallback_placements > 0 {
        println!("  Fallbacks:      {}", m.fallback_placements);
    }
    println!();
}
