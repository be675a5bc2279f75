// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # ldg-shard
//!
//! Command-line interface for streaming shard assignment.
//!
//! ## Usage
//! ```bash
//! # Partition an edge list into 8 shards and write the assignment
//! ldg-shard assign --input ./web-Google.txt --shards 8 --seed 42 --output plan.json
//!
//! # Stream placements as JSON Lines while the run progresses
//! ldg-shard assign --input ./web-Google.txt --shards 8 --stream
//!
//! # Compare LDG against hash placement across shard counts
//! ldg-shard sweep --input ./web-Google.txt --shards 2,4,8,16
//!
//! # Inspect graph structure
//! ldg-shard inspect --input ./web-Google.txt
//! ```

mod commands;

use clap::{Parser, Subcommand};
use graph_source::ArrivalOrder;
use shard_planner::FallbackPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ldg-shard",
    about = "Streaming linear deterministic greedy shard assignment",
    version,
    author
)]
struct Cli {
    /// Path to a TOML run configuration (flags given on the command line win).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign every node of an edge list to a shard.
    Assign {
        /// Path to a whitespace-separated edge list.
        #[arg(short, long)]
        input: PathBuf,

        /// Number of shards.
        #[arg(short, long)]
        shards: Option<usize>,

        /// Soft per-shard capacity (default: balanced load times slack).
        #[arg(long)]
        capacity: Option<f64>,

        /// Seed for tie-breaking and shuffled arrival order.
        #[arg(long)]
        seed: Option<u64>,

        /// Arrival order: insertion, ascending, breadth-first, shuffled.
        #[arg(long)]
        order: Option<ArrivalOrder>,

        /// Behaviour when no shard is eligible: reject, least-loaded.
        #[arg(long)]
        fallback: Option<FallbackPolicy>,

        /// Placement strategy: ldg, hash.
        #[arg(long)]
        strategy: Option<String>,

        /// Write the assignment here (JSON, or JSON Lines with --stream).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit each placement as a JSON line while the run progresses.
        #[arg(long)]
        stream: bool,
    },

    /// Compare LDG against hash placement over several shard counts.
    Sweep {
        /// Path to a whitespace-separated edge list.
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated shard counts (e.g., "2,4,8").
        #[arg(short, long, default_value = "2,4,8")]
        shards: String,

        /// Capacity slack over a perfectly balanced load.
        #[arg(long, default_value_t = 1.1)]
        slack: f64,

        /// Arrival order for LDG runs.
        #[arg(long, default_value = "breadth-first")]
        order: ArrivalOrder,

        /// Seed for tie-breaking and shuffled arrival order.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Inspect a graph: print size, degree statistics and degree profile.
    Inspect {
        /// Path to a whitespace-separated edge list.
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Assign {
            input,
            shards,
            capacity,
            seed,
            order,
            fallback,
            strategy,
            output,
            stream,
        } => {
            let mut config = commands::base_config(cli.config.as_deref())?;
            if let Some(n) = shards {
                config.num_shards = n;
            }
            if capacity.is_some() {
                config.capacity = capacity;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(o) = order {
                config.order = o;
            }
            if let Some(f) = fallback {
                config.fallback = f;
            }
            if let Some(s) = strategy {
                config.strategy = s;
            }
            commands::assign::execute(input, config, output, stream).await
        }
        Commands::Sweep {
            input,
            shards,
            slack,
            order,
            seed,
        } => commands::sweep::execute(input, shards, slack, order, seed).await,
        Commands::Inspect { input } => commands::inspect::execute(input).await,
    }
}
