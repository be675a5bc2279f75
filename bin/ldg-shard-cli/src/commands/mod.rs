// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

pub mod assign;
pub mod inspect;
pub mod sweep;

use shard_runtime::RunConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run configuration from `--config`, or the defaults.
pub fn base_config(path: Option<&Path>) -> anyhow::Result<RunConfig> {
    match path {
        Some(p) => {
            let config = RunConfig::from_file(p)?;
            tracing::info!("loaded run configuration from '{}'", p.display());
            Ok(config)
        }
        None => Ok(RunConfig::default()),
    }
}

/// Loads and validates an edge list, with the path in the error.
pub fn load_graph(
    input: &Path,
) -> anyhow::Result<graph_source::InputGraph<graph_source::graph::Validated>> {
    graph_source::EdgeListLoader::load(input)
        .map_err(|e| anyhow::anyhow!("failed to load graph from '{}': {e}", input.display()))
}

/// Truncates a string to `max` characters, appending "…" if needed.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
