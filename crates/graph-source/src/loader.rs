// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Edge-list loading.
//!
//! Reads the plain-text edge lists published by SNAP and similar
//! collections:
//!
//! ```text
//! # Directed graph: example.txt
//! # FromNodeId    ToNodeId
//! 1   2
//! 2   3
//! ```
//!
//! Lines starting with `#` or `%` are comments. Each remaining line holds
//! at least two whitespace-separated unsigned ids; further columns (weights,
//! timestamps) are ignored. Direction is dropped: every edge is undirected.

use crate::graph::{InputGraph, Loaded, Validated};
use crate::{GraphError, NodeId};
use std::io::BufRead;
use std::path::Path;

/// Loads undirected graphs from edge-list text.
///
/// # Example
/// ```no_run
/// use graph_source::EdgeListLoader;
/// use std::path::Path;
///
/// let graph = EdgeListLoader::load(Path::new("./data/roadNet-PA.txt")).unwrap();
/// println!("{}", graph.summary());
/// ```
pub struct EdgeListLoader;

impl EdgeListLoader {
    /// Loads and validates an edge list file. The graph is named after the
    /// file stem.
    pub fn load(path: &Path) -> Result<InputGraph<Validated>, GraphError> {
        let file = std::fs::File::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "graph".to_string());

        let graph = Self::from_reader(name, std::io::BufReader::new(file))?;
        tracing::info!(
            "loaded edge list '{}' ({} nodes)",
            path.display(),
            graph.num_nodes(),
        );
        graph.validate()
    }

    /// Parses edge-list text already held in memory.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<InputGraph<Loaded>, GraphError> {
        Self::from_reader(name, text.as_bytes())
    }

    /// Parses edge-list text from any buffered reader.
    pub fn from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<InputGraph<Loaded>, GraphError> {
        let mut graph = InputGraph::new(name);

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let a = parse_id(fields.next(), line_no)?;
            let b = parse_id(fields.next(), line_no)?;
            graph.add_edge(a, b);
        }

        Ok(graph)
    }
}

fn parse_id(field: Option<&str>, line: usize) -> Result<NodeId, GraphError> {
    let field = field.ok_or_else(|| GraphError::MalformedEdge {
        line,
        detail: "expected two node ids".into(),
    })?;
    field
        .parse::<u64>()
        .map(NodeId::new)
        .map_err(|e| GraphError::MalformedEdge {
            line,
            detail: format!("'{field}' is not a node id: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Undirected graph: sample
# Nodes: 4 Edges: 3
1\t2
2 3   0.75
% matrix-market style comment

3 4
";

    #[test]
    fn test_parse_sample() {
        let g = EdgeListLoader::parse("sample", SAMPLE).unwrap().validate().unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.name, "sample");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let g = EdgeListLoader::parse("w", "7 8 1.5 1700000000\n")
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_missing_second_id() {
        let err = EdgeListLoader::parse("bad", "1 2\n3\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedEdge { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_id() {
        let err = EdgeListLoader::parse("bad", "# header\nalpha 2\n").unwrap_err();
        match err {
            GraphError::MalformedEdge { line, detail } => {
                assert_eq!(line, 2);
                assert!(detail.contains("alpha"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_comments_only_is_empty_graph() {
        let loaded = EdgeListLoader::parse("empty", "# nothing\n\n").unwrap();
        assert!(loaded.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("ldg_shard_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.txt");
        std::fs::write(&path, "1 2\n2 3\n").unwrap();

        let g = EdgeListLoader::load(&path).unwrap();
        assert_eq!(g.name, "tiny");
        assert_eq!(g.num_nodes(), 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("ldg_shard_loader_test_missing.txt");
        assert!(matches!(
            EdgeListLoader::load(&path),
            Err(GraphError::ReadError(_))
        ));
    }
}
