// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Assignment export.
//!
//! Two formats:
//! - **JSON document**: the whole [`Assignment`] snapshot, written once.
//! - **JSON Lines**: one [`AssignmentRecord`] per line, written as the run
//!   progresses so downstream consumers can follow along.

use crate::RuntimeError;
use shard_planner::{Assignment, AssignmentRecord};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Serialises an assignment as pretty-printed JSON.
pub fn to_json(assignment: &Assignment) -> Result<String, RuntimeError> {
    Ok(serde_json::to_string_pretty(assignment)?)
}

/// Parses an assignment written by [`to_json`] and checks its consistency.
pub fn from_json(json: &str) -> Result<Assignment, RuntimeError> {
    let assignment: Assignment = serde_json::from_str(json)?;
    assignment.validate()?;
    Ok(assignment)
}

/// Writes an assignment as a JSON document to `path`.
pub fn write_json(path: &Path, assignment: &Assignment) -> Result<(), RuntimeError> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, assignment)?;
    writer.flush()?;
    tracing::info!(
        "wrote {} assignments to '{}'",
        assignment.len(),
        path.display()
    );
    Ok(())
}

/// Streams [`AssignmentRecord`]s as JSON Lines to an async writer.
pub struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: AsyncWrite + Unpin> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Appends one record followed by a newline.
    pub async fn write_record(&mut self, record: &AssignmentRecord) -> Result<(), RuntimeError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and returns the underlying writer.
    pub async fn finish(mut self) -> Result<W, RuntimeError> {
        self.writer.flush().await?;
        Ok(self.writer)
    }
}
