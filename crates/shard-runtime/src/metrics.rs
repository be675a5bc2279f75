// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run profiling metrics.
//!
//! [`RunMetrics`] collects timing and placement counts for one pass over a
//! graph source. Paired with [`crate::PartitionQuality`] it is the main tool
//! for comparing strategies and arrival orders.

use std::time::Duration;

/// Aggregate metrics for a complete partitioning run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunMetrics {
    /// Strategy that produced the run.
    pub strategy: String,
    /// Total wall-clock time for the run.
    pub total_duration: Duration,
    /// Time spent inside placement calls.
    pub total_assign_duration: Duration,
    /// Slowest single placement.
    pub max_assign_duration: Duration,
    /// Number of nodes placed.
    pub nodes_assigned: usize,
    /// Sum of neighbor-set sizes seen.
    pub neighbors_scanned: usize,
    /// Placements made by the least-loaded fallback.
    pub fallback_placements: usize,
}

impl RunMetrics {
    /// Creates an empty metrics container.
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            total_duration: Duration::ZERO,
            total_assign_duration: Duration::ZERO,
            max_assign_duration: Duration::ZERO,
            nodes_assigned: 0,
            neighbors_scanned: 0,
            fallback_placements: 0,
        }
    }

    /// Records one successful placement.
    pub fn record_assignment(&mut self, degree: usize, elapsed: Duration) {
        self.nodes_assigned += 1;
        self.neighbors_scanned += degree;
        self.total_assign_duration += elapsed;
        if elapsed > self.max_assign_duration {
            self.max_assign_duration = elapsed;
        }
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration, fallback_placements: usize) {
        self.total_duration = total;
        self.fallback_placements = fallback_placements;
    }

    /// Returns placement throughput in nodes per second.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs <= 0.0 || self.nodes_assigned == 0 {
            return 0.0;
        }
        self.nodes_assigned as f64 / secs
    }

    /// Returns the mean neighbor-set size per placement.
    pub fn avg_degree(&self) -> f64 {
        if self.nodes_assigned == 0 {
            return 0.0;
        }
        self.neighbors_scanned as f64 / self.nodes_assigned as f64
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Run '{}': {} nodes in {:.2}ms ({:.0} nodes/s), avg degree {:.2}, \
             slowest placement {:.1}µs, {} fallback placements",
            self.strategy,
            self.nodes_assigned,
            self.total_duration.as_secs_f64() * 1000.0,
            self.nodes_per_second(),
            self.avg_degree(),
            self.max_assign_duration.as_secs_f64() * 1_000_000.0,
            self.fallback_placements,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let m = RunMetrics::new("ldg");
        assert_eq!(m.nodes_per_second(), 0.0);
        assert_eq!(m.avg_degree(), 0.0);
        assert_eq!(m.strategy, "ldg");
    }

    #[test]
    fn test_record_and_finalise() {
        let mut m = RunMetrics::new("ldg");
        m.record_assignment(3, Duration::from_micros(5));
        m.record_assignment(1, Duration::from_micros(9));
        m.finalise(Duration::from_millis(2), 1);

        assert_eq!(m.nodes_assigned, 2);
        assert_eq!(m.neighbors_scanned, 4);
        assert_eq!(m.max_assign_duration, Duration::from_micros(9));
        assert_eq!(m.total_assign_duration, Duration::from_micros(14));
        assert_eq!(m.fallback_placements, 1);
        assert!((m.avg_degree() - 2.0).abs() < 1e-9);
        assert!(m.nodes_per_second() > 0.0);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut m = RunMetrics::new("hash");
        for _ in 0..100 {
            m.record_assignment(0, Duration::ZERO);
        }
        m.finalise(Duration::from_secs(2), 0);
        assert!((m.nodes_per_second() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_summary_format() {
        let mut m = RunMetrics::new("ldg");
        m.record_assignment(2, Duration::from_micros(3));
        m.finalise(Duration::from_millis(1), 0);
        let s = m.summary();
        assert!(s.contains("Run 'ldg'"));
        assert!(s.contains("1 nodes"));
        assert!(s.contains("0 fallback"));
    }
}
