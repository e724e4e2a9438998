//! Leaf scan metrics.
//!
//! - `run_leaf` for normal operation.
//! - `run_leaf_with_metrics` when the caller wants to see where a scan spent
//!   its time (the session logs these at debug level).

use crate::MatchSet;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeafMetrics {
    /// Total elapsed time for the scan.
    pub total: Duration,
    /// Dictionary entries visited.
    pub scanned: usize,
    /// Entries rejected by their constraint deficit before matching.
    pub constraint_rejects: usize,
    /// Entries handed to the pattern matcher.
    pub matcher_runs: usize,
    /// Entries in the result.
    pub matched: usize,
}

/// Scan output bundled with its metrics.
#[derive(Debug, Clone)]
pub struct LeafRun {
    pub matches: MatchSet,
    pub metrics: LeafMetrics,
}
