//! Read-only progress hooks.
//!
//! Observers see snapshots after each expansion and the final termination
//! reason. They receive no mutable access to the search, so they cannot
//! change ordering or results.

use std::time::Duration;

use crate::contract::Cost;
use crate::graph::{SearchStats, TerminationReason};

/// Progress snapshot taken after an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub expansions: u64,
    pub frontier_len: usize,
    pub states_seen: usize,
    /// Depth of the node just expanded.
    pub depth: u32,
    /// Path cost of the node just expanded.
    pub g_cost: Cost,
    /// Goals found so far (exhaustive mode).
    pub goals: usize,
    pub elapsed: Duration,
}

pub trait SearchObserver {
    fn on_expand(&mut self, _progress: &Progress) {}

    fn on_finish(&mut self, _termination: &TerminationReason, _stats: &SearchStats) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Logs a progress line every `every` expansions through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogObserver {
    label: String,
    every: u64,
}

impl LogObserver {
    /// `every == 0` disables progress lines; the finish line is still logged.
    #[must_use]
    pub fn new(label: impl Into<String>, every: u64) -> Self {
        Self {
            label: label.into(),
            every,
        }
    }

    #[must_use]
    pub fn should_report(&self, expansions: u64) -> bool {
        self.every != 0 && expansions % self.every == 0
    }
}

impl SearchObserver for LogObserver {
    fn on_expand(&mut self, progress: &Progress) {
        if self.should_report(progress.expansions) {
            log::info!(
                "{}: {} states expanded, frontier {}, seen {}, g={} depth={} ({:?})",
                self.label,
                progress.expansions,
                progress.frontier_len,
                progress.states_seen,
                progress.g_cost,
                progress.depth,
                progress.elapsed,
            );
        }
    }

    fn on_finish(&mut self, termination: &TerminationReason, stats: &SearchStats) {
        log::debug!(
            "{}: {termination} after {} expansions ({} generated, {} duplicates, {} stale) in {:?}",
            self.label,
            stats.expansions,
            stats.generated,
            stats.duplicates_suppressed,
            stats.stale_pops,
            stats.elapsed,
        );
    }
}
