//! Harness runner: run a world under a [`RunConfig`] and package the result
//! as a digest-bound [`RunReport`].
//!
//! # Pipeline
//!
//! ```text
//! build_policy_snapshot() → initial_state()
//!   → search_observed() → graph digest (if recorded)
//!   → answer summary → canonical report bytes → report digest
//! ```
//!
//! The report never contains wall-clock time, so two runs of the same world
//! under the same config produce byte-identical reports.

use waypoint_kernel::proof::canon::canonical_json_bytes;
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use waypoint_kernel::state::SearchState;
use waypoint_search::{
    search_observed, Cost, LogObserver, NoopObserver, SearchError, SearchObserver, SearchOutcome,
    SearchResult, SearchStats, TerminationReason,
};

use crate::contract::{HarnessWorld, WorldHarnessError};
use crate::policy::{build_policy_snapshot, PolicyBuildError, RunConfig};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// World construction or initial state failed.
    World(WorldHarnessError),
    /// The search failed fatally.
    Search(SearchError),
    /// Policy snapshot construction failed.
    PolicyBuildFailed(PolicyBuildError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World(e) => write!(f, "world error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::PolicyBuildFailed(e) => write!(f, "{e}"),
            Self::CanonFailed { detail } => write!(f, "report canon error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::World(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::PolicyBuildFailed(e) => Some(e),
            Self::CanonFailed { .. } => None,
        }
    }
}

impl From<WorldHarnessError> for RunError {
    fn from(e: WorldHarnessError) -> Self {
        Self::World(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<PolicyBuildError> for RunError {
    fn from(e: PolicyBuildError) -> Self {
        Self::PolicyBuildFailed(e)
    }
}

/// What the search produced, reduced to digest-stable facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSummary {
    Found {
        cost: Cost,
        length: u64,
        end_fingerprint: String,
    },
    Enumerated {
        count: u64,
        min_cost: Cost,
        max_cost: Cost,
    },
    Filled {
        settled: u64,
        max_cost: Cost,
    },
    NoSolution,
    Aborted {
        paths: u64,
        settled: u64,
    },
}

impl AnswerSummary {
    fn from_outcome<S: SearchState, M>(outcome: &SearchOutcome<S, M>) -> Self {
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        match outcome {
            SearchOutcome::Found(path) => Self::Found {
                cost: path.total_cost(),
                length: count(path.len()),
                end_fingerprint: path.end().fingerprint().to_string(),
            },
            SearchOutcome::Enumerated(paths) => Self::Enumerated {
                count: count(paths.len()),
                min_cost: paths.iter().map(|p| p.total_cost()).min().unwrap_or(0),
                max_cost: paths.iter().map(|p| p.total_cost()).max().unwrap_or(0),
            },
            SearchOutcome::Filled(reached) => Self::Filled {
                settled: count(reached.len()),
                max_cost: reached.max_cost(),
            },
            SearchOutcome::NoSolutionFound => Self::NoSolution,
            SearchOutcome::Aborted { paths, reached } => Self::Aborted {
                paths: count(paths.len()),
                settled: count(reached.len()),
            },
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Found {
                cost,
                length,
                end_fingerprint,
            } => serde_json::json!({
                "cost": cost,
                "end_fingerprint": end_fingerprint,
                "length": length,
                "type": "found",
            }),
            Self::Enumerated {
                count,
                min_cost,
                max_cost,
            } => serde_json::json!({
                "count": count,
                "max_cost": max_cost,
                "min_cost": min_cost,
                "type": "enumerated",
            }),
            Self::Filled { settled, max_cost } => serde_json::json!({
                "max_cost": max_cost,
                "settled": settled,
                "type": "filled",
            }),
            Self::NoSolution => serde_json::json!({"type": "no_solution"}),
            Self::Aborted { paths, settled } => serde_json::json!({
                "paths": paths,
                "settled": settled,
                "type": "aborted",
            }),
        }
    }
}

/// Digest-bound summary of one world run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub world_id: String,
    pub policy_digest: ContentHash,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    pub answer: AnswerSummary,
    /// Present when the policy recorded a graph.
    pub graph_digest: Option<ContentHash>,
    /// Canonical JSON bytes of the report.
    pub bytes: Vec<u8>,
    /// `canonical_hash(RunReport, bytes)`.
    pub digest: ContentHash,
}

/// A run's report together with the full search result.
#[derive(Debug, Clone)]
pub struct WorldRun<S, M> {
    pub report: RunReport,
    pub result: SearchResult<S, M>,
}

/// Run `world` under `config`.
///
/// # Errors
///
/// Returns [`RunError`] if the world has no valid initial state, the search
/// fails fatally, or the report cannot be serialized. Caps and unreachable
/// goals are reported, not errors.
pub fn run_world<W: HarnessWorld>(
    world: &W,
    config: &RunConfig,
) -> Result<WorldRun<W::State, W::Action>, RunError> {
    let world_id = world.world_id();
    let snapshot = build_policy_snapshot(world_id, config)?;
    let initial = world.initial_state()?;

    log::info!(
        "running {world_id} ({} / {}), policy {}",
        config.policy.mode.as_str(),
        config.policy.order.as_str(),
        snapshot.digest.short(16),
    );

    let mut observer: Box<dyn SearchObserver> = match config.progress_every {
        Some(every) => Box::new(LogObserver::new(world_id, every)),
        None => Box::new(NoopObserver),
    };
    let result = search_observed(initial, world, &config.policy, observer.as_mut())?;

    let graph_digest = result
        .graph
        .as_ref()
        .map(waypoint_search::SearchGraph::digest)
        .transpose()
        .map_err(|e| RunError::CanonFailed {
            detail: e.to_string(),
        })?;
    let answer = AnswerSummary::from_outcome(&result.outcome);

    let report_value = serde_json::json!({
        "answer": answer.to_json(),
        "graph_digest": graph_digest.as_ref().map(ContentHash::as_str),
        "policy_digest": snapshot.digest.as_str(),
        "schema_version": "run_report.v1",
        "stats": result.stats.to_json(),
        "termination": result.termination.to_json(),
        "world_id": world_id,
    });
    let bytes = canonical_json_bytes(&report_value).map_err(|e| RunError::CanonFailed {
        detail: e.to_string(),
    })?;
    let digest = canonical_hash(HashDomain::RunReport, &bytes);

    log::info!(
        "{world_id}: {} after {} expansions, report {}",
        result.termination,
        result.stats.expansions,
        digest.short(16),
    );

    Ok(WorldRun {
        report: RunReport {
            world_id: world_id.to_string(),
            policy_digest: snapshot.digest,
            termination: result.termination.clone(),
            stats: result.stats.clone(),
            answer,
            graph_digest,
            bytes,
            digest,
        },
        result,
    })
}
