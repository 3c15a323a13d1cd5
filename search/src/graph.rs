//! `SearchGraph`: expansion-event audit log, plus the counters every search
//! collects.
//!
//! The normative decision surface is the ordered list of [`ExpandEvent`]
//! entries. Node summaries are a derived index for path reconstruction.
//! Wall-clock time is kept in [`SearchStats`] but never serialized, so graph
//! bytes and digests are reproducible across runs and machines.

use std::time::Duration;

use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::contract::Cost;
use crate::node::{FrontierKey, NodeId};

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// One event per settled pop, in pop order.
    pub expansions: Vec<ExpandEvent>,
    /// Every node created, sorted by `node_id` ascending.
    pub node_summaries: Vec<NodeSummary>,
    pub metadata: GraphMetadata,
}

/// A single frontier pop and the successors it generated.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Total order of settled pops.
    pub expansion_order: u64,
    pub node_id: NodeId,
    pub state_fingerprint: String,
    /// The frontier key at time of pop.
    pub pop_key: FrontierKey,
    pub depth: u32,
    pub g_cost: Cost,
    /// Whether the goal predicate accepted the state (always false in fill mode).
    pub is_goal: bool,
    /// Whether `expand` was called. False for a first-match goal and for the
    /// pop that tripped a cap.
    pub expanded: bool,
    /// Successors in the order `expand` returned them.
    pub successors: Vec<SuccessorRecord>,
}

impl ExpandEvent {
    /// `expand` ran and returned nothing.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.expanded && self.successors.is_empty()
    }
}

/// A generated successor with its outcome.
#[derive(Debug, Clone)]
pub struct SuccessorRecord {
    pub index: u64,
    pub state_fingerprint: String,
    pub step_cost: Cost,
    pub outcome: SuccessorOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorOutcome {
    /// First path to this state; a new node was queued.
    Enqueued { to_node: NodeId },
    /// Strictly cheaper than the previous best; a new node was queued and the
    /// old one went stale.
    Improved { to_node: NodeId },
    /// Already known at an equal or lower cost, or already expanded.
    DuplicateSuppressed,
    /// Child would exceed `max_depth`.
    SkippedByDepthLimit,
    /// Child would exceed `max_cost`.
    SkippedByCostBound,
}

/// Derived node summary.
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub state_fingerprint: String,
    pub depth: u32,
    pub g_cost: Cost,
    pub f_cost: Cost,
    /// Set if this node was settled.
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct GraphMetadata {
    pub problem_id: String,
    pub root_state_fingerprint: String,
    /// Policy echo, as produced by [`SearchPolicy::to_json`](crate::policy::SearchPolicy::to_json).
    pub policy: serde_json::Value,
    pub termination_reason: TerminationReason,
    pub stats: SearchStats,
}

/// Counters collected by every search, graph or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to `expand`.
    pub expansions: u64,
    /// Successors returned by `expand`.
    pub generated: u64,
    /// Successors pushed onto the frontier.
    pub enqueued: u64,
    /// Of `enqueued`, pushes that improved a known state's cost.
    pub improved: u64,
    /// Successors dropped because their state was already known at an equal
    /// or lower cost.
    pub duplicates_suppressed: u64,
    /// Frontier entries skipped at pop time because a cheaper node for the
    /// same state had superseded them.
    pub stale_pops: u64,
    /// Successors dropped by `max_depth` or `max_cost`.
    pub pruned: u64,
    /// Expansions that returned no successors.
    pub dead_ends: u64,
    pub frontier_high_water: u64,
    pub max_depth_reached: u32,
    /// Distinct states discovered.
    pub states_seen: u64,
    /// Wall-clock time. Excluded from all serialized forms.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Counter echo (without `elapsed`).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "dead_ends": self.dead_ends,
            "duplicates_suppressed": self.duplicates_suppressed,
            "enqueued": self.enqueued,
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
            "generated": self.generated,
            "improved": self.improved,
            "max_depth_reached": self.max_depth_reached,
            "pruned": self.pruned,
            "stale_pops": self.stale_pops,
            "states_seen": self.states_seen,
        })
    }
}

/// Why the search terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// First-match search popped a goal.
    GoalReached { node_id: NodeId },
    /// Exhaustive search emptied the frontier after finding `goals` goals.
    EnumerationComplete { goals: u64 },
    /// Fill search emptied the frontier after settling `settled` states.
    FillComplete { settled: u64 },
    /// Frontier emptied without a goal.
    FrontierExhausted,
    /// `max_expansions` calls to `expand` were made.
    ExpansionBudgetExceeded { limit: u64 },
    /// `max_duration` elapsed.
    TimeBudgetExceeded { limit: Duration },
    /// The frontier grew past `max_frontier_size`.
    FrontierBudgetExceeded { limit: usize },
}

impl TerminationReason {
    /// Whether a cap stopped the search early.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            Self::ExpansionBudgetExceeded { .. }
                | Self::TimeBudgetExceeded { .. }
                | Self::FrontierBudgetExceeded { .. }
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::EnumerationComplete { .. } => "enumeration_complete",
            Self::FillComplete { .. } => "fill_complete",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
            Self::TimeBudgetExceeded { .. } => "time_budget_exceeded",
            Self::FrontierBudgetExceeded { .. } => "frontier_budget_exceeded",
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let kind = self.as_str();
        match self {
            Self::GoalReached { node_id } => {
                serde_json::json!({"node_id": node_id, "type": kind})
            }
            Self::EnumerationComplete { goals } => {
                serde_json::json!({"goals": goals, "type": kind})
            }
            Self::FillComplete { settled } => {
                serde_json::json!({"settled": settled, "type": kind})
            }
            Self::FrontierExhausted => serde_json::json!({"type": kind}),
            Self::ExpansionBudgetExceeded { limit } => {
                serde_json::json!({"limit": limit, "type": kind})
            }
            Self::TimeBudgetExceeded { limit } => {
                let limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                serde_json::json!({"limit_ms": limit_ms, "type": kind})
            }
            Self::FrontierBudgetExceeded { limit } => {
                serde_json::json!({"limit": limit, "type": kind})
            }
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical bytes under the search-graph domain.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    /// Settled pops that accepted a goal, in pop order.
    #[must_use]
    pub fn goal_events(&self) -> Vec<&ExpandEvent> {
        self.expansions.iter().filter(|e| e.is_goal).collect()
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "depth": e.depth,
        "expanded": e.expanded,
        "expansion_order": e.expansion_order,
        "g_cost": e.g_cost,
        "is_goal": e.is_goal,
        "node_id": e.node_id,
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "f_cost": e.pop_key.f_cost,
        },
        "state_fingerprint": e.state_fingerprint,
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json(r: &SuccessorRecord) -> serde_json::Value {
    serde_json::json!({
        "index": r.index,
        "outcome": outcome_to_json(r.outcome),
        "state_fingerprint": r.state_fingerprint,
        "step_cost": r.step_cost,
    })
}

fn outcome_to_json(o: SuccessorOutcome) -> serde_json::Value {
    match o {
        SuccessorOutcome::Enqueued { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "enqueued"})
        }
        SuccessorOutcome::Improved { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "improved"})
        }
        SuccessorOutcome::DuplicateSuppressed => {
            serde_json::json!({"type": "duplicate_suppressed"})
        }
        SuccessorOutcome::SkippedByDepthLimit => {
            serde_json::json!({"type": "skipped_by_depth_limit"})
        }
        SuccessorOutcome::SkippedByCostBound => {
            serde_json::json!({"type": "skipped_by_cost_bound"})
        }
    }
}

fn node_summary_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "f_cost": n.f_cost,
        "g_cost": n.g_cost,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "state_fingerprint": n.state_fingerprint,
    })
}

fn metadata_to_json(m: &GraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "policy": m.policy,
        "problem_id": m.problem_id,
        "root_state_fingerprint": m.root_state_fingerprint,
        "stats": m.stats.to_json(),
        "termination_reason": m.termination_reason.to_json(),
    })
}
