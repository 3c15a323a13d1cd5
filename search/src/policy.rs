//! Search policy: mode, frontier discipline and caps.
//!
//! A policy is an explicit value handed to every search call. There is no
//! process-wide default beyond [`SearchPolicy::default`].

use std::time::Duration;

use crate::contract::Cost;
use crate::error::SearchError;
use crate::frontier::FrontierOrder;

/// What the search is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Stop at the first goal popped.
    FirstMatch,
    /// Keep going after goals and return one path per distinct goal state.
    Exhaustive,
    /// Settle every reachable state within the depth and cost bounds.
    /// The goal predicate is not consulted.
    Fill,
}

impl SearchMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstMatch => "first_match",
            Self::Exhaustive => "exhaustive",
            Self::Fill => "fill",
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    pub mode: SearchMode,
    pub order: FrontierOrder,
    /// Hard cap on `expand` calls. Exactly this many are made before the
    /// search aborts. Defaults to 1,000,000; pass `u64::MAX` to lift it.
    pub max_expansions: u64,
    /// Wall-clock cap, checked before each expansion.
    pub max_duration: Option<Duration>,
    /// Successors deeper than this are not generated.
    pub max_depth: Option<u32>,
    /// Successors costlier than this are not generated.
    pub max_cost: Option<Cost>,
    /// The search aborts once the frontier grows past this size.
    pub max_frontier_size: Option<usize>,
    /// Record a [`SearchGraph`](crate::graph::SearchGraph) audit trail.
    pub record_graph: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            mode: SearchMode::FirstMatch,
            order: FrontierOrder::LowestCost,
            max_expansions: 1_000_000,
            max_duration: None,
            max_depth: None,
            max_cost: None,
            max_frontier_size: None,
            record_graph: false,
        }
    }
}

impl SearchPolicy {
    #[must_use]
    pub fn first_match() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            mode: SearchMode::Exhaustive,
            ..Self::default()
        }
    }

    /// Flood everything within `max_cost` of the start.
    #[must_use]
    pub fn fill(max_cost: Cost) -> Self {
        Self {
            mode: SearchMode::Fill,
            max_cost: Some(max_cost),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: FrontierOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    #[must_use]
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_max_cost(mut self, max_cost: Cost) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    #[must_use]
    pub fn with_max_frontier_size(mut self, max_frontier_size: usize) -> Self {
        self.max_frontier_size = Some(max_frontier_size);
        self
    }

    #[must_use]
    pub fn with_graph(mut self) -> Self {
        self.record_graph = true;
        self
    }

    /// Reject settings the engine cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicy`] for a zero frontier cap, a
    /// zero time budget, or `Fill` with any ordering but lowest-cost.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_frontier_size == Some(0) {
            return Err(SearchError::UnsupportedPolicy {
                detail: "max_frontier_size must be at least 1".into(),
            });
        }
        if self.max_duration == Some(Duration::ZERO) {
            return Err(SearchError::UnsupportedPolicy {
                detail: "max_duration must be non-zero".into(),
            });
        }
        // Settled states are never reopened, so only cost order settles each
        // state at its best cost once step costs differ.
        if self.mode == SearchMode::Fill && self.order != FrontierOrder::LowestCost {
            return Err(SearchError::UnsupportedPolicy {
                detail: format!(
                    "fill mode requires lowest_cost ordering, got {}",
                    self.order.as_str()
                ),
            });
        }
        Ok(())
    }

    /// Policy echo for snapshots. Durations are in whole milliseconds.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_cost": self.max_cost,
            "max_depth": self.max_depth,
            "max_duration_ms": self
                .max_duration
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "max_expansions": self.max_expansions,
            "max_frontier_size": self.max_frontier_size,
            "mode": self.mode.as_str(),
            "order": self.order.as_str(),
            "record_graph": self.record_graph,
        })
    }
}
