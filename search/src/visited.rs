//! Visited table: best known cost per state, and whether it has been expanded.
//!
//! Keyed by the state value itself (`Eq + Hash`), so dedup can never merge
//! two distinct states. Iteration order is never observed.

use fxhash::FxHashMap;

use waypoint_kernel::state::SearchState;

use crate::contract::Cost;
use crate::node::NodeId;

/// What the table knows about one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitRecord {
    /// Lowest accumulated cost discovered so far.
    pub best_cost: Cost,
    /// The node carrying `best_cost`; the only node of this state that may
    /// be expanded.
    pub node_id: NodeId,
    /// Set once the state has been popped and settled.
    pub expanded: bool,
}

/// Result of offering a newly generated path to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// First time this state was seen.
    New,
    /// Strictly cheaper than the previous best; the state is re-queued.
    Improved { previous: Cost },
    /// Not cheaper than the recorded cost (first-seen wins on ties).
    NotBetter { recorded: Cost },
    /// The state was already settled; it is never reopened.
    AlreadyExpanded,
}

impl Offer {
    /// Whether the offering node should go on the frontier.
    #[must_use]
    pub fn accepted(self) -> bool {
        matches!(self, Self::New | Self::Improved { .. })
    }
}

#[derive(Debug)]
pub struct VisitedTable<S> {
    records: FxHashMap<S, VisitRecord>,
}

impl<S: SearchState> VisitedTable<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: FxHashMap::default(),
        }
    }

    /// Offer a path of cost `cost` to `state`, carried by node `node_id`.
    ///
    /// Records the node as the state's best when accepted.
    pub fn offer(&mut self, state: &S, cost: Cost, node_id: NodeId) -> Offer {
        match self.records.get_mut(state) {
            None => {
                self.records.insert(
                    state.clone(),
                    VisitRecord {
                        best_cost: cost,
                        node_id,
                        expanded: false,
                    },
                );
                Offer::New
            }
            Some(record) if record.expanded => Offer::AlreadyExpanded,
            Some(record) if cost < record.best_cost => {
                let previous = record.best_cost;
                record.best_cost = cost;
                record.node_id = node_id;
                Offer::Improved { previous }
            }
            Some(record) => Offer::NotBetter {
                recorded: record.best_cost,
            },
        }
    }

    /// Whether `node_id` is the live, unexpanded node for `state`.
    ///
    /// `false` means the popped frontier entry is stale: superseded by a
    /// cheaper node, or the state was already expanded.
    #[must_use]
    pub fn is_current(&self, state: &S, node_id: NodeId) -> bool {
        self.records
            .get(state)
            .is_some_and(|r| r.node_id == node_id && !r.expanded)
    }

    /// Mark `state` as settled. Returns `false` if it already was.
    pub fn mark_expanded(&mut self, state: &S) -> bool {
        match self.records.get_mut(state) {
            Some(record) if !record.expanded => {
                record.expanded = true;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_expanded(&self, state: &S) -> bool {
        self.records.get(state).is_some_and(|r| r.expanded)
    }

    #[must_use]
    pub fn best_cost(&self, state: &S) -> Option<Cost> {
        self.records.get(state).map(|r| r.best_cost)
    }

    /// Number of distinct states discovered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<S: SearchState> Default for VisitedTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
