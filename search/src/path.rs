//! Paths and reachable sets returned by a search.

use crate::contract::Cost;
use crate::node::{NodeId, SearchNode};

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, M> {
    pub from: S,
    pub to: S,
    pub cost: Cost,
    pub action: M,
}

/// A start state and the ordered transitions taken from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, M> {
    start: S,
    transitions: Vec<Transition<S, M>>,
}

impl<S, M> Path<S, M> {
    #[must_use]
    pub fn new(start: S, transitions: Vec<Transition<S, M>>) -> Self {
        Self { start, transitions }
    }

    #[must_use]
    pub fn start(&self) -> &S {
        &self.start
    }

    /// The final state (the start for an empty path).
    #[must_use]
    pub fn end(&self) -> &S {
        self.transitions.last().map_or(&self.start, |t| &t.to)
    }

    /// Number of transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of transition costs.
    #[must_use]
    pub fn total_cost(&self) -> Cost {
        self.transitions.iter().map(|t| t.cost).sum()
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition<S, M>] {
        &self.transitions
    }

    /// Start state followed by every visited state.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        std::iter::once(&self.start).chain(self.transitions.iter().map(|t| &t.to))
    }

    pub fn actions(&self) -> impl Iterator<Item = &M> {
        self.transitions.iter().map(|t| &t.action)
    }
}

/// Walk predecessor links from `leaf` back to the root.
///
/// Node ids are arena indices and parents always precede their children.
pub(crate) fn reconstruct<S: Clone, M: Clone>(
    arena: &[SearchNode<S, M>],
    leaf: NodeId,
) -> Path<S, M> {
    let mut transitions = Vec::new();
    let mut cursor = &arena[leaf];
    while let Some(link) = &cursor.parent {
        let parent = &arena[link.parent_id];
        transitions.push(Transition {
            from: parent.state.clone(),
            to: cursor.state.clone(),
            cost: link.step_cost,
            action: link.action.clone(),
        });
        cursor = parent;
    }
    transitions.reverse();
    Path::new(cursor.state.clone(), transitions)
}

/// A settled state with its best cost and depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached<S> {
    pub state: S,
    pub cost: Cost,
    pub depth: u32,
}

/// Every state settled by a fill search, in settle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachable<S> {
    entries: Vec<Reached<S>>,
}

impl<S> Reachable<S> {
    #[must_use]
    pub fn new(entries: Vec<Reached<S>>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reached<S>> {
        self.entries.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|r| &r.state)
    }

    /// Largest settled cost (0 when empty).
    #[must_use]
    pub fn max_cost(&self) -> Cost {
        self.entries.iter().map(|r| r.cost).max().unwrap_or(0)
    }
}

impl<S: PartialEq> Reachable<S> {
    #[must_use]
    pub fn cost_of(&self, state: &S) -> Option<Cost> {
        self.entries.iter().find(|r| &r.state == state).map(|r| r.cost)
    }
}
