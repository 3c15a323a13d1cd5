//! Search nodes and the frontier ordering key.

use crate::contract::Cost;

/// Index of a node in the search arena. Assigned in creation order.
pub type NodeId = usize;

/// Link from a node back to the node it was generated from.
#[derive(Debug, Clone)]
pub struct ParentLink<M> {
    pub parent_id: NodeId,
    /// Cost of the single transition parent → this node.
    pub step_cost: Cost,
    /// The move that produced this node.
    pub action: M,
}

/// An immutable node in the search arena.
///
/// Every frontier push creates a new node, so a state whose best cost
/// improves before it is expanded owns several nodes; only the one recorded
/// in the visited table is ever expanded.
#[derive(Debug, Clone)]
pub struct SearchNode<S, M> {
    pub node_id: NodeId,
    pub state: S,
    /// `None` for the root.
    pub parent: Option<ParentLink<M>>,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Accumulated path cost from the root.
    pub g_cost: Cost,
    /// Heuristic estimate of the remaining cost.
    pub h_cost: Cost,
}

impl<S, M> SearchNode<S, M> {
    /// `g_cost + h_cost`, or `None` on overflow.
    #[must_use]
    pub fn f_cost(&self) -> Option<Cost> {
        self.g_cost.checked_add(self.h_cost)
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent.as_ref().map(|p| p.parent_id)
    }
}

/// The frontier ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first; equal costs pop in creation order, which makes the
/// search reproducible and turns uniform-cost search into plain BFS when
/// every step costs 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrontierKey {
    pub f_cost: Cost,
    pub creation_order: u64,
}

impl FrontierKey {
    #[must_use]
    pub fn new(f_cost: Cost, node_id: NodeId) -> Self {
        Self {
            f_cost,
            creation_order: u64::try_from(node_id).unwrap_or(u64::MAX),
        }
    }
}
