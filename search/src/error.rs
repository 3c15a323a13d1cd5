//! Typed search errors.
//!
//! `SearchError` covers fatal failures only. Running out of frontier and
//! hitting a cap are ordinary outcomes, expressed via
//! [`crate::search::SearchOutcome`].

use crate::contract::Cost;
use crate::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `expand` rejected a state as malformed.
    InvalidState {
        /// Fingerprint of the offending state.
        fingerprint: String,
        depth: u32,
        detail: String,
    },
    /// `base + addend` exceeded `u64` while costing a successor of
    /// `node_id` (path cost plus step cost, or path cost plus heuristic).
    CostOverflow {
        node_id: NodeId,
        base: Cost,
        addend: Cost,
    },
    /// The policy cannot be run as configured.
    UnsupportedPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState {
                fingerprint,
                depth,
                detail,
            } => write!(
                f,
                "invalid state {fingerprint} at depth {depth}: {detail}"
            ),
            Self::CostOverflow {
                node_id,
                base,
                addend,
            } => write!(f, "cost overflow expanding node {node_id}: {base} + {addend}"),
            Self::UnsupportedPolicy { detail } => {
                write!(f, "unsupported search policy: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
