//! Waypoint Search: deterministic state-space search with an optional audit
//! graph.
//!
//! This crate provides the search layer. It depends only on
//! `waypoint_kernel`; it does NOT depend on `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (identity, hash)    (frontier, loop)     (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`] -- lazily expanded state graph with a goal predicate
//! - [`SearchPolicy`] -- mode, frontier discipline and caps
//! - [`search()`] / [`search_fn`] -- run a search
//! - [`SearchOutcome`] -- found path, enumerated paths, filled set, no
//!   solution, or aborted with partial results
//! - [`SearchGraph`] -- expansion-event audit log
//! - [`search_branches`] -- independent roots on the `rayon` pool
//!
//! # Determinism
//!
//! For a pure `expand`/`is_goal`, the same initial state and policy give
//! the same expansion order, the same paths and the same graph bytes.
//! Equal-cost frontier entries pop in creation order.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod observer;
pub mod parallel;
pub mod path;
pub mod policy;
pub mod search;
pub mod visited;

pub use contract::{Cost, FnProblem, InvalidState, SearchProblem, Successor};
pub use error::SearchError;
pub use frontier::FrontierOrder;
pub use graph::{SearchGraph, SearchStats, TerminationReason};
pub use observer::{LogObserver, NoopObserver, Progress, SearchObserver};
pub use parallel::{best_path, search_branches};
pub use path::{Path, Reachable, Reached, Transition};
pub use policy::{SearchMode, SearchPolicy};
pub use search::{search, search_fn, search_observed, SearchOutcome, SearchResult};
