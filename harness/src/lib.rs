//! Waypoint Harness: fixture worlds and auditable runs.
//!
//! The harness runs a world through the search engine under an explicit
//! [`RunConfig`](policy::RunConfig) and packages the outcome as a
//! digest-bound [`RunReport`](runner::RunReport).
//!
//! The harness does NOT implement search logic; it delegates to
//! `waypoint_search`. Worlds provide domain data only; the harness owns
//! orchestration, policy snapshots and reporting.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod policy;
pub mod runner;
pub mod worlds;
