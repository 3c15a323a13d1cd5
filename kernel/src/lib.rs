//! Waypoint Kernel: state identity and canonical bytes for deterministic search.
//!
//! # API Surface
//!
//! - [`state::SearchState`] -- the equality/hash/identity contract every
//!   searchable state satisfies
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//! - [`proof::canon::canonical_json_bytes`] -- the single JSON canonicalizer
//!
//! # Module Dependency Direction
//!
//! `proof` ← `state`
//!
//! One-way only. `state` fingerprints through `proof::hash`; `proof` depends
//! on nothing internal. The kernel contains no search logic.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod state;
