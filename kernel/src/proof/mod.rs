//! Canonical hashing and canonical JSON.

pub mod canon;
pub mod hash;
