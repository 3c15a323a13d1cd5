//! Run configuration and policy snapshots.
//!
//! A [`RunConfig`] is the single explicit configuration value for a harness
//! run. The runner derives a [`PolicySnapshot`] from it deterministically;
//! the snapshot digest is committed into every [`RunReport`](crate::runner::RunReport).
//! Worlds do NOT declare policy.

use waypoint_kernel::proof::canon::canonical_json_bytes;
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use waypoint_search::SearchPolicy;

/// Configuration for one harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub policy: SearchPolicy,
    /// Log a progress line every N expansions. `None` disables progress
    /// logging. Never part of the snapshot: logging cannot change results.
    pub progress_every: Option<u64>,
}

impl RunConfig {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            policy,
            progress_every: None,
        }
    }

    #[must_use]
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = Some(every);
        self
    }
}

/// In-memory policy snapshot for a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySnapshot {
    /// Canonical JSON bytes of the snapshot.
    pub bytes: Vec<u8>,
    /// `canonical_hash(PolicySnapshot, bytes)`.
    pub digest: ContentHash,
}

/// Error building a policy snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyBuildError {
    /// Canonical JSON serialization failed.
    CanonError { detail: String },
}

impl std::fmt::Display for PolicyBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "policy snapshot canon error: {detail}"),
        }
    }
}

impl std::error::Error for PolicyBuildError {}

/// Build a [`PolicySnapshot`] for `world_id` under `config`.
///
/// # Errors
///
/// Returns [`PolicyBuildError`] if canonical JSON serialization fails.
pub fn build_policy_snapshot(
    world_id: &str,
    config: &RunConfig,
) -> Result<PolicySnapshot, PolicyBuildError> {
    let snapshot_value = serde_json::json!({
        "determinism_contract": {
            "creation_order_tie_break": true,
            "no_env_reads": true,
            "wall_time_excluded": true,
        },
        "schema_version": "policy.v1",
        "search": config.policy.to_json(),
        "world_id": world_id,
    });

    let bytes =
        canonical_json_bytes(&snapshot_value).map_err(|e| PolicyBuildError::CanonError {
            detail: e.to_string(),
        })?;
    let digest = canonical_hash(HashDomain::PolicySnapshot, &bytes);

    Ok(PolicySnapshot { bytes, digest })
}
