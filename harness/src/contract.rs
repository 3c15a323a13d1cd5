//! World harness contract: what a fixture world adds on top of
//! [`SearchProblem`].
//!
//! Worlds provide domain data and successor rules only. Policy, hashing,
//! logging and reporting are runner concerns.

use waypoint_search::SearchProblem;

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldHarnessError {
    /// The in-memory fixture does not describe a valid world.
    InvalidFixture { detail: String },
}

impl WorldHarnessError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidFixture {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for WorldHarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFixture { detail } => write!(f, "invalid fixture: {detail}"),
        }
    }
}

impl std::error::Error for WorldHarnessError {}

/// The contract a world must implement to be run by the harness runner.
pub trait HarnessWorld: SearchProblem {
    /// Unique world identifier (e.g., `"grid_maze"`).
    fn world_id(&self) -> &str;

    /// The state the search starts from.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] if the fixture's start
    /// configuration is itself illegal.
    fn initial_state(&self) -> Result<Self::State, WorldHarnessError>;
}
