//! Search problem contract.

use std::fmt::Debug;
use std::marker::PhantomData;

use waypoint_kernel::state::SearchState;

/// Integer step and path cost. Negative step costs are unrepresentable.
pub type Cost = u64;

/// One outgoing edge produced by [`SearchProblem::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S, M> {
    /// The new state. Never aliases the source state.
    pub state: S,
    /// Non-negative step cost.
    pub cost: Cost,
    /// The move taken, kept only for path reconstruction.
    pub action: M,
}

impl<S, M> Successor<S, M> {
    #[must_use]
    pub fn new(state: S, cost: Cost, action: M) -> Self {
        Self {
            state,
            cost,
            action,
        }
    }

    /// A unit-cost successor, for unweighted problems.
    #[must_use]
    pub fn unit(state: S, action: M) -> Self {
        Self::new(state, 1, action)
    }
}

/// A state failed a domain validity check inside `expand`.
///
/// This is a bug in the caller's domain model, not a dead end: an illegal
/// move is expressed by omitting it from the successor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidState {
    pub detail: String,
}

impl InvalidState {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for InvalidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid state: {}", self.detail)
    }
}

impl std::error::Error for InvalidState {}

/// A state graph discovered lazily through [`expand`](Self::expand).
///
/// # Contract
///
/// - `expand` and `is_goal` are pure: same state in, same answer out, in the
///   same order. Search determinism rests on this.
/// - `expand` terminates in bounded time for every state.
/// - `heuristic` must never overestimate the remaining cost to a goal
///   (admissible) and must satisfy `h(a) <= cost(a, b) + h(b)` (consistent).
///   An inconsistent heuristic does not break termination but voids the
///   minimum-cost guarantee, since settled states are never reopened.
pub trait SearchProblem {
    type State: SearchState;
    type Action: Clone + Debug;

    /// Identifier echoed into audit graphs and reports.
    fn problem_id(&self) -> &str;

    /// Enumerate the legal successors of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState`] if `state` is malformed. The search stops and
    /// surfaces it as a fatal error.
    fn expand(
        &self,
        state: &Self::State,
    ) -> Result<Vec<Successor<Self::State, Self::Action>>, InvalidState>;

    /// Whether `state` is accepting.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Lower bound on the remaining cost from `state` (0 = uniform-cost search).
    fn heuristic(&self, _state: &Self::State) -> Cost {
        0
    }
}

/// Adapts a pair of closures into a [`SearchProblem`] with `()` actions.
///
/// `expand` yields `(next_state, cost)` pairs.
pub struct FnProblem<S, I, E, G> {
    expand: E,
    is_goal: G,
    _marker: PhantomData<fn(&S) -> I>,
}

impl<S, I, E, G> FnProblem<S, I, E, G>
where
    S: SearchState,
    I: IntoIterator<Item = (S, Cost)>,
    E: Fn(&S) -> I,
    G: Fn(&S) -> bool,
{
    #[must_use]
    pub fn new(expand: E, is_goal: G) -> Self {
        Self {
            expand,
            is_goal,
            _marker: PhantomData,
        }
    }
}

impl<S, I, E, G> SearchProblem for FnProblem<S, I, E, G>
where
    S: SearchState,
    I: IntoIterator<Item = (S, Cost)>,
    E: Fn(&S) -> I,
    G: Fn(&S) -> bool,
{
    type State = S;
    type Action = ();

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "fn_problem"
    }

    fn expand(&self, state: &S) -> Result<Vec<Successor<S, ()>>, InvalidState> {
        Ok((self.expand)(state)
            .into_iter()
            .map(|(next, cost)| Successor::new(next, cost, ()))
            .collect())
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }
}
