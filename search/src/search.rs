//! Search entry points and the expansion loop.

use std::time::Instant;

use waypoint_kernel::state::SearchState;

use crate::contract::{Cost, FnProblem, SearchProblem, Successor};
use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierEntry};
use crate::graph::{
    ExpandEvent, GraphMetadata, NodeSummary, SearchGraph, SearchStats, SuccessorOutcome,
    SuccessorRecord, TerminationReason,
};
use crate::node::{FrontierKey, NodeId, ParentLink, SearchNode};
use crate::observer::{NoopObserver, Progress, SearchObserver};
use crate::path::{reconstruct, Path, Reachable, Reached};
use crate::policy::{SearchMode, SearchPolicy};
use crate::visited::{Offer, VisitedTable};

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<S, M> {
    /// First-match: the path to the first goal popped.
    Found(Path<S, M>),
    /// Exhaustive: one best path per distinct goal state, in pop order.
    Enumerated(Vec<Path<S, M>>),
    /// Fill: every state settled within the bounds.
    Filled(Reachable<S>),
    /// The frontier emptied without reaching a goal.
    NoSolutionFound,
    /// A cap stopped the search. Carries whatever was found before it.
    ///
    /// The node popped when the cap hit is goal-tested and settled before
    /// the cap check, so it appears in `paths` or `reached` even though it
    /// was never expanded.
    Aborted {
        /// Goal paths found so far (exhaustive mode).
        paths: Vec<Path<S, M>>,
        /// States settled so far (fill mode).
        reached: Reachable<S>,
    },
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct SearchResult<S, M> {
    pub outcome: SearchOutcome<S, M>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    /// Present when the policy sets `record_graph`.
    pub graph: Option<SearchGraph>,
}

impl<S, M> SearchResult<S, M> {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReason::GoalReached { .. })
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.termination.is_aborted()
    }

    /// The first-match path, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path<S, M>> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Every goal path carried by the outcome.
    #[must_use]
    pub fn paths(&self) -> &[Path<S, M>] {
        match &self.outcome {
            SearchOutcome::Found(path) => std::slice::from_ref(path),
            SearchOutcome::Enumerated(paths) | SearchOutcome::Aborted { paths, .. } => paths,
            SearchOutcome::Filled(_) | SearchOutcome::NoSolutionFound => &[],
        }
    }

    /// The settled set of a fill search (complete or aborted).
    #[must_use]
    pub fn reachable(&self) -> Option<&Reachable<S>> {
        match &self.outcome {
            SearchOutcome::Filled(reached) | SearchOutcome::Aborted { reached, .. } => {
                Some(reached)
            }
            _ => None,
        }
    }
}

/// Run a search from `initial`.
///
/// Caps come from `policy`. [`SearchPolicy::default`] allows 1,000,000
/// expansions, so a large space ends in [`SearchOutcome::Aborted`] unless
/// the cap is raised.
///
/// # Errors
///
/// Returns [`SearchError::UnsupportedPolicy`] before any work if the policy
/// fails validation, [`SearchError::InvalidState`] if `expand` rejects a
/// state, and [`SearchError::CostOverflow`] if a path cost exceeds `u64`.
/// Running out of frontier and hitting a cap are not errors.
pub fn search<P: SearchProblem>(
    initial: P::State,
    problem: &P,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError> {
    search_observed(initial, problem, policy, &mut NoopObserver)
}

/// [`search`] with a progress observer.
///
/// # Errors
///
/// As [`search`].
pub fn search_observed<P: SearchProblem>(
    initial: P::State,
    problem: &P,
    policy: &SearchPolicy,
    observer: &mut dyn SearchObserver,
) -> Result<SearchResult<P::State, P::Action>, SearchError> {
    policy.validate()?;
    Engine::new(problem, policy).run(initial, observer)
}

/// Search over closures: `expand` yields `(next_state, step_cost)` pairs.
///
/// # Errors
///
/// As [`search`], minus `InvalidState`: closures cannot reject a state.
pub fn search_fn<S, I, E, G>(
    initial: S,
    expand: E,
    is_goal: G,
    policy: &SearchPolicy,
) -> Result<SearchResult<S, ()>, SearchError>
where
    S: SearchState,
    I: IntoIterator<Item = (S, Cost)>,
    E: Fn(&S) -> I,
    G: Fn(&S) -> bool,
{
    search(initial, &FnProblem::new(expand, is_goal), policy)
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// State owned by one search invocation. Dropped when it returns.
struct Engine<'a, P: SearchProblem> {
    problem: &'a P,
    policy: &'a SearchPolicy,
    arena: Vec<SearchNode<P::State, P::Action>>,
    frontier: Frontier,
    visited: VisitedTable<P::State>,
    stats: SearchStats,
    /// Exhaustive mode: goal nodes in pop order.
    goals: Vec<NodeId>,
    /// Fill mode: settled nodes in pop order.
    settled: Vec<NodeId>,
    events: Option<Vec<ExpandEvent>>,
    started: Instant,
}

impl<'a, P: SearchProblem> Engine<'a, P> {
    fn new(problem: &'a P, policy: &'a SearchPolicy) -> Self {
        Self {
            problem,
            policy,
            arena: Vec::new(),
            frontier: Frontier::new(policy.order),
            visited: VisitedTable::new(),
            stats: SearchStats::default(),
            goals: Vec::new(),
            settled: Vec::new(),
            events: policy.record_graph.then(Vec::new),
            started: Instant::now(),
        }
    }

    fn run(
        mut self,
        initial: P::State,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let h_cost = self.problem.heuristic(&initial);
        self.visited.offer(&initial, 0, 0);
        self.arena.push(SearchNode {
            node_id: 0,
            state: initial,
            parent: None,
            depth: 0,
            g_cost: 0,
            h_cost,
        });
        self.frontier.push(FrontierEntry {
            key: FrontierKey::new(h_cost, 0),
            node_id: 0,
        });

        let termination = self.drive(observer)?;

        self.stats.elapsed = self.started.elapsed();
        self.stats.frontier_high_water = count(self.frontier.high_water());
        self.stats.states_seen = count(self.visited.len());
        observer.on_finish(&termination, &self.stats);
        Ok(self.finish(termination))
    }

    fn drive(&mut self, observer: &mut dyn SearchObserver) -> Result<TerminationReason, SearchError> {
        let mode = self.policy.mode;

        while let Some(entry) = self.frontier.pop() {
            let node_id = entry.node_id;
            let node = &self.arena[node_id];

            // Superseded by a cheaper node, or the state is already settled.
            if !self.visited.is_current(&node.state, node_id) {
                self.stats.stale_pops += 1;
                continue;
            }

            let (depth, g_cost) = (node.depth, node.g_cost);
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

            let is_goal = mode != SearchMode::Fill && self.problem.is_goal(&node.state);
            let mut event = self.events.as_ref().map(|events| ExpandEvent {
                expansion_order: count(events.len()),
                node_id,
                state_fingerprint: node.state.fingerprint().to_string(),
                pop_key: entry.key,
                depth,
                g_cost,
                is_goal,
                expanded: false,
                successors: Vec::new(),
            });

            match mode {
                SearchMode::FirstMatch if is_goal => {
                    self.record(event);
                    return Ok(TerminationReason::GoalReached { node_id });
                }
                SearchMode::Exhaustive if is_goal => self.goals.push(node_id),
                SearchMode::Fill => self.settled.push(node_id),
                _ => {}
            }

            if let Some(reason) = self.cap_before_expand() {
                self.record(event);
                return Ok(reason);
            }

            self.visited.mark_expanded(&self.arena[node_id].state);
            self.stats.expansions += 1;
            let successors = self
                .problem
                .expand(&self.arena[node_id].state)
                .map_err(|e| SearchError::InvalidState {
                    fingerprint: self.arena[node_id].state.fingerprint().to_string(),
                    depth,
                    detail: e.detail,
                })?;

            if successors.is_empty() {
                self.stats.dead_ends += 1;
            }
            if let Some(event) = event.as_mut() {
                event.expanded = true;
            }

            for (index, successor) in successors.into_iter().enumerate() {
                let fingerprint = event
                    .as_ref()
                    .map(|_| successor.state.fingerprint().to_string());
                let step_cost = successor.cost;
                let outcome = self.admit(node_id, depth, g_cost, successor)?;
                if let (Some(event), Some(state_fingerprint)) = (event.as_mut(), fingerprint) {
                    event.successors.push(SuccessorRecord {
                        index: count(index),
                        state_fingerprint,
                        step_cost,
                        outcome,
                    });
                }
            }
            self.record(event);

            if let Some(limit) = self.policy.max_frontier_size {
                if self.frontier.len() > limit {
                    return Ok(TerminationReason::FrontierBudgetExceeded { limit });
                }
            }

            observer.on_expand(&Progress {
                expansions: self.stats.expansions,
                frontier_len: self.frontier.len(),
                states_seen: self.visited.len(),
                depth,
                g_cost,
                goals: self.goals.len(),
                elapsed: self.started.elapsed(),
            });
        }

        Ok(self.exhausted())
    }

    /// Apply depth and cost bounds, then dedup, then queue.
    fn admit(
        &mut self,
        parent_id: NodeId,
        parent_depth: u32,
        parent_g: Cost,
        successor: Successor<P::State, P::Action>,
    ) -> Result<SuccessorOutcome, SearchError> {
        self.stats.generated += 1;

        let depth = parent_depth.saturating_add(1);
        if self.policy.max_depth.is_some_and(|max| depth > max) {
            self.stats.pruned += 1;
            return Ok(SuccessorOutcome::SkippedByDepthLimit);
        }

        let g_cost = parent_g
            .checked_add(successor.cost)
            .ok_or(SearchError::CostOverflow {
                node_id: parent_id,
                base: parent_g,
                addend: successor.cost,
            })?;
        if self.policy.max_cost.is_some_and(|max| g_cost > max) {
            self.stats.pruned += 1;
            return Ok(SuccessorOutcome::SkippedByCostBound);
        }

        let node_id = self.arena.len();
        let offer = self.visited.offer(&successor.state, g_cost, node_id);
        if !offer.accepted() {
            self.stats.duplicates_suppressed += 1;
            return Ok(SuccessorOutcome::DuplicateSuppressed);
        }

        let h_cost = self.problem.heuristic(&successor.state);
        let f_cost = g_cost.checked_add(h_cost).ok_or(SearchError::CostOverflow {
            node_id: parent_id,
            base: g_cost,
            addend: h_cost,
        })?;

        self.arena.push(SearchNode {
            node_id,
            state: successor.state,
            parent: Some(ParentLink {
                parent_id,
                step_cost: successor.cost,
                action: successor.action,
            }),
            depth,
            g_cost,
            h_cost,
        });
        self.frontier.push(FrontierEntry {
            key: FrontierKey::new(f_cost, node_id),
            node_id,
        });
        self.stats.enqueued += 1;

        if let Offer::Improved { .. } = offer {
            self.stats.improved += 1;
            Ok(SuccessorOutcome::Improved { to_node: node_id })
        } else {
            Ok(SuccessorOutcome::Enqueued { to_node: node_id })
        }
    }

    /// Caps are checked after the goal test and before `expand`, so exactly
    /// `max_expansions` expansions happen before an abort.
    fn cap_before_expand(&self) -> Option<TerminationReason> {
        if self.stats.expansions >= self.policy.max_expansions {
            return Some(TerminationReason::ExpansionBudgetExceeded {
                limit: self.policy.max_expansions,
            });
        }
        match self.policy.max_duration {
            Some(limit) if self.started.elapsed() >= limit => {
                Some(TerminationReason::TimeBudgetExceeded { limit })
            }
            _ => None,
        }
    }

    fn exhausted(&self) -> TerminationReason {
        match self.policy.mode {
            SearchMode::Exhaustive if !self.goals.is_empty() => {
                TerminationReason::EnumerationComplete {
                    goals: count(self.goals.len()),
                }
            }
            SearchMode::Fill => TerminationReason::FillComplete {
                settled: count(self.settled.len()),
            },
            _ => TerminationReason::FrontierExhausted,
        }
    }

    fn record(&mut self, event: Option<ExpandEvent>) {
        if let (Some(events), Some(event)) = (self.events.as_mut(), event) {
            events.push(event);
        }
    }

    fn goal_paths(&self) -> Vec<Path<P::State, P::Action>> {
        self.goals
            .iter()
            .map(|&id| reconstruct(&self.arena, id))
            .collect()
    }

    fn reachable(&self) -> Reachable<P::State> {
        Reachable::new(
            self.settled
                .iter()
                .map(|&id| {
                    let node = &self.arena[id];
                    Reached {
                        state: node.state.clone(),
                        cost: node.g_cost,
                        depth: node.depth,
                    }
                })
                .collect(),
        )
    }

    fn finish(mut self, termination: TerminationReason) -> SearchResult<P::State, P::Action> {
        let graph = self
            .events
            .take()
            .map(|events| self.build_graph(events, &termination));

        let outcome = match &termination {
            TerminationReason::GoalReached { node_id } => {
                SearchOutcome::Found(reconstruct(&self.arena, *node_id))
            }
            TerminationReason::EnumerationComplete { .. } => {
                SearchOutcome::Enumerated(self.goal_paths())
            }
            TerminationReason::FillComplete { .. } => SearchOutcome::Filled(self.reachable()),
            TerminationReason::FrontierExhausted => SearchOutcome::NoSolutionFound,
            TerminationReason::ExpansionBudgetExceeded { .. }
            | TerminationReason::TimeBudgetExceeded { .. }
            | TerminationReason::FrontierBudgetExceeded { .. } => SearchOutcome::Aborted {
                paths: self.goal_paths(),
                reached: self.reachable(),
            },
        };

        SearchResult {
            outcome,
            termination,
            stats: self.stats,
            graph,
        }
    }

    fn build_graph(&self, expansions: Vec<ExpandEvent>, termination: &TerminationReason) -> SearchGraph {
        let mut expansion_order = vec![None; self.arena.len()];
        for event in &expansions {
            expansion_order[event.node_id] = Some(event.expansion_order);
        }

        let node_summaries = self
            .arena
            .iter()
            .map(|n| NodeSummary {
                node_id: n.node_id,
                parent_id: n.parent_id(),
                state_fingerprint: n.state.fingerprint().to_string(),
                depth: n.depth,
                g_cost: n.g_cost,
                f_cost: n.f_cost().unwrap_or(Cost::MAX),
                expansion_order: expansion_order[n.node_id],
            })
            .collect();

        SearchGraph {
            expansions,
            node_summaries,
            metadata: GraphMetadata {
                problem_id: self.problem.problem_id().to_string(),
                root_state_fingerprint: self.arena[0].state.fingerprint().to_string(),
                policy: self.policy.to_json(),
                termination_reason: termination.clone(),
                stats: self.stats.clone(),
            },
        }
    }
}
