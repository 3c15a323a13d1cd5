//! End-to-end scenarios: each one pins a single outcome of the engine on a
//! small hand-built problem.

use std::time::Duration;

use lock_tests::counting::Counting;
use lock_tests::oracle::AdjacencyGraph;
use waypoint_harness::contract::HarnessWorld;
use waypoint_harness::worlds::grid_maze::GridMaze;
use waypoint_harness::worlds::weighted_graph::WeightedGraph;
use waypoint_search::{
    search, search_fn, FrontierOrder, InvalidState, SearchError, SearchOutcome, SearchPolicy,
    SearchProblem, Successor, TerminationReason,
};

#[test]
fn open_maze_shortest_path_is_four_steps() {
    let maze = GridMaze::parse(&["#####", "#S..#", "#...#", "#..G#", "#####"]).unwrap();
    let start = maze.initial_state().unwrap();
    let result = search(start, &maze, &SearchPolicy::first_match()).unwrap();

    let path = result.path().expect("goal reachable");
    assert_eq!(path.len(), 4);
    assert_eq!(path.total_cost(), 4);
    assert_eq!(*path.start(), maze.start());
    assert_eq!(*path.end(), maze.goal());
    assert!(path.states().all(|&p| maze.is_open(p)));
    assert_eq!(
        result.termination.as_str(),
        "goal_reached",
        "termination: {}",
        result.termination
    );
}

#[test]
fn cheaper_detour_beats_direct_edge() {
    let graph =
        WeightedGraph::from_edges(&[("A", "B", 5), ("A", "C", 1), ("C", "B", 1)], "A", &["B"])
            .unwrap();
    let start = graph.initial_state().unwrap();
    let result = search(start, &graph, &SearchPolicy::first_match()).unwrap();

    let path = result.path().expect("B reachable");
    let names: Vec<_> = path.states().map(|&n| graph.name(n).unwrap()).collect();
    assert_eq!(names, ["A", "C", "B"]);
    assert_eq!(path.total_cost(), 2);
}

#[test]
fn breadth_first_takes_fewest_edges_not_cheapest() {
    let graph =
        WeightedGraph::from_edges(&[("A", "B", 5), ("A", "C", 1), ("C", "B", 1)], "A", &["B"])
            .unwrap();
    let start = graph.initial_state().unwrap();
    let policy = SearchPolicy::first_match().with_order(FrontierOrder::BreadthFirst);
    let result = search(start, &graph, &policy).unwrap();

    let path = result.path().unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.total_cost(), 5);
}

#[test]
fn expansion_cap_aborts_after_exactly_the_limit() {
    let policy = SearchPolicy::first_match().with_max_expansions(100);
    let result = search_fn(
        0u64,
        |n: &u64| vec![(n + 1, 1), (0, 1)],
        |_: &u64| false,
        &policy,
    )
    .unwrap();

    assert!(result.is_aborted());
    assert!(matches!(result.outcome, SearchOutcome::Aborted { .. }));
    assert_eq!(
        result.termination,
        TerminationReason::ExpansionBudgetExceeded { limit: 100 }
    );
    assert_eq!(result.stats.expansions, 100);
}

#[test]
fn goal_at_root_returns_empty_path_without_expanding() {
    let graph = AdjacencyGraph {
        edges: vec![vec![(1, 1)], vec![]],
        goals: vec![0],
    };
    let counting = Counting::new(&graph);
    let result = search(0, &counting, &SearchPolicy::first_match()).unwrap();

    let path = result.path().unwrap();
    assert!(path.is_empty());
    assert_eq!(path.total_cost(), 0);
    assert_eq!(counting.total_calls(), 0);
    assert_eq!(result.stats.expansions, 0);
}

#[test]
fn dead_end_root_is_no_solution() {
    let graph = AdjacencyGraph {
        edges: vec![vec![], vec![]],
        goals: vec![1],
    };
    let result = search(0, &graph, &SearchPolicy::first_match()).unwrap();

    assert_eq!(result.outcome, SearchOutcome::NoSolutionFound);
    assert_eq!(result.termination, TerminationReason::FrontierExhausted);
    assert_eq!(result.stats.expansions, 1);
    assert_eq!(result.stats.dead_ends, 1);
}

#[test]
fn unreachable_goal_exhausts_finite_space() {
    let graph = AdjacencyGraph {
        edges: vec![vec![(1, 1)], vec![(2, 1)], vec![(0, 1)], vec![]],
        goals: vec![3],
    };
    let counting = Counting::new(&graph);
    let result = search(0, &counting, &SearchPolicy::first_match()).unwrap();

    assert_eq!(result.outcome, SearchOutcome::NoSolutionFound);
    assert_eq!(counting.total_calls(), 3);
    assert_eq!(counting.max_calls(), 1);
}

struct Poisoned;

impl SearchProblem for Poisoned {
    type State = u32;
    type Action = ();

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "poisoned"
    }

    fn expand(&self, state: &u32) -> Result<Vec<Successor<u32, ()>>, InvalidState> {
        if *state == 3 {
            return Err(InvalidState::new("three is not a state"));
        }
        Ok(vec![Successor::unit(state + 1, ())])
    }

    fn is_goal(&self, _: &u32) -> bool {
        false
    }
}

#[test]
fn invalid_state_is_fatal_and_names_the_depth() {
    let err = search(0, &Poisoned, &SearchPolicy::first_match()).unwrap_err();
    match err {
        SearchError::InvalidState { depth, detail, .. } => {
            assert_eq!(depth, 3);
            assert!(detail.contains("three"));
        }
        other => panic!("expected InvalidState, got {other}"),
    }
}

#[test]
fn fill_rejects_orders_other_than_lowest_cost() {
    for order in [FrontierOrder::DepthFirst, FrontierOrder::BreadthFirst] {
        let policy = SearchPolicy::fill(10).with_order(order);
        let err =
            search_fn(0u32, |n: &u32| vec![(n + 1, 1)], |_: &u32| false, &policy).unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedPolicy { .. }), "{}", order.as_str());
    }
}

#[test]
fn weighted_fill_settles_every_state_at_its_cheapest_cost() {
    // The direct edge A -> B is reached first but costs more than A -> C -> B,
    // and D is only within the bound through the cheap route.
    let graph = WeightedGraph::from_edges(
        &[("A", "B", 5), ("A", "C", 1), ("C", "B", 1), ("B", "D", 4)],
        "A",
        &["D"],
    )
    .unwrap();
    let start = graph.initial_state().unwrap();
    let result = search(start, &graph, &SearchPolicy::fill(6)).unwrap();

    let reached = result.reachable().unwrap();
    let settled: String = reached.states().map(|&n| graph.name(n).unwrap()).collect();
    assert_eq!(settled, "ACBD");
    let cost = |name: &str| {
        let node = reached.states().find(|&&n| graph.name(n) == Some(name))?;
        reached.cost_of(node)
    };
    assert_eq!(cost("B"), Some(2));
    assert_eq!(cost("D"), Some(6));
    assert_eq!(result.termination, TerminationReason::FillComplete { settled: 4 });
}

#[test]
fn aborted_fill_includes_the_state_popped_at_the_cap() {
    let policy = SearchPolicy::fill(1_000).with_max_expansions(5);
    let result = search_fn(0u32, |n: &u32| vec![(n + 1, 1)], |_: &u32| false, &policy).unwrap();

    assert_eq!(result.stats.expansions, 5);
    match &result.outcome {
        SearchOutcome::Aborted { reached, paths } => {
            assert!(paths.is_empty());
            assert_eq!(reached.len(), 6);
            assert_eq!(reached.cost_of(&5), Some(5));
        }
        other => panic!("expected Aborted, got {other:?}"),
    }
}

#[test]
fn time_cap_aborts_endless_search() {
    let limit = Duration::from_millis(10);
    let policy = SearchPolicy::first_match()
        .with_max_expansions(u64::MAX)
        .with_max_duration(limit);
    let result = search_fn(0u64, |n: &u64| vec![(n + 1, 1)], |_: &u64| false, &policy).unwrap();

    assert_eq!(result.termination, TerminationReason::TimeBudgetExceeded { limit });
    assert!(matches!(result.outcome, SearchOutcome::Aborted { .. }));
    assert!(result.is_aborted());
    assert!(result.stats.expansions > 0);
}

#[test]
fn cost_overflow_is_reported_not_wrapped() {
    let result = search_fn(
        0u32,
        |n: &u32| vec![(n + 1, u64::MAX)],
        |_: &u32| false,
        &SearchPolicy::first_match(),
    );
    assert!(matches!(result, Err(SearchError::CostOverflow { .. })));
}

#[test]
fn frontier_cap_aborts_wide_search() {
    let policy = SearchPolicy::first_match()
        .with_order(FrontierOrder::BreadthFirst)
        .with_max_frontier_size(8);
    let result = search_fn(
        1u64,
        |n: &u64| vec![(n * 2, 1), (n * 2 + 1, 1)],
        |_: &u64| false,
        &policy,
    )
    .unwrap();

    assert_eq!(
        result.termination,
        TerminationReason::FrontierBudgetExceeded { limit: 8 }
    );
    assert!(result.stats.frontier_high_water > 8);
}

#[test]
fn depth_limit_bounds_exploration() {
    let policy = SearchPolicy::first_match()
        .with_order(FrontierOrder::BreadthFirst)
        .with_max_depth(5);
    let result = search_fn(0u32, |n: &u32| vec![(n + 1, 1)], |n: &u32| *n == 10, &policy).unwrap();

    assert_eq!(result.outcome, SearchOutcome::NoSolutionFound);
    assert_eq!(result.stats.max_depth_reached, 5);
    assert!(result.stats.pruned >= 1);
}
