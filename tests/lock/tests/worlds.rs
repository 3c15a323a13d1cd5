//! Known answers for the fixture worlds, run through the harness.

use waypoint_harness::contract::HarnessWorld;
use waypoint_harness::policy::RunConfig;
use waypoint_harness::runner::{run_world, AnswerSummary};
use waypoint_harness::worlds::bridges::Bridges;
use waypoint_harness::worlds::cubicle_maze::CubicleMaze;
use waypoint_harness::worlds::elevator::{Elevator, Facility};
use waypoint_search::{
    search, FrontierOrder, SearchOutcome, SearchPolicy, SearchProblem, TerminationReason,
};

#[test]
fn elevator_example_takes_eleven_moves() {
    let world = Elevator::example();
    let run = run_world(
        &world,
        &RunConfig::new(SearchPolicy::first_match().with_order(FrontierOrder::BreadthFirst)),
    )
    .unwrap();

    let path = run.result.path().unwrap();
    assert_eq!(path.len(), 11);
    assert!(path.states().all(Facility::is_safe));
    assert!(world.is_goal(path.end()));
    assert!(matches!(
        run.report.answer,
        AnswerSummary::Found { cost: 11, length: 11, .. }
    ));
}

#[test]
fn elevator_lowest_cost_agrees_with_breadth_first() {
    let world = Elevator::example();
    let start = world.initial_state().unwrap();
    let bfs = search(
        start.clone(),
        &world,
        &SearchPolicy::first_match().with_order(FrontierOrder::BreadthFirst),
    )
    .unwrap();
    let ucs = search(start, &world, &SearchPolicy::first_match()).unwrap();
    assert_eq!(
        bfs.path().unwrap().total_cost(),
        ucs.path().unwrap().total_cost()
    );
}

#[test]
fn elevator_rejects_unsafe_start() {
    // Chip 0 alone on floor 0 with generator 1.
    let world = Elevator::new(4, &[(1, 0), (0, 1)]).unwrap();
    assert!(world.initial_state().is_err());
    assert!(Elevator::new(4, &[(4, 0)]).is_err());
}

#[test]
fn cubicle_target_is_eleven_steps_away() {
    let maze = CubicleMaze::new(10).with_target((7, 4));
    let run = run_world(&maze, &RunConfig::new(SearchPolicy::first_match())).unwrap();

    let path = run.result.path().unwrap();
    assert_eq!(path.len(), 11);
    assert!(path.states().all(|&cell| !maze.is_wall(cell)));
    assert_eq!(*path.end(), (7, 4));
}

#[test]
fn cubicle_fill_counts_cells_within_bound() {
    let maze = CubicleMaze::new(10);
    for (bound, expected) in [(10, 18), (50, 151)] {
        let run = run_world(&maze, &RunConfig::new(SearchPolicy::fill(bound))).unwrap();
        let reached = run.result.reachable().unwrap();
        assert_eq!(reached.len(), expected, "bound {bound}");
        assert!(reached.max_cost() <= bound);
        assert_eq!(reached.cost_of(&(1, 1)), Some(0));
        assert_eq!(
            run.result.termination,
            TerminationReason::FillComplete {
                settled: expected as u64
            }
        );
    }
}

#[test]
fn bridges_strongest_and_longest() {
    let bridges = Bridges::example();
    let result = search(
        bridges.initial_state().unwrap(),
        &bridges,
        &SearchPolicy::exhaustive().with_order(FrontierOrder::DepthFirst),
    )
    .unwrap();

    let ends: Vec<_> = result.paths().iter().map(|p| *p.end()).collect();
    assert_eq!(bridges.strongest(&ends), Some(31));
    assert_eq!(bridges.longest(&ends), Some((4, 19)));
    for path in result.paths() {
        assert_eq!(path.len() as u32, path.end().length());
    }
}

#[test]
fn bridges_parse_matches_example() {
    let parsed = Bridges::parse(&["0/2", "2/2", "2/3", "3/4", "3/5", "0/1", "10/1", "9/10"]).unwrap();
    assert_eq!(parsed.components(), Bridges::example().components());
    assert!(Bridges::parse(&["0-2"]).is_err());
}

#[test]
fn bridges_enumeration_capped_keeps_partial_paths() {
    let bridges = Bridges::example();
    let result = search(
        bridges.initial_state().unwrap(),
        &bridges,
        &SearchPolicy::exhaustive()
            .with_order(FrontierOrder::DepthFirst)
            .with_max_expansions(3),
    )
    .unwrap();

    match result.outcome {
        SearchOutcome::Aborted { paths, .. } => {
            assert_eq!(paths.len(), 4);
            assert_eq!(paths[0].len(), 0);
        }
        other => panic!("expected Aborted, got {other:?}"),
    }
}
