//! Seeded random checks of the engine against the reference solvers in
//! `lock_tests::oracle`.
//!
//! Every case is driven by a fixed seed so a failure names the seed that
//! reproduces it.

use lock_tests::counting::Counting;
use lock_tests::oracle::AdjacencyGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use waypoint_harness::worlds::grid_maze::GridMaze;
use waypoint_search::{search, Cost, FrontierOrder, SearchOutcome, SearchPolicy};

const SEEDS: u64 = 64;

fn random_graph(seed: u64, max_cost: Cost) -> AdjacencyGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = rng.random_range(2..24);
    let mut edges = vec![Vec::new(); n];
    for from in &mut edges {
        for _ in 0..rng.random_range(0..4_u32) {
            from.push((rng.random_range(0..n), rng.random_range(1..=max_cost)));
        }
    }
    let goals = (1..n).filter(|_| rng.random_bool(0.15)).collect();
    AdjacencyGraph { edges, goals }
}

fn random_maze(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h) = (rng.random_range(4..14), rng.random_range(4..14));
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                        '#'
                    } else if (x, y) == (1, 1) {
                        'S'
                    } else if (x, y) == (w - 2, h - 2) {
                        'G'
                    } else if rng.random_bool(0.25) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

fn node_path(result: &waypoint_search::SearchResult<usize, ()>) -> Option<Vec<usize>> {
    result.path().map(|p| p.states().copied().collect())
}

#[test]
fn unit_cost_paths_have_fewest_hops() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 1);
        let expected = graph.bfs_hops(0);
        for order in [FrontierOrder::BreadthFirst, FrontierOrder::LowestCost] {
            let policy = SearchPolicy::first_match().with_order(order);
            let result = search(0, &graph, &policy).unwrap();
            let hops = result.path().map(waypoint_search::Path::len);
            assert_eq!(hops, expected, "seed {seed}, order {}", order.as_str());
        }
    }
}

#[test]
fn lowest_cost_matches_bellman_ford() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 9);
        let result = search(0, &graph, &SearchPolicy::first_match()).unwrap();

        match graph.min_goal_cost(0) {
            Some(best) => {
                let path = result.path().unwrap_or_else(|| panic!("seed {seed}: no path"));
                assert_eq!(path.total_cost(), best, "seed {seed}");
                let nodes = node_path(&result).unwrap();
                assert!(graph.is_valid_path(&nodes, best), "seed {seed}: {nodes:?}");
            }
            None => assert_eq!(result.outcome, SearchOutcome::NoSolutionFound, "seed {seed}"),
        }
    }
}

#[test]
fn no_state_is_expanded_twice() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 9);
        for order in [
            FrontierOrder::BreadthFirst,
            FrontierOrder::DepthFirst,
            FrontierOrder::LowestCost,
        ] {
            let counting = Counting::new(&graph);
            let policy = SearchPolicy::exhaustive().with_order(order);
            let result = search(0, &counting, &policy).unwrap();
            assert!(
                counting.max_calls() <= 1,
                "seed {seed}, order {}",
                order.as_str()
            );
            assert_eq!(result.stats.expansions, counting.total_calls());
        }
    }
}

#[test]
fn exhaustive_finds_every_reachable_goal_at_its_cheapest_cost() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 9);
        let dist = graph.bellman_ford(0);
        let result = search(0, &graph, &SearchPolicy::exhaustive()).unwrap();

        let reachable_goals = graph.goals.iter().filter(|&&g| dist[g].is_some()).count();
        assert_eq!(result.paths().len(), reachable_goals, "seed {seed}");
        for path in result.paths() {
            assert_eq!(Some(path.total_cost()), dist[*path.end()], "seed {seed}");
        }
    }
}

#[test]
fn fill_settles_exactly_the_states_within_the_bound() {
    for seed in 0..SEEDS {
        let graph = random_graph(seed, 5);
        let bound = 12;
        let dist = graph.bellman_ford(0);
        let result = search(0, &graph, &SearchPolicy::fill(bound)).unwrap();
        let reached = result.reachable().unwrap();

        let expected = dist.iter().filter(|d| d.is_some_and(|d| d <= bound)).count();
        assert_eq!(reached.len(), expected, "seed {seed}");
        for entry in reached.iter() {
            assert_eq!(Some(entry.cost), dist[entry.state], "seed {seed}");
        }
    }
}

#[test]
fn manhattan_heuristic_keeps_cost_and_saves_work() {
    for seed in 0..SEEDS {
        let rows = random_maze(seed);
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let informed = GridMaze::parse(&rows).unwrap();
        let uniform = informed.clone().with_heuristic(false);
        let start = informed.start();

        let a_star = search(start, &informed, &SearchPolicy::first_match()).unwrap();
        let ucs = search(start, &uniform, &SearchPolicy::first_match()).unwrap();

        assert_eq!(
            a_star.path().map(waypoint_search::Path::total_cost),
            ucs.path().map(waypoint_search::Path::total_cost),
            "seed {seed}"
        );
        assert!(
            a_star.stats.expansions <= ucs.stats.expansions,
            "seed {seed}: {} > {}",
            a_star.stats.expansions,
            ucs.stats.expansions
        );
    }
}
