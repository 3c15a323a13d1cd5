//! Root-branch parallelism matches running the same branches one at a time.

use lock_tests::oracle::AdjacencyGraph;
use waypoint_harness::worlds::cubicle_maze::CubicleMaze;
use waypoint_search::{best_path, search, search_branches, SearchPolicy};

#[test]
fn branches_match_sequential_runs() {
    let maze = CubicleMaze::new(10).with_target((7, 4));
    let roots = vec![(1, 1), (0, 0), (4, 5), (6, 5), (7, 4)];
    let policy = SearchPolicy::first_match().with_graph();

    let parallel = search_branches(roots.clone(), &maze, &policy);
    assert_eq!(parallel.len(), roots.len());

    for (root, branch) in roots.into_iter().zip(&parallel) {
        let sequential = search(root, &maze, &policy).unwrap();
        let branch = branch.as_ref().unwrap();
        assert_eq!(branch.outcome, sequential.outcome, "root {root:?}");
        assert_eq!(branch.stats.expansions, sequential.stats.expansions);
        assert_eq!(
            branch.graph.as_ref().unwrap().digest().unwrap(),
            sequential.graph.as_ref().unwrap().digest().unwrap(),
            "root {root:?}"
        );
    }
}

#[test]
fn best_branch_is_cheapest_then_lowest_index() {
    // 0 -> 3 costs 6, 1 -> 3 costs 2, 2 -> 3 costs 2.
    let graph = AdjacencyGraph {
        edges: vec![vec![(3, 6)], vec![(3, 2)], vec![(3, 2)], vec![]],
        goals: vec![3],
    };
    let results = search_branches(vec![0, 1, 2], &graph, &SearchPolicy::first_match());
    let (index, path) = best_path(&results).unwrap();
    assert_eq!(index, 1);
    assert_eq!(path.total_cost(), 2);

    for _ in 0..8 {
        let again = search_branches(vec![0, 1, 2], &graph, &SearchPolicy::first_match());
        assert_eq!(best_path(&again).map(|(i, _)| i), Some(1));
    }
}

#[test]
fn failed_branches_are_skipped() {
    let maze = CubicleMaze::new(10).with_target((7, 4));
    // (1, 0) is a wall: expanding it is an invalid state.
    let results = search_branches(vec![(1, 0), (1, 1)], &maze, &SearchPolicy::first_match());
    assert!(results[0].is_err());
    let (index, path) = best_path(&results).unwrap();
    assert_eq!(index, 1);
    assert_eq!(path.len(), 11);
}
