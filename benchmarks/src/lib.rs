//! Shared helpers for waypoint benchmark suites.

use waypoint_harness::contract::HarnessWorld;
use waypoint_harness::worlds::grid_maze::GridMaze;
use waypoint_search::{search, SearchPolicy, SearchResult};

/// A walled `width x height` room with `S` top-left and `G` bottom-right and
/// no interior walls. Many equal-cost routes, so ties dominate.
///
/// # Panics
///
/// Panics if either dimension is below 3.
#[must_use]
pub fn open_room(width: usize, height: usize) -> GridMaze {
    assert!(width >= 3 && height >= 3, "room needs an interior");
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| match (x, y) {
                    _ if x == 0 || y == 0 || x == width - 1 || y == height - 1 => '#',
                    (1, 1) => 'S',
                    _ if (x, y) == (width - 2, height - 2) => 'G',
                    _ => '.',
                })
                .collect()
        })
        .collect();
    parse(&rows)
}

/// A single corridor folded back and forth across the room: one route,
/// long paths, small frontier.
///
/// # Panics
///
/// Panics if either dimension is below 5.
#[must_use]
pub fn serpentine(width: usize, height: usize) -> GridMaze {
    assert!(width >= 5 && height >= 5, "serpentine needs two bends");
    let last_row = (height - 3) | 1;
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                    // Even interior rows are walls except one gap, alternating sides.
                    let divider = y % 2 == 0 && {
                        let gap = if (y / 2) % 2 == 1 { width - 2 } else { 1 };
                        x != gap
                    };
                    match (x, y) {
                        _ if border || divider || y > last_row => '#',
                        (1, 1) => 'S',
                        _ if y == last_row && x == goal_column(width, last_row) => 'G',
                        _ => '.',
                    }
                })
                .collect()
        })
        .collect();
    parse(&rows)
}

fn goal_column(width: usize, last_row: usize) -> usize {
    // The corridor enters the last row from the side its gap is on.
    if (last_row / 2) % 2 == 1 {
        1
    } else {
        width - 2
    }
}

fn parse(rows: &[String]) -> GridMaze {
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    GridMaze::parse(&rows).expect("generated maze is well-formed")
}

/// Run `world` from its own initial state, bypassing the harness report.
///
/// # Panics
///
/// Panics if the world has no initial state or the search fails fatally.
/// Benchmark setup failures are fatal.
pub fn search_world<W: HarnessWorld>(
    world: &W,
    policy: &SearchPolicy,
) -> SearchResult<W::State, W::Action> {
    let initial = world.initial_state().expect("initial_state");
    search(initial, world, policy).expect("search")
}
