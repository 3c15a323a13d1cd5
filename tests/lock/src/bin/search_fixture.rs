//! Binary that runs the fixture worlds through the harness runner and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines on stdout. Logging (`RUST_LOG`) goes to stderr
//! and never changes stdout.

use waypoint_harness::policy::RunConfig;
use waypoint_harness::runner::run_world;
use waypoint_harness::worlds::bridges::Bridges;
use waypoint_harness::worlds::cubicle_maze::CubicleMaze;
use waypoint_harness::worlds::elevator::Elevator;
use waypoint_search::{FrontierOrder, SearchPolicy};

fn main() {
    env_logger::init();
    log::info!("search_fixture: elevator, cubicle fill, bridges");

    let config = RunConfig::new(
        SearchPolicy::first_match()
            .with_order(FrontierOrder::BreadthFirst)
            .with_graph(),
    )
    .with_progress_every(50);
    let elevator = run_world(&Elevator::example(), &config).expect("elevator run failed");
    let path = elevator.result.path().expect("elevator has a solution");
    println!("elevator_moves={}", path.len());
    println!("elevator_expansions={}", elevator.report.stats.expansions);
    println!("elevator_termination={}", elevator.report.termination);
    println!("elevator_policy_digest={}", elevator.report.policy_digest);
    println!(
        "elevator_graph_digest={}",
        elevator
            .report
            .graph_digest
            .as_ref()
            .expect("graph recorded")
    );
    println!("elevator_report_digest={}", elevator.report.digest);

    log::debug!("elevator solved in {} moves", path.len());

    let maze = CubicleMaze::new(10);
    let fill = run_world(&maze, &RunConfig::new(SearchPolicy::fill(50))).expect("fill run failed");
    let reached = fill.result.reachable().expect("fill result");
    println!("cubicle_fill_settled={}", reached.len());
    println!("cubicle_fill_report_digest={}", fill.report.digest);

    let bridges = Bridges::example();
    let enumeration = run_world(
        &bridges,
        &RunConfig::new(SearchPolicy::exhaustive().with_order(FrontierOrder::DepthFirst)),
    )
    .expect("bridge enumeration failed");
    let ends: Vec<_> = enumeration.result.paths().iter().map(|p| *p.end()).collect();
    println!(
        "bridges_strongest={}",
        bridges.strongest(&ends).expect("at least one bridge")
    );
    log::debug!("{} bridges enumerated", ends.len());
    let (length, strength) = bridges.longest(&ends).expect("at least one bridge");
    println!("bridges_longest={length}:{strength}");
    println!("bridges_report_digest={}", enumeration.report.digest);
}
