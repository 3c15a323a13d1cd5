//! Fixture worlds: small in-memory puzzle domains that exercise the engine.

pub mod bridges;
pub mod cubicle_maze;
pub mod elevator;
pub mod grid_maze;
pub mod weighted_graph;
