//! `CubicleMaze`: an unbounded office floor whose walls come from a formula.
//!
//! `(x, y)` is a wall iff `x*x + 3*x + 2*x*y + y + y*y + favorite` has an odd
//! number of set bits. Negative coordinates are walls, which the unsigned
//! state type enforces. Used both to reach a target and to flood every
//! cell within N steps.

use waypoint_search::{Cost, InvalidState, SearchProblem, Successor};

use crate::contract::{HarnessWorld, WorldHarnessError};

pub type Cell = (u64, u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubicleMaze {
    favorite: u64,
    start: Cell,
    target: Option<Cell>,
}

impl CubicleMaze {
    /// Start at `(1, 1)` with no target (fill only).
    #[must_use]
    pub fn new(favorite: u64) -> Self {
        Self {
            favorite,
            start: (1, 1),
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Cell) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn is_wall(&self, (x, y): Cell) -> bool {
        // Wrapping keeps far-away cells well-defined.
        let value = x
            .wrapping_mul(x)
            .wrapping_add(x.wrapping_mul(3))
            .wrapping_add(x.wrapping_mul(y).wrapping_mul(2))
            .wrapping_add(y)
            .wrapping_add(y.wrapping_mul(y))
            .wrapping_add(self.favorite);
        value.count_ones() % 2 == 1
    }

    fn neighbors((x, y): Cell) -> impl Iterator<Item = Cell> {
        [
            x.checked_sub(1).map(|x| (x, y)),
            x.checked_add(1).map(|x| (x, y)),
            y.checked_sub(1).map(|y| (x, y)),
            y.checked_add(1).map(|y| (x, y)),
        ]
        .into_iter()
        .flatten()
    }
}

impl SearchProblem for CubicleMaze {
    type State = Cell;
    type Action = ();

    fn problem_id(&self) -> &str {
        self.world_id()
    }

    fn expand(&self, state: &Cell) -> Result<Vec<Successor<Cell, ()>>, InvalidState> {
        if self.is_wall(*state) {
            return Err(InvalidState::new(format!("{state:?} is inside a wall")));
        }
        Ok(Self::neighbors(*state)
            .filter(|&cell| !self.is_wall(cell))
            .map(|cell| Successor::unit(cell, ()))
            .collect())
    }

    fn is_goal(&self, state: &Cell) -> bool {
        self.target == Some(*state)
    }

    fn heuristic(&self, &(x, y): &Cell) -> Cost {
        self.target
            .map_or(0, |(tx, ty)| x.abs_diff(tx).saturating_add(y.abs_diff(ty)))
    }
}

impl HarnessWorld for CubicleMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "cubicle_maze"
    }

    fn initial_state(&self) -> Result<Cell, WorldHarnessError> {
        if self.is_wall(self.start) {
            return Err(WorldHarnessError::invalid(format!(
                "start {:?} is a wall",
                self.start
            )));
        }
        Ok(self.start)
    }
}
