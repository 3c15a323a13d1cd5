//! `GridMaze`: 4-connected text grid.
//!
//! `#` is a wall, `.` is open floor, `S` and `G` mark the start and goal
//! (both open). Every move costs 1. The Manhattan-distance heuristic is
//! admissible and consistent for unit moves, so A* keeps the minimum-cost
//! guarantee.

use waypoint_search::{Cost, InvalidState, SearchProblem, Successor};

use crate::contract::{HarnessWorld, WorldHarnessError};

/// `(x, y)`, origin top-left.
pub type Pos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct GridMaze {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    start: Pos,
    goal: Pos,
    use_heuristic: bool,
}

impl GridMaze {
    /// Parse a maze from rows of equal width.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] on ragged rows, unknown
    /// characters, or a missing or repeated `S`/`G`.
    pub fn parse(rows: &[&str]) -> Result<Self, WorldHarnessError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(WorldHarnessError::invalid("maze has no cells"));
        }

        let mut walls = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(WorldHarnessError::invalid(format!(
                    "row {y} has width {}, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let marker = match c {
                    '#' => {
                        walls.push(true);
                        continue;
                    }
                    '.' => None,
                    'S' => Some(&mut start),
                    'G' => Some(&mut goal),
                    other => {
                        return Err(WorldHarnessError::invalid(format!(
                            "unknown cell {other:?} at ({x}, {y})"
                        )))
                    }
                };
                walls.push(false);
                if let Some(slot) = marker {
                    if slot.replace((x, y)).is_some() {
                        return Err(WorldHarnessError::invalid(format!("repeated {c:?}")));
                    }
                }
            }
        }

        Ok(Self {
            width,
            height,
            walls,
            start: start.ok_or_else(|| WorldHarnessError::invalid("no start 'S'"))?,
            goal: goal.ok_or_else(|| WorldHarnessError::invalid("no goal 'G'"))?,
            use_heuristic: true,
        })
    }

    /// Toggle the Manhattan heuristic (off = uniform-cost search).
    #[must_use]
    pub fn with_heuristic(mut self, on: bool) -> Self {
        self.use_heuristic = on;
        self
    }

    #[must_use]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Pos {
        self.goal
    }

    #[must_use]
    pub fn is_open(&self, (x, y): Pos) -> bool {
        x < self.width && y < self.height && !self.walls[y * self.width + x]
    }

    fn neighbor(&self, (x, y): Pos, step: Step) -> Option<Pos> {
        let next = match step {
            Step::Up => (x, y.checked_sub(1)?),
            Step::Down => (x, y + 1),
            Step::Left => (x.checked_sub(1)?, y),
            Step::Right => (x + 1, y),
        };
        self.is_open(next).then_some(next)
    }
}

impl SearchProblem for GridMaze {
    type State = Pos;
    type Action = Step;

    fn problem_id(&self) -> &str {
        self.world_id()
    }

    fn expand(&self, state: &Pos) -> Result<Vec<Successor<Pos, Step>>, InvalidState> {
        if !self.is_open(*state) {
            return Err(InvalidState::new(format!("{state:?} is not an open cell")));
        }
        Ok([Step::Up, Step::Down, Step::Left, Step::Right]
            .into_iter()
            .filter_map(|step| Some(Successor::unit(self.neighbor(*state, step)?, step)))
            .collect())
    }

    fn is_goal(&self, state: &Pos) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, &(x, y): &Pos) -> Cost {
        if !self.use_heuristic {
            return 0;
        }
        let d = x.abs_diff(self.goal.0) + y.abs_diff(self.goal.1);
        Cost::try_from(d).unwrap_or(Cost::MAX)
    }
}

impl HarnessWorld for GridMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid_maze"
    }

    fn initial_state(&self) -> Result<Pos, WorldHarnessError> {
        Ok(self.start)
    }
}
