//! `Elevator`: move generator/microchip pairs to the top floor.
//!
//! The elevator carries one or two items up or down one floor per move. A
//! microchip on a floor with any generator is fried unless its own
//! generator is there too. The goal is every item on the top floor.
//!
//! Element names never matter, only where each element's generator and
//! chip are, so a state is the elevator floor plus the sorted multiset of
//! `(generator floor, chip floor)` pairs. Sorting collapses states that
//! differ only by swapping element labels.

use waypoint_kernel::state::{IdentityWriter, SearchState};
use waypoint_search::{InvalidState, SearchProblem, Successor};

use crate::contract::{HarnessWorld, WorldHarnessError};

/// `(generator floor, microchip floor)` for one element.
pub type Pair = (u8, u8);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Facility {
    pub elevator: u8,
    /// Sorted ascending.
    pub pairs: Vec<Pair>,
}

impl Facility {
    #[must_use]
    pub fn new(elevator: u8, mut pairs: Vec<Pair>) -> Self {
        pairs.sort_unstable();
        Self { elevator, pairs }
    }

    /// No chip shares a floor with a foreign generator while its own is
    /// elsewhere.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.pairs.iter().all(|&(generator, chip)| {
            generator == chip || !self.pairs.iter().any(|&(g, _)| g == chip)
        })
    }

    fn items_on(&self, floor: u8) -> Vec<Item> {
        let mut items = Vec::new();
        for (i, &(generator, chip)) in self.pairs.iter().enumerate() {
            if generator == floor {
                items.push(Item::Generator(i));
            }
            if chip == floor {
                items.push(Item::Microchip(i));
            }
        }
        items
    }

    fn carry(&self, to_floor: u8, items: &[Item]) -> Self {
        let mut pairs = self.pairs.clone();
        for item in items {
            match *item {
                Item::Generator(i) => pairs[i].0 = to_floor,
                Item::Microchip(i) => pairs[i].1 = to_floor,
            }
        }
        Self::new(to_floor, pairs)
    }
}

impl SearchState for Facility {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.u64(u64::from(self.elevator)).seq(self.pairs.iter());
    }
}

/// An item by its index in the pre-move pair list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Generator(usize),
    Microchip(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub to_floor: u8,
    pub carried: Vec<Item>,
}

#[derive(Debug, Clone)]
pub struct Elevator {
    floors: u8,
    start: Facility,
}

impl Elevator {
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] for fewer than two
    /// floors or an item on a floor that does not exist.
    pub fn new(floors: u8, pairs: &[Pair]) -> Result<Self, WorldHarnessError> {
        if floors < 2 {
            return Err(WorldHarnessError::invalid("need at least two floors"));
        }
        if let Some(pair) = pairs.iter().find(|&&(g, c)| g >= floors || c >= floors) {
            return Err(WorldHarnessError::invalid(format!(
                "pair {pair:?} is outside floors 0..{floors}"
            )));
        }
        Ok(Self {
            floors,
            start: Facility::new(0, pairs.to_vec()),
        })
    }

    /// Four floors: both chips on the ground floor, the hydrogen generator
    /// on the second and the lithium generator on the third. Solved in 11
    /// moves.
    #[must_use]
    pub fn example() -> Self {
        Self {
            floors: 4,
            start: Facility::new(0, vec![(1, 0), (2, 0)]),
        }
    }

    #[must_use]
    pub fn top_floor(&self) -> u8 {
        self.floors - 1
    }

    fn check(&self, state: &Facility) -> Result<(), InvalidState> {
        let in_range = state.elevator < self.floors
            && state
                .pairs
                .iter()
                .all(|&(g, c)| g < self.floors && c < self.floors);
        if !in_range {
            return Err(InvalidState::new(format!(
                "{state:?} has a floor outside 0..{}",
                self.floors
            )));
        }
        if !state.is_safe() {
            return Err(InvalidState::new(format!("{state:?} fries a microchip")));
        }
        Ok(())
    }
}

impl SearchProblem for Elevator {
    type State = Facility;
    type Action = Ride;

    fn problem_id(&self) -> &str {
        self.world_id()
    }

    fn expand(&self, state: &Facility) -> Result<Vec<Successor<Facility, Ride>>, InvalidState> {
        self.check(state)?;

        let items = state.items_on(state.elevator);
        let mut loads: Vec<Vec<Item>> = items.iter().map(|&i| vec![i]).collect();
        for (a, &first) in items.iter().enumerate() {
            for &second in &items[a + 1..] {
                loads.push(vec![first, second]);
            }
        }

        let targets = [
            state.elevator.checked_sub(1),
            Some(state.elevator + 1).filter(|&f| f < self.floors),
        ];

        let mut successors = Vec::new();
        for to_floor in targets.into_iter().flatten() {
            for load in &loads {
                let next = state.carry(to_floor, load);
                if next.is_safe() {
                    successors.push(Successor::unit(
                        next,
                        Ride {
                            to_floor,
                            carried: load.clone(),
                        },
                    ));
                }
            }
        }
        Ok(successors)
    }

    fn is_goal(&self, state: &Facility) -> bool {
        let top = self.top_floor();
        state.pairs.iter().all(|&(g, c)| g == top && c == top)
    }
}

impl HarnessWorld for Elevator {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "elevator"
    }

    fn initial_state(&self) -> Result<Facility, WorldHarnessError> {
        if !self.start.is_safe() {
            return Err(WorldHarnessError::invalid("starting layout fries a microchip"));
        }
        Ok(self.start.clone())
    }
}
