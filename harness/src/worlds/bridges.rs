//! `Bridges`: chain two-port components starting from a zero port.
//!
//! Each component `a/b` joins a port of type `a` to a port of type `b` and
//! can be used once, in either direction. Every partial chain is itself a
//! bridge, so every state is a goal and exhaustive search enumerates them
//! all. A bridge's strength is the sum of its components' port values.

use waypoint_kernel::state::{IdentityWriter, SearchState};
use waypoint_search::{InvalidState, SearchProblem, Successor};

use crate::contract::{HarnessWorld, WorldHarnessError};

pub type Component = (u32, u32);

/// Components are tracked in a `u64` bitmask.
pub const MAX_COMPONENTS: usize = 64;

/// A bridge under construction: the free port and which components it uses.
///
/// Two chains with the same components ending on the same port have the
/// same strength and length, so they are one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bridge {
    pub open_port: u32,
    pub used: u64,
}

impl Bridge {
    #[must_use]
    pub fn length(&self) -> u32 {
        self.used.count_ones()
    }
}

impl SearchState for Bridge {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.u64(u64::from(self.open_port)).u64(self.used);
    }
}

#[derive(Debug, Clone)]
pub struct Bridges {
    components: Vec<Component>,
}

impl Bridges {
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] for more than
    /// [`MAX_COMPONENTS`] components.
    pub fn new(components: Vec<Component>) -> Result<Self, WorldHarnessError> {
        if components.len() > MAX_COMPONENTS {
            return Err(WorldHarnessError::invalid(format!(
                "{} components, at most {MAX_COMPONENTS} supported",
                components.len()
            )));
        }
        Ok(Self { components })
    }

    /// Parse `a/b` rows.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidFixture`] for a malformed row or
    /// too many components.
    pub fn parse(rows: &[&str]) -> Result<Self, WorldHarnessError> {
        let components = rows
            .iter()
            .map(|row| -> Result<Component, WorldHarnessError> {
                let (a, b) = row
                    .trim()
                    .split_once('/')
                    .ok_or_else(|| WorldHarnessError::invalid(format!("bad component {row:?}")))?;
                let port = |s: &str| {
                    s.parse::<u32>()
                        .map_err(|e| WorldHarnessError::invalid(format!("bad port {s:?}: {e}")))
                };
                Ok((port(a)?, port(b)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(components)
    }

    /// The eight-component example: strongest 31, longest 19.
    #[must_use]
    pub fn example() -> Self {
        Self {
            components: vec![
                (0, 2),
                (2, 2),
                (2, 3),
                (3, 4),
                (3, 5),
                (0, 1),
                (10, 1),
                (9, 10),
            ],
        }
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn strength(&self, bridge: &Bridge) -> u64 {
        self.components
            .iter()
            .enumerate()
            .filter(|(i, _)| bridge.used & (1 << i) != 0)
            .map(|(_, &(a, b))| u64::from(a) + u64::from(b))
            .sum()
    }

    /// Highest strength among `bridges`.
    pub fn strongest<'a>(&self, bridges: impl IntoIterator<Item = &'a Bridge>) -> Option<u64> {
        bridges.into_iter().map(|b| self.strength(b)).max()
    }

    /// Longest bridge, ties broken by strength. Returns `(length, strength)`.
    pub fn longest<'a>(&self, bridges: impl IntoIterator<Item = &'a Bridge>) -> Option<(u32, u64)> {
        bridges
            .into_iter()
            .map(|b| (b.length(), self.strength(b)))
            .max()
    }
}

impl SearchProblem for Bridges {
    type State = Bridge;
    /// Index of the component attached.
    type Action = usize;

    fn problem_id(&self) -> &str {
        self.world_id()
    }

    fn expand(&self, state: &Bridge) -> Result<Vec<Successor<Bridge, usize>>, InvalidState> {
        let known = if self.components.len() == MAX_COMPONENTS {
            u64::MAX
        } else {
            (1u64 << self.components.len()) - 1
        };
        if state.used & !known != 0 {
            return Err(InvalidState::new(format!(
                "bridge uses component bits {:#x} beyond the {} known",
                state.used & !known,
                self.components.len()
            )));
        }

        Ok(self
            .components
            .iter()
            .enumerate()
            .filter(|(i, _)| state.used & (1 << i) == 0)
            .filter_map(|(i, &(a, b))| {
                let open_port = if a == state.open_port {
                    b
                } else if b == state.open_port {
                    a
                } else {
                    return None;
                };
                let next = Bridge {
                    open_port,
                    used: state.used | (1 << i),
                };
                Some(Successor::unit(next, i))
            })
            .collect())
    }

    fn is_goal(&self, _state: &Bridge) -> bool {
        true
    }
}

impl HarnessWorld for Bridges {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "bridges"
    }

    fn initial_state(&self) -> Result<Bridge, WorldHarnessError> {
        Ok(Bridge {
            open_port: 0,
            used: 0,
        })
    }
}
