use std::fmt;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::{ActionError, core::BOARD_WIDTH};

/// Number of raw rotation slots in the action space.
pub const ROTATION_SLOTS: usize = 4;
/// Size of the discrete action space (`ROTATION_SLOTS × BOARD_WIDTH`).
pub const ACTION_COUNT: usize = ROTATION_SLOTS * BOARD_WIDTH;

/// A placement request: a raw rotation slot and a target column.
///
/// Encoded as the integer `rotation × 10 + column` in `[0, 40)`. Producers
/// of actions (agents, prediction services) and the engine share this
/// bijection, so the action also serialises as that integer.
///
/// The rotation slot is *not* reduced here. The engine reduces it modulo the
/// active piece's rotation count when it resolves the placement.
///
/// # Example
///
/// ```
/// use gymtris_engine::Action;
///
/// let action = Action::from_index(23).unwrap();
/// assert_eq!(action.rotation(), 2);
/// assert_eq!(action.column(), 3);
/// assert_eq!(action.index(), 23);
/// assert!(Action::from_index(40).is_err());
/// assert_eq!(Action::default().index(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Action {
    rotation: u8,
    column: u8,
}

impl Action {
    #[expect(clippy::cast_possible_truncation)]
    pub fn new(rotation: usize, column: usize) -> Result<Self, ActionError> {
        if rotation >= ROTATION_SLOTS {
            return Err(ActionError::RotationOutOfRange { rotation });
        }
        if column >= BOARD_WIDTH {
            return Err(ActionError::ColumnOutOfRange { column });
        }
        Ok(Self {
            rotation: rotation as u8,
            column: column as u8,
        })
    }

    pub fn from_index(index: usize) -> Result<Self, ActionError> {
        if index >= ACTION_COUNT {
            return Err(ActionError::OutOfRange { index });
        }
        Self::new(index / BOARD_WIDTH, index % BOARD_WIDTH)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.rotation() * BOARD_WIDTH + self.column()
    }

    #[must_use]
    pub fn rotation(self) -> usize {
        usize::from(self.rotation)
    }

    #[must_use]
    pub fn column(self) -> usize {
        usize::from(self.column)
    }

    /// Iterates over the whole action space in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ACTION_COUNT).filter_map(|index| Self::from_index(index).ok())
    }
}

impl TryFrom<usize> for Action {
    type Error = ActionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.index()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rotation {}, column {})", self.index(), self.rotation, self.column)
    }
}

/// Samples uniformly over the whole action space.
impl Distribution<Action> for StandardUniform {
    #[expect(clippy::cast_possible_truncation)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        Action {
            rotation: rng.random_range(0..ROTATION_SLOTS) as u8,
            column: rng.random_range(0..BOARD_WIDTH) as u8,
        }
    }
}
