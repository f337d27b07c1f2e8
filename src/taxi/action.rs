//! The discrete action space

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of discrete actions
pub const NUM_ACTIONS: usize = 6;

/// One of the six taxi actions. The discriminants are the wire/table indices
/// and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Down = 0,
    Up = 1,
    Right = 2,
    Left = 3,
    Pickup = 4,
    Dropoff = 5,
}

/// All actions in index order
pub const ALL_ACTIONS: [Action; NUM_ACTIONS] = [
    Action::Down,
    Action::Up,
    Action::Right,
    Action::Left,
    Action::Pickup,
    Action::Dropoff,
];

impl Action {
    /// Table index of this action
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw index into an action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for indices outside [0, 5].
    pub fn from_index(index: usize) -> Result<Action> {
        ALL_ACTIONS
            .get(index)
            .copied()
            .ok_or(Error::InvalidAction { action: index })
    }

    /// Short name for logs and rollout traces
    pub fn name(self) -> &'static str {
        match self {
            Action::Down => "DOWN",
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Left => "LEFT",
            Action::Pickup => "PICKUP",
            Action::Dropoff => "DROPOFF",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
