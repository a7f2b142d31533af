use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::player::Player;

/// Number of winners after which the round ends.
pub const WINNER_SLOTS: usize = 3;

/// Colour an admin may switch the light to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Light {
    Green,
    Red,
}

/// Macro state of the round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    #[default]
    Waiting,
    Green,
    Red,
    Ended,
}

impl From<Light> for Phase {
    fn from(light: Light) -> Self {
        match light {
            Light::Green => Phase::Green,
            Light::Red => Phase::Red,
        }
    }
}

/// Round-wide state. Owned by `Game`; only mutated through its operations.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub phase: Phase,
    pub last_light_change: Option<DateTime<Utc>>,
    /// Finish order, at most `WINNER_SLOTS` entries.
    pub winners: Vec<Player>,
}

impl GameState {
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }
}
