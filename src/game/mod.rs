//! Authoritative red light / green light round.
//!
//! `Game` owns the player registry and the round state. Every operation takes
//! the current time explicitly and appends what must be told to whom into an
//! [`Outbox`]; delivering those notifications is the caller's job.

pub mod clock;
pub mod machine;
pub mod moves;
pub mod outbox;
pub mod registry;

use chrono::{Duration, FixedOffset, Offset, Utc};

use crate::error::ConfigError;
use crate::models::{ConnectionId, GameState, Player, ServerMessage};

pub use clock::{format_finish_time, Clock, ManualClock, SystemClock};
pub use moves::MoveOutcome;
pub use outbox::{Audience, Notification, Outbox};
pub use registry::Registry;

pub const DEFAULT_GOAL: u32 = 60;
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 400;
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Tunables of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Progress needed to finish.
    pub goal: u32,
    /// How long after a light change a red-light move is still forgiven.
    pub grace_period: Duration,
    /// Offset used when stamping `finish_time`.
    pub finish_offset: FixedOffset,
}

impl Rules {
    pub fn new(goal: u32, grace_period_ms: u64, utc_offset_hours: i32) -> Result<Self, ConfigError> {
        let finish_offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset(utc_offset_hours))?;
        let grace_period_ms = i64::try_from(grace_period_ms)
            .map_err(|_| ConfigError::InvalidGracePeriod(grace_period_ms))?;
        Ok(Self {
            goal: goal.max(1),
            grace_period: Duration::milliseconds(grace_period_ms),
            finish_offset,
        })
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            grace_period: Duration::milliseconds(DEFAULT_GRACE_PERIOD_MS as i64),
            finish_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Game {
    rules: Rules,
    state: GameState,
    registry: Registry,
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            state: GameState::default(),
            registry: Registry::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn player(&self, id: &ConnectionId) -> Option<&Player> {
        self.registry.get(id)
    }

    /// Register (or re-register) a connection as a player.
    pub fn join(&mut self, id: &ConnectionId, name: &str, out: &mut Outbox) {
        self.registry.join(id.clone(), name);
        log::info!("Player {} joined as {:?}", id, name);
        out.send_to(
            id,
            ServerMessage::InitGame {
                state: self.state.phase,
            },
        );
        out.broadcast(self.snapshot());
    }

    /// Forget a connection. Absent ids are fine.
    pub fn leave(&mut self, id: &ConnectionId, out: &mut Outbox) {
        if let Some(player) = self.registry.remove(id) {
            log::info!("Player {} ({}) left", id, player.name);
        }
        out.broadcast(self.snapshot());
    }

    /// Full view of players and winners for the admin board.
    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::UpdateAdmin {
            players: self.registry.snapshot(),
            winners: self.state.winners.clone(),
        }
    }
}
