//! Light transitions and round reset.
//!
//! ```text
//! WAITING ──set_light──▶ GREEN ◀──set_light──▶ RED
//!                          │                    │
//!                          └──3rd winner──▶ ENDED
//! any phase ──reset──▶ WAITING
//! ```

use chrono::{DateTime, Utc};

use crate::game::{Game, Outbox};
use crate::models::{Light, Phase, ServerMessage};

impl Game {
    /// Switch the light. Ignored once the round has ended.
    ///
    /// Returns whether the light actually changed.
    pub fn set_light(&mut self, light: Light, now: DateTime<Utc>, out: &mut Outbox) -> bool {
        if self.state.is_ended() {
            log::debug!("Ignoring light change to {:?}: round has ended", light);
            return false;
        }

        self.state.phase = Phase::from(light);
        self.state.last_light_change = Some(now);
        log::info!("Light changed to {:?}", light);

        out.broadcast(ServerMessage::LightChange(light));
        true
    }

    /// Start a new round from any phase, keeping every joined player.
    pub fn reset(&mut self, out: &mut Outbox) {
        self.state.phase = Phase::Waiting;
        self.state.winners.clear();
        for player in self.registry.iter_mut() {
            player.restart();
        }
        log::info!("Round reset with {} players", self.registry.len());

        out.broadcast(ServerMessage::GameReset);
        out.broadcast(self.snapshot());
    }
}
