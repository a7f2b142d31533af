//! Session boundary: turns connection events into game operations and
//! publishes whatever they produce.
//!
//! Every method here runs one mutation to completion, including its fanout,
//! so callers only need to serialize access to the `GameServer` itself.

pub mod fanout;

use log::{info, warn};

use crate::error::ProtocolError;
use crate::game::{Clock, Game, MoveOutcome, Outbox, Rules};
use crate::models::{ClientMessage, ConnectionId, Light, ServerMessage};

pub use fanout::{Fanout, Sink};

pub struct GameServer<S> {
    game: Game,
    fanout: Fanout<S>,
    clock: Box<dyn Clock>,
}

impl<S: Sink> GameServer<S> {
    pub fn new(rules: Rules, clock: impl Clock + 'static) -> Self {
        Self {
            game: Game::new(rules),
            fanout: Fanout::new(),
            clock: Box::new(clock),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn connection_count(&self) -> usize {
        self.fanout.len()
    }

    /// Start delivering notifications to a new connection.
    pub fn connect(&mut self, id: ConnectionId, sink: S) {
        self.fanout.register(id.clone(), sink);
        info!("Connection {} opened, {} active", id, self.fanout.len());

        let mut out = Outbox::new();
        out.send_to(&id, ServerMessage::Connected { id: id.clone() });
        self.fanout.publish_all(out);
    }

    /// Drop a connection and its player record. Safe to call twice.
    pub fn disconnect(&mut self, id: &ConnectionId) {
        self.fanout.unregister(id);
        info!("Connection {} closed, {} active", id, self.fanout.len());

        let mut out = Outbox::new();
        self.game.leave(id, &mut out);
        self.fanout.publish_all(out);
    }

    /// Route one validated inbound frame from `id`.
    pub fn handle(&mut self, id: &ConnectionId, msg: ClientMessage) {
        match msg {
            ClientMessage::JoinGame(name) => self.join(id, &name),
            ClientMessage::AdminChangeLight(light) => {
                self.change_light(light);
            }
            ClientMessage::AdminReset => self.reset(),
            ClientMessage::PlayerMove => {
                self.player_move(id);
            }
        }
    }

    /// Tell a connection its frame was refused. The game is not touched.
    pub fn reject(&self, id: &ConnectionId, err: &ProtocolError) {
        warn!("Rejected frame from {}: {}", id, err);
        let mut out = Outbox::new();
        out.send_to(
            id,
            ServerMessage::Error {
                message: err.to_string(),
            },
        );
        self.fanout.publish_all(out);
    }

    pub fn join(&mut self, id: &ConnectionId, name: &str) {
        let mut out = Outbox::new();
        self.game.join(id, name, &mut out);
        self.fanout.publish_all(out);
    }

    pub fn change_light(&mut self, light: Light) -> bool {
        let now = self.clock.now();
        let mut out = Outbox::new();
        let changed = self.game.set_light(light, now, &mut out);
        self.fanout.publish_all(out);
        changed
    }

    pub fn reset(&mut self) {
        let mut out = Outbox::new();
        self.game.reset(&mut out);
        self.fanout.publish_all(out);
    }

    pub fn player_move(&mut self, id: &ConnectionId) -> MoveOutcome {
        let now = self.clock.now();
        let mut out = Outbox::new();
        let outcome = self.game.apply_move(id, now, &mut out);
        self.fanout.publish_all(out);
        outcome
    }
}
