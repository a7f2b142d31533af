use actix::Addr;
use log::warn;
use std::sync::{Mutex, MutexGuard};

use crate::game::{Clock, Rules};
use crate::models::SocketText;
use crate::server::{GameServer, Sink};
use crate::websocket::PlayerSocket;

/// Application state shared between connections
pub struct AppState<S = Addr<PlayerSocket>> {
    server: Mutex<GameServer<S>>,
}

impl<S: Sink> AppState<S> {
    pub fn new(rules: Rules, clock: impl Clock + 'static) -> Self {
        Self {
            server: Mutex::new(GameServer::new(rules, clock)),
        }
    }

    /// Run one mutation against the game. Holding the lock across the whole
    /// call is what keeps handlers from interleaving.
    pub fn with_server<R>(&self, f: impl FnOnce(&mut GameServer<S>) -> R) -> R {
        let mut server = self.lock();
        f(&mut server)
    }

    fn lock(&self) -> MutexGuard<'_, GameServer<S>> {
        match self.server.lock() {
            Ok(server) => server,
            Err(poisoned) => {
                warn!("Game server lock was poisoned, continuing with last state");
                poisoned.into_inner()
            }
        }
    }
}

impl Sink for Addr<PlayerSocket> {
    fn deliver(&self, frame: &str) {
        self.do_send(SocketText(frame.to_string()));
    }
}
