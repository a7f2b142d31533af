//! Authoritative server for a multiplayer red light / green light game.
//!
//! Players and the admin console talk to the server over one WebSocket each.
//! All game mutation goes through a single [`server::GameServer`] guarded by
//! [`state::AppState`].

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod websocket;
