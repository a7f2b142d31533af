use actix::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ProtocolError;
use crate::models::game_state::{Light, Phase};
use crate::models::player::{ConnectionId, Player};

/// Frame sent from a player or the admin console to the server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinGame(String),
    AdminChangeLight(Light),
    AdminReset,
    PlayerMove,
}

impl ClientMessage {
    /// Validate a text frame. Anything that does not parse never reaches the game.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Frame sent from the server to one or all connections
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    Connected {
        id: ConnectionId,
    },
    InitGame {
        state: Phase,
    },
    UpdateAdmin {
        players: BTreeMap<ConnectionId, Player>,
        winners: Vec<Player>,
    },
    LightChange(Light),
    ProgressUpdate(f64),
    YouDied,
    PlayerFinished(Player),
    GameOver(Vec<Player>),
    GameReset,
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::InitGame { .. } => "init-game",
            Self::UpdateAdmin { .. } => "update-admin",
            Self::LightChange(_) => "light-change",
            Self::ProgressUpdate(_) => "progress-update",
            Self::YouDied => "you-died",
            Self::PlayerFinished(_) => "player-finished",
            Self::GameOver(_) => "game-over",
            Self::GameReset => "game-reset",
            Self::Error { .. } => "error",
        }
    }
}

/// Serialized frame handed to a socket actor for delivery
#[derive(Message)]
#[rtype(result = "()")]
pub struct SocketText(pub String);
