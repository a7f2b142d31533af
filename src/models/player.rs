use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one WebSocket connection, unique for the lifetime of the socket.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-player lifecycle. `Dead` and `Finished` are terminal until a reset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    #[default]
    Alive,
    Dead,
    Finished,
}

impl PlayerStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead | Self::Finished)
    }
}

/// A joined player as seen by every client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: ConnectionId,
    pub name: String,
    pub progress: u32,
    pub status: PlayerStatus,
    /// Set exactly when `status` becomes `Finished`.
    pub finish_time: Option<String>,
}

impl Player {
    pub fn new(id: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            progress: 0,
            status: PlayerStatus::Alive,
            finish_time: None,
        }
    }

    /// Put the player back at the start line.
    pub fn restart(&mut self) {
        self.progress = 0;
        self.status = PlayerStatus::Alive;
        self.finish_time = None;
    }
}
