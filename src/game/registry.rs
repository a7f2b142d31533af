use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::models::{ConnectionId, Player};

/// Joined players keyed by their connection. Names need not be unique.
#[derive(Debug, Default)]
pub struct Registry {
    players: HashMap<ConnectionId, Player>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh record, replacing whatever this connection had before.
    pub fn join(&mut self, id: ConnectionId, name: impl Into<String>) -> &Player {
        let player = Player::new(id.clone(), name);
        match self.players.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(player);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(player),
        }
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Player> {
        self.players.remove(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Copy of every record, ordered by connection id.
    pub fn snapshot(&self) -> BTreeMap<ConnectionId, Player> {
        self.players
            .iter()
            .map(|(id, player)| (id.clone(), player.clone()))
            .collect()
    }
}
