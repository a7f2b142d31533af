use crate::models::{ConnectionId, ServerMessage};

/// Who a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    All,
    Only(ConnectionId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub audience: Audience,
    pub message: ServerMessage,
}

/// Notifications produced by one mutation, in emission order.
#[derive(Debug, Default)]
pub struct Outbox {
    notifications: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast(&mut self, message: ServerMessage) {
        self.notifications.push(Notification {
            audience: Audience::All,
            message,
        });
    }

    pub fn send_to(&mut self, id: &ConnectionId, message: ServerMessage) {
        self.notifications.push(Notification {
            audience: Audience::Only(id.clone()),
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.notifications
    }
}

impl IntoIterator for Outbox {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.notifications.into_iter()
    }
}
