use std::collections::HashMap;

use log::{debug, warn};

use crate::game::{Audience, Notification};
use crate::models::ConnectionId;

/// Somewhere a serialized frame can be pushed without waiting.
pub trait Sink {
    fn deliver(&self, frame: &str);
}

/// Registered connections and the fire-and-forget publish over them.
///
/// There is no acknowledgement and no retry: a frame for a connection that is
/// not registered, or whose sink has gone away, is dropped.
pub struct Fanout<S> {
    sinks: HashMap<ConnectionId, S>,
}

impl<S> Default for Fanout<S> {
    fn default() -> Self {
        Self {
            sinks: HashMap::new(),
        }
    }
}

impl<S: Sink> Fanout<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId, sink: S) {
        self.sinks.insert(id, sink);
    }

    pub fn unregister(&mut self, id: &ConnectionId) -> Option<S> {
        self.sinks.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn publish(&self, notification: &Notification) {
        // Serialize the message once
        let frame = match serde_json::to_string(&notification.message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(
                    "Failed to serialize {} notification: {}",
                    notification.message.event_name(),
                    e
                );
                return;
            }
        };

        match &notification.audience {
            Audience::All => {
                debug!(
                    "Broadcasting {} to {} connections",
                    notification.message.event_name(),
                    self.sinks.len()
                );
                for sink in self.sinks.values() {
                    sink.deliver(&frame);
                }
            }
            Audience::Only(id) => match self.sinks.get(id) {
                Some(sink) => sink.deliver(&frame),
                None => debug!(
                    "Dropping {} for unregistered connection {}",
                    notification.message.event_name(),
                    id
                ),
            },
        }
    }

    pub fn publish_all(&self, notifications: impl IntoIterator<Item = Notification>) {
        for notification in notifications {
            self.publish(&notification);
        }
    }
}
