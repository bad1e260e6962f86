/// Channel model
///
/// Store of decodable channel definitions. Every mutation is announced to
/// the channel-lifecycle subscribers after the store lock is released, so
/// subscribers may read the model from inside their callbacks.
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::messaging::{Broadcaster, ChannelEvent, ChannelEventKind, Listener};

/// Identifier assigned to a channel when it is added to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub usize);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A channel definition
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,

    /// Center frequency in hertz
    pub frequency: u64,

    /// Enabled channels are started by the processing manager as soon as a
    /// source is available
    pub enabled: bool,
}

struct Store {
    channels: Vec<Channel>,
    next_id: usize,
}

/// Mutable store of channels; producer of channel-lifecycle events
pub struct ChannelModel {
    store: Mutex<Store>,
    broadcaster: Broadcaster<ChannelEvent>,
}

impl ChannelModel {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                channels: Vec::new(),
                next_id: 0,
            }),
            broadcaster: Broadcaster::new("channel"),
        }
    }

    /// Register a channel-lifecycle subscriber
    pub fn add_listener(&self, name: &str, listener: Arc<dyn Listener<ChannelEvent>>) {
        self.broadcaster.add_listener(name, listener);
    }

    /// Subscriber names in registration order
    pub fn listener_names(&self) -> Vec<String> {
        self.broadcaster.listener_names()
    }

    /// Add a channel and announce it
    pub fn add(&self, name: impl Into<String>, frequency: u64, enabled: bool) -> ChannelId {
        let id = {
            let mut store = self.store.lock();
            let id = ChannelId(store.next_id);
            store.next_id += 1;
            store.channels.push(Channel {
                id,
                name: name.into(),
                frequency,
                enabled,
            });
            id
        };

        self.broadcaster
            .broadcast(&ChannelEvent::new(id, ChannelEventKind::Added));
        id
    }

    /// Update a channel's enabled flag and announce the change
    pub fn set_enabled(&self, id: ChannelId, enabled: bool) {
        let updated = {
            let mut store = self.store.lock();
            match store.channels.iter_mut().find(|c| c.id == id) {
                Some(channel) => {
                    channel.enabled = enabled;
                    true
                }
                None => false,
            }
        };

        if updated {
            self.broadcaster
                .broadcast(&ChannelEvent::new(id, ChannelEventKind::Updated));
        }
    }

    /// Remove a channel and announce the removal
    pub fn delete(&self, id: ChannelId) {
        let removed = {
            let mut store = self.store.lock();
            let before = store.channels.len();
            store.channels.retain(|c| c.id != id);
            store.channels.len() != before
        };

        if removed {
            self.broadcaster
                .broadcast(&ChannelEvent::new(id, ChannelEventKind::Deleted));
        }
    }

    /// Announce a user selection request for a channel
    pub fn request_selection(&self, id: ChannelId) {
        if self.channel(id).is_some() {
            self.broadcaster
                .broadcast(&ChannelEvent::new(id, ChannelEventKind::SelectionRequested));
        }
    }

    /// Look up a channel by id
    pub fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.store
            .lock()
            .channels
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Snapshot of all channels
    pub fn channels(&self) -> Vec<Channel> {
        self.store.lock().channels.clone()
    }

    /// Number of channels in the model
    pub fn len(&self) -> usize {
        self.store.lock().channels.len()
    }

    /// True when the model holds no channels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChannelModel {
    fn default() -> Self {
        Self::new()
    }
}
