/// Channel selection manager
///
/// Channel-lifecycle subscriber that keeps the single-selection invariant:
/// at most one channel is selected at a time, and a deleted channel cannot
/// stay selected. Registered after the processing manager, so it always
/// observes lifecycle events second.
use std::sync::Arc;

use parking_lot::Mutex;

use crate::messaging::{ChannelEvent, ChannelEventKind, Listener};
use crate::models::channel::{ChannelId, ChannelModel};

pub struct ChannelSelectionManager {
    channel_model: Arc<ChannelModel>,
    selected: Mutex<Option<ChannelId>>,
}

impl ChannelSelectionManager {
    pub fn new(channel_model: Arc<ChannelModel>) -> Self {
        Self {
            channel_model,
            selected: Mutex::new(None),
        }
    }

    /// The currently selected channel, if any
    pub fn selected(&self) -> Option<ChannelId> {
        *self.selected.lock()
    }
}

impl Listener<ChannelEvent> for ChannelSelectionManager {
    fn receive(&self, event: &ChannelEvent) -> anyhow::Result<()> {
        match event.kind {
            ChannelEventKind::SelectionRequested => {
                // Selecting one channel implicitly deselects the previous one.
                if self.channel_model.channel(event.channel_id).is_some() {
                    *self.selected.lock() = Some(event.channel_id);
                }
            }
            ChannelEventKind::Deleted => {
                let mut selected = self.selected.lock();
                if *selected == Some(event.channel_id) {
                    *selected = None;
                }
            }
            ChannelEventKind::Added | ChannelEventKind::Updated => {}
        }

        Ok(())
    }
}
