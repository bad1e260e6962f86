/// Broadcast status view state
///
/// Two-state machine for the optional streaming-status panel, mirrored to
/// the properties store so the choice survives restarts. The presentation
/// collaborator is a callback invoked synchronously on the toggling thread.
use std::sync::Arc;

use parking_lot::Mutex;

use crate::properties::ConfigStore;

/// Properties key persisting the panel visibility
pub const BROADCAST_STATUS_VISIBLE_KEY: &str = "main.broadcast.status.visible";

/// Visibility of the streaming-status panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    /// The opposite state
    pub fn toggled(&self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }

    fn from_flag(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Hidden
    }
}

/// Callback notified with the new state after each toggle
pub type VisibilityCallback = Box<dyn Fn(Visibility) + Send + Sync>;

pub struct BroadcastStatusView {
    config: Arc<ConfigStore>,
    state: Mutex<Visibility>,
    on_change: VisibilityCallback,
}

impl BroadcastStatusView {
    /// Create the view with its initial state read from the properties
    /// store (hidden by default).
    pub fn new(config: Arc<ConfigStore>, on_change: VisibilityCallback) -> Self {
        let initial = Visibility::from_flag(config.get(BROADCAST_STATUS_VISIBLE_KEY, false));

        Self {
            config,
            state: Mutex::new(initial),
            on_change,
        }
    }

    /// Current state
    pub fn visibility(&self) -> Visibility {
        *self.state.lock()
    }

    /// Flip the state, notify the presentation collaborator with the new
    /// state, and persist it.
    ///
    /// The callback runs synchronously on the calling thread, under the
    /// state lock so concurrent toggles observe notifications in state
    /// order; it must not call back into this view.
    pub fn toggle(&self) -> Visibility {
        let mut state = self.state.lock();
        let next = state.toggled();
        *state = next;

        (self.on_change)(next);
        self.config.set(BROADCAST_STATUS_VISIBLE_KEY, next.is_visible());

        next
    }
}
