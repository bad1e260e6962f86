/// Event types for the notification graph
///
/// Events represent things that have happened (past tense) and are broadcast
/// to every registered subscriber of their family. Each family has its own
/// subscriber list per producer.
use std::sync::Arc;

use crate::models::channel::ChannelId;

/// Channel lifecycle events, emitted by the channel model
#[derive(Debug, Clone)]
pub struct ChannelEvent {
    pub channel_id: ChannelId,
    pub kind: ChannelEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEventKind {
    /// Channel added to the model
    Added,

    /// Channel configuration changed
    Updated,

    /// Channel removed from the model
    Deleted,

    /// User requested selection of this channel
    SelectionRequested,
}

impl ChannelEvent {
    pub fn new(channel_id: ChannelId, kind: ChannelEventKind) -> Self {
        Self { channel_id, kind }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        let what = match self.kind {
            ChannelEventKind::Added => "added",
            ChannelEventKind::Updated => "updated",
            ChannelEventKind::Deleted => "deleted",
            ChannelEventKind::SelectionRequested => "selection requested",
        };

        format!("channel {} {}", self.channel_id, what)
    }
}

/// Tuner events, emitted by the tuner model
#[derive(Debug, Clone)]
pub struct TunerEvent {
    pub tuner: String,
    pub kind: TunerEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunerEventKind {
    /// Tuner discovered and added to the model
    Added,

    /// Tuner removed from the model
    Removed,

    /// This tuner should own the main spectral display
    MainDisplayRequested,
}

impl TunerEvent {
    pub fn new(tuner: impl Into<String>, kind: TunerEventKind) -> Self {
        Self {
            tuner: tuner.into(),
            kind,
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        let what = match self.kind {
            TunerEventKind::Added => "added",
            TunerEventKind::Removed => "removed",
            TunerEventKind::MainDisplayRequested => "requested for main display",
        };

        format!("tuner {} {}", self.tuner, what)
    }
}

/// A block of decoded audio for one channel.
///
/// Samples are shared, not copied, so fan-out to multiple subscribers is
/// cheap and every subscriber sees the identical packet.
#[derive(Debug, Clone)]
pub struct AudioPacket {
    pub channel_id: ChannelId,
    pub sequence: u64,
    pub samples: Arc<Vec<f32>>,
}

/// A decoded protocol message for one channel
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    pub channel_id: ChannelId,
    pub protocol: String,
    pub text: String,

    /// Radio identifier of the sender, when the protocol carries one.
    /// Used for alias lookup.
    pub from: Option<String>,

    /// Decoded position report (latitude, longitude), when present
    pub location: Option<(f64, f64)>,
}

impl DecodedMessage {
    pub fn new(channel_id: ChannelId, protocol: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel_id,
            protocol: protocol.into(),
            text: text.into(),
            from: None,
            location: None,
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }
}
