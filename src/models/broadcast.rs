/// Broadcast (streaming) model
///
/// Store of configured audio streams plus the per-channel streaming state.
/// Subscribes to the audio-packet family so every packet leaving the
/// processing manager is accounted to its channel's stream.
use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::messaging::{AudioPacket, Listener};
use crate::models::channel::ChannelId;

/// A configured outbound audio stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    pub name: String,
    pub enabled: bool,
}

/// Streaming state store; audio-packet subscriber
pub struct BroadcastModel {
    streams: Mutex<Vec<StreamConfig>>,
    streamed: Mutex<HashMap<ChannelId, u64>>,
}

impl BroadcastModel {
    pub fn new() -> Self {
        Self {
            streams: Mutex::new(Vec::new()),
            streamed: Mutex::new(HashMap::new()),
        }
    }

    /// Add a configured stream
    pub fn add_stream(&self, config: StreamConfig) {
        self.streams.lock().push(config);
    }

    /// Snapshot of configured streams
    pub fn streams(&self) -> Vec<StreamConfig> {
        self.streams.lock().clone()
    }

    /// Number of configured streams
    pub fn stream_count(&self) -> usize {
        self.streams.lock().len()
    }

    /// Packets accounted to one channel's stream
    pub fn streamed_packets(&self, channel_id: ChannelId) -> u64 {
        self.streamed.lock().get(&channel_id).copied().unwrap_or(0)
    }

    /// Packets accounted across all channels
    pub fn total_streamed_packets(&self) -> u64 {
        self.streamed.lock().values().sum()
    }
}

impl Default for BroadcastModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener<AudioPacket> for BroadcastModel {
    fn receive(&self, packet: &AudioPacket) -> anyhow::Result<()> {
        *self.streamed.lock().entry(packet.channel_id).or_insert(0) += 1;
        Ok(())
    }
}
