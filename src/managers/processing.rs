/// Channel processing manager
///
/// Consumes channel-lifecycle events to start and stop channel processing,
/// and is the producer of the two decode-side event families: audio packets
/// and decoded messages. The decode pipeline itself lives outside this
/// subsystem and enters through `receive_audio` / `receive_message`.
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::managers::event_log::EventLogManager;
use crate::managers::recorder::RecorderManager;
use crate::managers::source::SourceManager;
use crate::messaging::{
    AudioPacket, Broadcaster, ChannelEvent, ChannelEventKind, DecodedMessage, Listener,
};
use crate::models::alias::AliasModel;
use crate::models::channel::{ChannelId, ChannelModel};
use crate::models::channel_map::ChannelMapModel;

pub struct ChannelProcessingManager {
    channel_model: Arc<ChannelModel>,
    channel_map_model: Arc<ChannelMapModel>,
    alias_model: Arc<AliasModel>,
    event_log: Arc<EventLogManager>,
    recorder: Arc<RecorderManager>,
    source: Arc<SourceManager>,

    processing: Mutex<HashSet<ChannelId>>,
    audio_sequence: AtomicU64,
    audio: Broadcaster<AudioPacket>,
    messages: Broadcaster<DecodedMessage>,
}

impl ChannelProcessingManager {
    pub fn new(
        channel_model: Arc<ChannelModel>,
        channel_map_model: Arc<ChannelMapModel>,
        alias_model: Arc<AliasModel>,
        event_log: Arc<EventLogManager>,
        recorder: Arc<RecorderManager>,
        source: Arc<SourceManager>,
    ) -> Self {
        Self {
            channel_model,
            channel_map_model,
            alias_model,
            event_log,
            recorder,
            source,
            processing: Mutex::new(HashSet::new()),
            audio_sequence: AtomicU64::new(0),
            audio: Broadcaster::new("audio-packet"),
            messages: Broadcaster::new("decoded-message"),
        }
    }

    /// Register an audio-packet subscriber
    pub fn add_audio_listener(&self, name: &str, listener: Arc<dyn Listener<AudioPacket>>) {
        self.audio.add_listener(name, listener);
    }

    /// Register a decoded-message subscriber
    pub fn add_message_listener(&self, name: &str, listener: Arc<dyn Listener<DecodedMessage>>) {
        self.messages.add_listener(name, listener);
    }

    /// Audio-packet subscriber names in registration order
    pub fn audio_listener_names(&self) -> Vec<String> {
        self.audio.listener_names()
    }

    /// Decoded-message subscriber names in registration order
    pub fn message_listener_names(&self) -> Vec<String> {
        self.messages.listener_names()
    }

    /// Entry point for the decode pipeline: decoded audio for a channel.
    ///
    /// Packets for channels that are not processing are dropped. Delivery to
    /// the audio subscribers is synchronous and in registration order; the
    /// recorder queues internally, so it never delays the listeners after it.
    pub fn receive_audio(&self, channel_id: ChannelId, samples: Arc<Vec<f32>>) -> bool {
        if !self.is_processing(channel_id) {
            tracing::trace!("Dropping audio for idle channel {}", channel_id);
            return false;
        }

        let packet = AudioPacket {
            channel_id,
            sequence: self.audio_sequence.fetch_add(1, Ordering::SeqCst),
            samples,
        };

        self.audio.broadcast(&packet);
        true
    }

    /// Entry point for the decode pipeline: a decoded protocol message.
    ///
    /// The message is logged to the channel's event log, then delivered to
    /// the message subscribers in registration order.
    pub fn receive_message(&self, message: DecodedMessage) -> bool {
        if !self.is_processing(message.channel_id) {
            tracing::trace!("Dropping message for idle channel {}", message.channel_id);
            return false;
        }

        self.event_log.log_decode(&message);
        self.messages.broadcast(&message);
        true
    }

    /// Whether a channel is currently processing
    pub fn is_processing(&self, channel_id: ChannelId) -> bool {
        self.processing.lock().contains(&channel_id)
    }

    /// Number of channels currently processing
    pub fn processing_count(&self) -> usize {
        self.processing.lock().len()
    }

    /// Frequency for a protocol channel number, via the channel map model
    pub fn mapped_frequency(&self, map_name: &str, number: u16) -> Option<u64> {
        self.channel_map_model.frequency(map_name, number)
    }

    /// Display name for a radio identifier, via the alias model
    pub fn alias_name(&self, identifier: &str) -> Option<String> {
        self.alias_model.lookup(identifier).map(|a| a.name)
    }

    /// Audio packets accepted by the recorder but not yet written
    pub fn recorder_backlog(&self) -> u64 {
        self.recorder
            .packets_received()
            .saturating_sub(self.recorder.packets_written())
    }

    fn start_processing(&self, channel_id: ChannelId) {
        if !self.source.source_available() {
            tracing::warn!(
                "No tuner available, channel {} will not be processed",
                channel_id
            );
            return;
        }

        if self.processing.lock().insert(channel_id) {
            tracing::info!("Channel {} processing started", channel_id);
        }
    }

    fn stop_processing(&self, channel_id: ChannelId) {
        if self.processing.lock().remove(&channel_id) {
            tracing::info!("Channel {} processing stopped", channel_id);
        }
    }
}

impl Listener<ChannelEvent> for ChannelProcessingManager {
    fn receive(&self, event: &ChannelEvent) -> anyhow::Result<()> {
        match event.kind {
            ChannelEventKind::Added | ChannelEventKind::Updated => {
                match self.channel_model.channel(event.channel_id) {
                    Some(channel) if channel.enabled => self.start_processing(channel.id),
                    Some(channel) => self.stop_processing(channel.id),
                    None => {}
                }
            }
            ChannelEventKind::Deleted => self.stop_processing(event.channel_id),
            ChannelEventKind::SelectionRequested => {}
        }

        Ok(())
    }
}
