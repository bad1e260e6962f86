/// Audio playback manager
///
/// Audio-packet subscriber that routes decoded audio to the configured
/// output mixer. Mixing internals live outside this subsystem; here each
/// packet is accounted to its channel so the presentation layer can show
/// per-channel activity.
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::managers::source::MixerHandle;
use crate::messaging::{AudioPacket, Listener};
use crate::models::channel::ChannelId;

pub struct AudioManager {
    mixer: MixerHandle,
    played: Mutex<HashMap<ChannelId, u64>>,
}

impl AudioManager {
    pub fn new(mixer: MixerHandle) -> Self {
        Self {
            mixer,
            played: Mutex::new(HashMap::new()),
        }
    }

    /// The output mixer this manager plays through
    pub fn mixer(&self) -> &MixerHandle {
        &self.mixer
    }

    /// Packets played for one channel
    pub fn packets_played(&self, channel_id: ChannelId) -> u64 {
        self.played.lock().get(&channel_id).copied().unwrap_or(0)
    }

    /// Channels with any playback activity
    pub fn active_channels(&self) -> usize {
        self.played.lock().len()
    }
}

impl Listener<AudioPacket> for AudioManager {
    fn receive(&self, packet: &AudioPacket) -> anyhow::Result<()> {
        tracing::trace!(
            "playing packet {} for channel {} on mixer {}",
            packet.sequence,
            packet.channel_id,
            self.mixer.name
        );

        *self.played.lock().entry(packet.channel_id).or_insert(0) += 1;
        Ok(())
    }
}
