/// Audio recording manager
///
/// Audio-packet subscriber that must never slow the other subscribers down:
/// `receive` only enqueues the packet onto an unbounded channel consumed by
/// a background writer thread. After `shutdown` the subscriber reports an
/// error on each delivery, which the broadcaster isolates and logs.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;

use crate::messaging::{AudioPacket, Listener};

pub struct RecorderManager {
    tx: Mutex<Option<Sender<AudioPacket>>>,
    received: AtomicU64,
    written: Arc<AtomicU64>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl RecorderManager {
    /// Create the manager and start the background writer thread
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<AudioPacket>();
        let written = Arc::new(AtomicU64::new(0));

        let writer_count = Arc::clone(&written);
        let writer = thread::spawn(move || {
            tracing::debug!("Recorder writer thread started");

            while let Ok(packet) = rx.recv() {
                // Recording format internals live outside this subsystem;
                // here the packet is only accounted to the writer.
                tracing::trace!(
                    "recorded packet {} for channel {} ({} samples)",
                    packet.sequence,
                    packet.channel_id,
                    packet.samples.len()
                );
                writer_count.fetch_add(1, Ordering::SeqCst);
            }

            tracing::debug!("Recorder writer thread stopped");
        });

        Self {
            tx: Mutex::new(Some(tx)),
            received: AtomicU64::new(0),
            written,
            writer: Mutex::new(Some(writer)),
        }
    }

    /// Stop the writer thread, draining anything already queued
    pub fn shutdown(&self) {
        // Dropping the sender disconnects the channel; recv drains the
        // queue before reporting disconnection.
        self.tx.lock().take();

        if let Some(writer) = self.writer.lock().take() {
            if writer.join().is_err() {
                tracing::error!("Recorder writer thread panicked");
            }
        }
    }

    /// Packets accepted by the subscriber
    pub fn packets_received(&self) -> u64 {
        self.received.load(Ordering::SeqCst)
    }

    /// Packets processed by the writer thread
    pub fn packets_written(&self) -> u64 {
        self.written.load(Ordering::SeqCst)
    }

    /// Whether the writer thread is still accepting packets
    pub fn is_running(&self) -> bool {
        self.tx.lock().is_some()
    }
}

impl Default for RecorderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecorderManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Listener<AudioPacket> for RecorderManager {
    fn receive(&self, packet: &AudioPacket) -> anyhow::Result<()> {
        let tx = self.tx.lock();

        match tx.as_ref() {
            Some(tx) => {
                self.received.fetch_add(1, Ordering::SeqCst);
                tx.send(packet.clone())
                    .map_err(|_| anyhow::anyhow!("recorder writer thread is gone"))
            }
            None => Err(anyhow::anyhow!("recorder is shut down")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::channel::ChannelId;

    fn packet(sequence: u64) -> AudioPacket {
        AudioPacket {
            channel_id: ChannelId(1),
            sequence,
            samples: Arc::new(vec![0.0; 160]),
        }
    }

    #[test]
    fn test_packets_flow_through_writer() {
        let manager = RecorderManager::new();

        manager.receive(&packet(0)).unwrap();
        manager.receive(&packet(1)).unwrap();
        assert_eq!(manager.packets_received(), 2);

        // shutdown joins the writer after it drains the queue
        manager.shutdown();
        assert_eq!(manager.packets_written(), 2);
    }

    #[test]
    fn test_receive_fails_after_shutdown() {
        let manager = RecorderManager::new();
        manager.shutdown();

        assert!(!manager.is_running());
        assert!(manager.receive(&packet(0)).is_err());
        assert_eq!(manager.packets_received(), 0);
    }
}
