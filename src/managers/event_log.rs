/// Decode event logging
///
/// Appends one line per decoded message to a per-channel log file under
/// `<home>/event_logs`. Without a home directory the manager still counts
/// events so callers never need to care whether persistence is available.
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::messaging::DecodedMessage;

const EVENT_LOG_DIR: &str = "event_logs";

pub struct EventLogManager {
    directory: Option<PathBuf>,
    logged: AtomicU64,
}

impl EventLogManager {
    /// Create the manager, preparing `<home>/event_logs` when a home
    /// directory is available. Directory creation failure is recoverable:
    /// the manager degrades to counting only.
    pub fn new(home: Option<PathBuf>) -> Self {
        let directory = home.map(|h| h.join(EVENT_LOG_DIR)).and_then(|dir| {
            match fs::create_dir_all(&dir) {
                Ok(()) => Some(dir),
                Err(e) => {
                    tracing::error!(
                        "Could not create event log directory {}: {}",
                        dir.display(),
                        e
                    );
                    None
                }
            }
        });

        Self {
            directory,
            logged: AtomicU64::new(0),
        }
    }

    /// Append a decoded message to its channel's log file
    pub fn log_decode(&self, message: &DecodedMessage) {
        self.logged.fetch_add(1, Ordering::SeqCst);

        let Some(directory) = &self.directory else {
            tracing::trace!("No event log directory, dropping: {}", message.text);
            return;
        };

        let path = directory.join(format!("channel_{}.log", message.channel_id));
        let line = match &message.from {
            Some(from) => format!("{} {} {}\n", message.protocol, from, message.text),
            None => format!("{} {}\n", message.protocol, message.text),
        };

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::error!("Could not append to event log {}: {}", path.display(), e);
        }
    }

    /// Events logged (or counted, in memory-only mode) so far
    pub fn events_logged(&self) -> u64 {
        self.logged.load(Ordering::SeqCst)
    }

    /// Whether events are being written to disk
    pub fn is_persistent(&self) -> bool {
        self.directory.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::channel::ChannelId;

    #[test]
    fn test_logs_are_written_per_channel() {
        let home = tempfile::tempdir().unwrap();
        let manager = EventLogManager::new(Some(home.path().to_path_buf()));

        manager.log_decode(
            &DecodedMessage::new(ChannelId(5), "P25", "GROUP CALL 100").with_from("1234567"),
        );
        manager.log_decode(&DecodedMessage::new(ChannelId(5), "P25", "CALL END"));

        let contents =
            fs::read_to_string(home.path().join(EVENT_LOG_DIR).join("channel_5.log")).unwrap();
        assert_eq!(contents, "P25 1234567 GROUP CALL 100\nP25 CALL END\n");
        assert_eq!(manager.events_logged(), 2);
    }

    #[test]
    fn test_counts_without_home_directory() {
        let manager = EventLogManager::new(None);

        manager.log_decode(&DecodedMessage::new(ChannelId(1), "DMR", "idle"));

        assert!(!manager.is_persistent());
        assert_eq!(manager.events_logged(), 1);
    }
}
