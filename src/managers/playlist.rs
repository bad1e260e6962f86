/// Playlist manager
///
/// Loads and saves the user's playlist, the JSON snapshot of channels,
/// aliases, channel maps and stream configurations kept under the home
/// directory. Loading runs after the graph is wired, so restored channels
/// flow through the normal channel-lifecycle events.
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AppResult, PlaylistError};
use crate::models::alias::{Alias, AliasModel};
use crate::models::broadcast::{BroadcastModel, StreamConfig};
use crate::models::channel::ChannelModel;
use crate::models::channel_map::{ChannelMap, ChannelMapModel};

const PLAYLIST_FILE_NAME: &str = "playlist.json";

/// Serialized playlist contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct Playlist {
    #[serde(default)]
    channels: Vec<PlaylistChannel>,

    #[serde(default)]
    aliases: Vec<Alias>,

    #[serde(default)]
    channel_maps: Vec<ChannelMap>,

    #[serde(default)]
    streams: Vec<StreamConfig>,
}

/// A channel as persisted; model ids are reassigned on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlaylistChannel {
    name: String,
    frequency: u64,
    enabled: bool,
}

pub struct PlaylistManager {
    alias_model: Arc<AliasModel>,
    broadcast_model: Arc<BroadcastModel>,
    channel_model: Arc<ChannelModel>,
    channel_map_model: Arc<ChannelMapModel>,
    path: Option<PathBuf>,
}

impl PlaylistManager {
    pub fn new(
        alias_model: Arc<AliasModel>,
        broadcast_model: Arc<BroadcastModel>,
        channel_model: Arc<ChannelModel>,
        channel_map_model: Arc<ChannelMapModel>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            alias_model,
            broadcast_model,
            channel_model,
            channel_map_model,
            path: home.map(|h| h.join(PLAYLIST_FILE_NAME)),
        }
    }

    /// Load the playlist into the models.
    ///
    /// Called once, after listener registration, so restored channels are
    /// announced to the wired subscribers. A missing file is a normal first
    /// run; an unreadable or malformed file is logged and skipped.
    pub fn init(&self) {
        let Some(path) = &self.path else {
            tracing::info!("No home directory, starting with an empty playlist");
            return;
        };

        if !path.exists() {
            tracing::info!("No playlist at {}, starting empty", path.display());
            return;
        }

        match read_playlist(path) {
            Ok(playlist) => {
                for alias in playlist.aliases {
                    self.alias_model.add(alias);
                }
                for map in playlist.channel_maps {
                    self.channel_map_model.add(map);
                }
                for stream in playlist.streams {
                    self.broadcast_model.add_stream(stream);
                }
                for channel in playlist.channels {
                    self.channel_model
                        .add(channel.name, channel.frequency, channel.enabled);
                }

                tracing::info!(
                    "Loaded playlist: {} channels, {} aliases, {} maps, {} streams",
                    self.channel_model.len(),
                    self.alias_model.len(),
                    self.channel_map_model.len(),
                    self.broadcast_model.stream_count()
                );
            }
            Err(e) => tracing::error!("{e:#}, starting with an empty playlist"),
        }
    }

    /// Persist a snapshot of the models
    pub fn save(&self) -> AppResult<()> {
        let Some(path) = &self.path else {
            tracing::warn!("No home directory, playlist not saved");
            return Ok(());
        };

        let playlist = Playlist {
            channels: self
                .channel_model
                .channels()
                .into_iter()
                .map(|c| PlaylistChannel {
                    name: c.name,
                    frequency: c.frequency,
                    enabled: c.enabled,
                })
                .collect(),
            aliases: self.alias_model.aliases(),
            channel_maps: self.channel_map_model.maps(),
            streams: self.broadcast_model.streams(),
        };

        let json = serde_json::to_string_pretty(&playlist)?;
        fs::write(path, json).map_err(|e| PlaylistError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::info!("Saved playlist to {}", path.display());
        Ok(())
    }
}

fn read_playlist(path: &std::path::Path) -> Result<Playlist, PlaylistError> {
    let contents = fs::read_to_string(path).map_err(|e| PlaylistError::ReadFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| PlaylistError::Malformed {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alias::AliasAction;

    fn manager(home: Option<PathBuf>) -> PlaylistManager {
        PlaylistManager::new(
            Arc::new(AliasModel::new()),
            Arc::new(BroadcastModel::new()),
            Arc::new(ChannelModel::new()),
            Arc::new(ChannelMapModel::new()),
            home,
        )
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let home = tempfile::tempdir().unwrap();

        let saver = manager(Some(home.path().to_path_buf()));
        saver.channel_model.add("Dispatch", 460_125_000, true);
        saver.alias_model.add(Alias {
            identifier: "100".to_string(),
            name: "Engine 7".to_string(),
            actions: vec![AliasAction::Beep],
        });
        saver.broadcast_model.add_stream(StreamConfig {
            name: "county-feed".to_string(),
            enabled: false,
        });
        saver.save().unwrap();

        let loader = manager(Some(home.path().to_path_buf()));
        loader.init();

        assert_eq!(loader.channel_model.len(), 1);
        assert_eq!(loader.channel_model.channels()[0].frequency, 460_125_000);
        assert_eq!(loader.alias_model.lookup("100").unwrap().name, "Engine 7");
        assert_eq!(loader.broadcast_model.stream_count(), 1);
    }

    #[test]
    fn test_init_without_home_is_a_no_op() {
        let m = manager(None);
        m.init();
        assert!(m.channel_model.is_empty());
    }

    #[test]
    fn test_malformed_playlist_is_skipped() {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(PLAYLIST_FILE_NAME), "{not json").unwrap();

        let m = manager(Some(home.path().to_path_buf()));
        m.init();

        assert!(m.channel_model.is_empty());
        assert!(m.alias_model.is_empty());
    }
}
