/// Flat key=value properties store
///
/// Replaces singleton-style process properties with an explicit store that is
/// constructed once at startup and shared by reference. Every read is total:
/// a missing file, a missing key or an unparseable value all fall back to the
/// caller-supplied default. Writes go to memory first and are flushed to disk
/// on every `set`; a failed flush is logged and the in-memory value stays
/// authoritative for the rest of the process.
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parking_lot::Mutex;

use crate::error::ConfigError;

struct Inner {
    /// None while running in memory-only mode (no usable home directory,
    /// or the file could not be created on first run)
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

/// Process-wide configuration store backed by a flat properties file
pub struct ConfigStore {
    inner: Mutex<Inner>,
}

impl ConfigStore {
    /// Create a store with no backing file. All reads return defaults until
    /// keys are set; sets are never persisted.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner {
                path: None,
                values: BTreeMap::new(),
            }),
        }
    }

    /// Load the properties file at `path`, creating it empty on first run.
    ///
    /// Creation or read failures are recoverable: the store is returned in
    /// memory-only mode and the failure is logged.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("Creating application properties file {}", path.display());

            if let Err(e) = fs::File::create(path) {
                let err = ConfigError::CreateFailed {
                    path: path.display().to_string(),
                    source: e,
                };
                tracing::error!("{err}, continuing with in-memory defaults");
                return Self::in_memory();
            }
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self {
                inner: Mutex::new(Inner {
                    path: Some(path.to_path_buf()),
                    values: parse_properties(&contents),
                }),
            },
            Err(e) => {
                let err = ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    source: e,
                };
                tracing::error!("{err}, continuing with in-memory defaults");
                Self::in_memory()
            }
        }
    }

    /// Get a typed value, falling back to `default` when the key is absent
    /// or its stored text does not parse. Never fails.
    pub fn get<T: FromStr>(&self, key: &str, default: T) -> T {
        let inner = self.inner.lock();

        match inner.values.get(key) {
            Some(raw) => raw.parse().unwrap_or(default),
            None => default,
        }
    }

    /// Set a value and flush the store to disk.
    ///
    /// The in-memory update always succeeds; a persistence failure is logged
    /// and never propagated to the caller. The lock is held across the
    /// read-modify-persist sequence so concurrent setters cannot lose updates.
    pub fn set<T: Display>(&self, key: &str, value: T) {
        let mut inner = self.inner.lock();
        inner.values.insert(key.to_string(), value.to_string());

        if let Some(path) = inner.path.clone() {
            if let Err(e) = write_properties(&path, &inner.values) {
                let err = ConfigError::SaveFailed {
                    path: path.display().to_string(),
                    source: e,
                };
                tracing::error!("{err}, value retained in memory");
            }
        }
    }

    /// Whether the store has a backing file
    pub fn is_persistent(&self) -> bool {
        self.inner.lock().path.is_some()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    /// True when no entries are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Log the current entries at debug level
    pub fn log_current_settings(&self) {
        let inner = self.inner.lock();
        for (key, value) in &inner.values {
            tracing::debug!("property {key}={value}");
        }
    }
}

fn parse_properties(contents: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            // Last write wins for duplicate keys
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    values
}

fn write_properties(path: &Path, values: &BTreeMap<String, String>) -> std::io::Result<()> {
    let mut out = String::new();
    for (key, value) in values {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }

    fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ScanCore.properties");

        let store = ConfigStore::load(&path);

        assert!(path.exists());
        assert!(store.is_persistent());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_returns_default_for_absent_key() {
        let store = ConfigStore::in_memory();

        assert!(!store.get("main.broadcast.status.visible", false));
        assert_eq!(store.get("channel.count", 16u32), 16);
        assert_eq!(
            store.get("tuner.name", "default".to_string()),
            "default".to_string()
        );
    }

    #[test]
    fn test_get_is_idempotent() {
        let store = ConfigStore::in_memory();
        store.set("decoder.rate", 9600u32);

        for _ in 0..5 {
            assert_eq!(store.get("decoder.rate", 0u32), 9600);
        }
    }

    #[test]
    fn test_get_falls_back_on_parse_failure() {
        let store = ConfigStore::in_memory();
        store.set("decoder.rate", "not-a-number");

        assert_eq!(store.get("decoder.rate", 4800u32), 4800);
    }

    #[test]
    fn test_set_round_trips_through_fresh_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ScanCore.properties");

        let store = ConfigStore::load(&path);
        store.set("main.broadcast.status.visible", true);
        store.set("tuner.frequency", 460_125_000u64);
        drop(store);

        let reloaded = ConfigStore::load(&path);
        assert!(reloaded.get("main.broadcast.status.visible", false));
        assert_eq!(reloaded.get("tuner.frequency", 0u64), 460_125_000);
    }

    #[test]
    fn test_last_write_wins_for_duplicate_keys() {
        let values = parse_properties("a=1\na=2\n");
        assert_eq!(values.get("a"), Some(&"2".to_string()));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let values = parse_properties("# header\n\n key = value \n");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_memory_only_mode_after_create_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Point at a file inside a directory that does not exist.
        let path = dir.path().join("missing").join("ScanCore.properties");

        let store = ConfigStore::load(&path);

        assert!(!store.is_persistent());
        store.set("key", "value");
        assert_eq!(store.get("key", String::new()), "value");
        assert!(!path.exists());
    }
}
