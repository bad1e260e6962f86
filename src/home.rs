/// Application home directory resolution
///
/// The home directory holds the properties file, playlists, event logs and
/// recordings. It is created on first run; when creation fails the rest of
/// the application keeps running with built-in defaults and nothing is
/// persisted.
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name created under the user's home directory
pub const APP_DIR_NAME: &str = "ScanCore";

/// File name of the flat properties store inside the home directory
pub const PROPERTIES_FILE_NAME: &str = "ScanCore.properties";

/// Resolve (and create on first run) the application home directory.
///
/// Returns `None` when the user home cannot be determined or the directory
/// cannot be created. Exactly one creation attempt is made per call; callers
/// invoke this once per process.
pub fn resolve() -> Option<PathBuf> {
    let base = match dirs::home_dir() {
        Some(base) => base,
        None => {
            tracing::error!("Could not determine user home directory, running without persistence");
            return None;
        }
    };

    resolve_in(&base)
}

/// Resolve the application home directory under an arbitrary base directory.
pub fn resolve_in(base: &Path) -> Option<PathBuf> {
    let home = base.join(APP_DIR_NAME);

    if home.is_dir() {
        return Some(home);
    }

    match fs::create_dir_all(&home) {
        Ok(()) => {
            tracing::info!("Created application home directory {}", home.display());
            Some(home)
        }
        Err(e) => {
            tracing::error!(
                "Could not create application home directory {}: {}",
                home.display(),
                e
            );
            None
        }
    }
}

/// Path of the properties file inside a resolved home directory
pub fn properties_path(home: &Path) -> PathBuf {
    home.join(PROPERTIES_FILE_NAME)
}
