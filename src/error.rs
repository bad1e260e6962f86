use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur during
/// application startup and operation. They provide context and can be
/// chained with anyhow.

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load properties from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create properties file {path}")]
    CreateFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist properties to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Component '{component}' was wired before its dependency '{dependency}'")]
    DependencyNotReady {
        component: String,
        dependency: String,
    },

    #[error("Component '{0}' was registered twice")]
    DuplicateComponent(String),
}

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Failed to read playlist file {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write playlist file {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Playlist file {path} is not valid JSON")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
