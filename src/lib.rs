//! Application core for a trunked-radio scanner: composition root,
//! event-notification graph, and configuration bootstrap.
//!
//! The presentation layer, decode pipeline and audio output are external
//! collaborators. They receive the fully wired [`compose::ApplicationGraph`]
//! and talk to it through the listener interfaces in [`messaging`].

pub mod compose;
pub mod error;
pub mod home;
pub mod managers;
pub mod messaging;
pub mod models;
pub mod properties;
pub mod status_view;

pub use compose::{compose, ApplicationGraph, ConstructionLedger};
pub use error::{AppResult, ComposeError, ConfigError};
pub use properties::ConfigStore;
pub use status_view::{BroadcastStatusView, Visibility, BROADCAST_STATUS_VISIBLE_KEY};
