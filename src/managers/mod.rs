/// Long-lived managers
///
/// Managers are the producers and consumers of the event graph. Each is
/// constructed with the models (and managers) it depends on; the composition
/// root guarantees every dependency exists before its dependents.

pub mod alias_action;
pub mod audio;
pub mod event_log;
pub mod map_service;
pub mod playlist;
pub mod processing;
pub mod recorder;
pub mod selection;
pub mod source;
pub mod spectral;

pub use alias_action::AliasActionManager;
pub use audio::AudioManager;
pub use event_log::EventLogManager;
pub use map_service::MapService;
pub use playlist::PlaylistManager;
pub use processing::ChannelProcessingManager;
pub use recorder::RecorderManager;
pub use selection::ChannelSelectionManager;
pub use source::{MixerHandle, SourceManager};
pub use spectral::TunerSpectralDisplayManager;
