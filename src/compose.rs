/// Composition root
///
/// Constructs every model and manager exactly once, dependency-first, then
/// performs all listener registrations. Nothing may emit an event until
/// `compose` returns: the graph a subscriber can observe is always fully
/// constructed.
///
/// The construction order is not left implicit in the code: every component
/// is recorded in a ledger together with the names of its dependencies, and
/// recording a component before one of its dependencies fails the whole
/// composition.
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ComposeError;
use crate::managers::{
    AliasActionManager, AudioManager, ChannelProcessingManager, ChannelSelectionManager,
    EventLogManager, MapService, PlaylistManager, RecorderManager, SourceManager,
    TunerSpectralDisplayManager,
};
use crate::messaging::{
    AudioPacket, ChannelEvent, DecodedMessage, Listener, TunerEvent, TunerEventKind,
};
use crate::models::{
    AliasModel, BroadcastModel, ChannelMapModel, ChannelModel, TunerConfigModel, TunerModel,
};
use crate::properties::ConfigStore;

/// Base window title before any tuner owns the main display
pub const APPLICATION_TITLE: &str = "ScanCore";

/// Record of one constructed component: its position in the construction
/// sequence and the components it was constructed with.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub name: String,
    pub index: usize,
    pub dependencies: Vec<String>,
}

/// Construction-order ledger.
///
/// The dependency relation must be acyclic: a component may only be
/// recorded after every component it depends on. Violations surface as
/// composition errors instead of latent wiring bugs.
#[derive(Debug, Default)]
pub struct ConstructionLedger {
    entries: Vec<LedgerEntry>,
}

impl ConstructionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component and its declared dependencies.
    ///
    /// Fails when a dependency has not been recorded yet, or when the
    /// component name was already recorded.
    pub fn record(&mut self, name: &str, dependencies: &[&str]) -> Result<(), ComposeError> {
        if self.index_of(name).is_some() {
            return Err(ComposeError::DuplicateComponent(name.to_string()));
        }

        for dependency in dependencies {
            if self.index_of(dependency).is_none() {
                return Err(ComposeError::DependencyNotReady {
                    component: name.to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }

        self.entries.push(LedgerEntry {
            name: name.to_string(),
            index: self.entries.len(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        });

        Ok(())
    }

    /// Construction index of a component, if recorded
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.index)
    }

    /// All entries in construction order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}

/// Window-title listener: the subsystem's own subscription to tuner events.
/// When a tuner takes the main spectral display, the title shows its name.
pub struct WindowTitle {
    title: Mutex<String>,
}

impl WindowTitle {
    fn new() -> Self {
        Self {
            title: Mutex::new(APPLICATION_TITLE.to_string()),
        }
    }

    /// Current window title
    pub fn current(&self) -> String {
        self.title.lock().clone()
    }
}

impl Listener<TunerEvent> for WindowTitle {
    fn receive(&self, event: &TunerEvent) -> anyhow::Result<()> {
        if event.kind == TunerEventKind::MainDisplayRequested {
            *self.title.lock() = format!("{} - {}", APPLICATION_TITLE, event.tuner);
        }

        Ok(())
    }
}

/// The fully wired object graph handed to the presentation layer
pub struct ApplicationGraph {
    pub config: Arc<ConfigStore>,

    pub tuner_config_model: Arc<TunerConfigModel>,
    pub tuner_model: Arc<TunerModel>,
    pub channel_model: Arc<ChannelModel>,
    pub alias_model: Arc<AliasModel>,
    pub channel_map_model: Arc<ChannelMapModel>,
    pub broadcast_model: Arc<BroadcastModel>,

    pub event_log: Arc<EventLogManager>,
    pub recorder: Arc<RecorderManager>,
    pub source: Arc<SourceManager>,
    pub processing: Arc<ChannelProcessingManager>,
    pub selection: Arc<ChannelSelectionManager>,
    pub audio: Arc<AudioManager>,
    pub alias_action: Arc<AliasActionManager>,
    pub map_service: Arc<MapService>,
    pub spectral_display: Arc<TunerSpectralDisplayManager>,
    pub playlist: Arc<PlaylistManager>,

    pub window_title: Arc<WindowTitle>,

    ledger: ConstructionLedger,
}

impl ApplicationGraph {
    /// The construction-order ledger for this graph
    pub fn ledger(&self) -> &ConstructionLedger {
        &self.ledger
    }
}

/// Construct and wire the complete application graph.
///
/// Runs exactly once per process, on a single thread; event emission only
/// begins once this returns. Bootstrap degradation (absent home directory,
/// memory-only config) is handled by the components themselves; an error
/// here means the process must not start.
pub fn compose(
    config: Arc<ConfigStore>,
    home: Option<PathBuf>,
) -> Result<ApplicationGraph, ComposeError> {
    let mut ledger = ConstructionLedger::new();

    // Configuration models first, then the core data models. None of these
    // depend on each other apart from the tuner model's configuration store.
    ledger.record("config-store", &[])?;

    let tuner_config_model = Arc::new(TunerConfigModel::new());
    ledger.record("tuner-config-model", &[])?;

    let tuner_model = Arc::new(TunerModel::new(Arc::clone(&tuner_config_model)));
    ledger.record("tuner-model", &["tuner-config-model"])?;

    let channel_model = Arc::new(ChannelModel::new());
    ledger.record("channel-model", &[])?;

    let alias_model = Arc::new(AliasModel::new());
    ledger.record("alias-model", &[])?;

    let channel_map_model = Arc::new(ChannelMapModel::new());
    ledger.record("channel-map-model", &[])?;

    let broadcast_model = Arc::new(BroadcastModel::new());
    ledger.record("broadcast-model", &[])?;

    // Leaf managers with no manager dependencies
    let event_log = Arc::new(EventLogManager::new(home.clone()));
    ledger.record("event-log-manager", &[])?;

    let recorder = Arc::new(RecorderManager::new());
    ledger.record("recorder-manager", &[])?;

    let source = Arc::new(SourceManager::new(
        Arc::clone(&tuner_model),
        Arc::clone(&config),
    ));
    ledger.record("source-manager", &["tuner-model", "config-store"])?;

    // The processing manager consumes the broadest set of leaves
    let processing = Arc::new(ChannelProcessingManager::new(
        Arc::clone(&channel_model),
        Arc::clone(&channel_map_model),
        Arc::clone(&alias_model),
        Arc::clone(&event_log),
        Arc::clone(&recorder),
        Arc::clone(&source),
    ));
    ledger.record(
        "channel-processing-manager",
        &[
            "channel-model",
            "channel-map-model",
            "alias-model",
            "event-log-manager",
            "recorder-manager",
            "source-manager",
        ],
    )?;

    // Managers that depend on the processing manager or its peers
    let selection = Arc::new(ChannelSelectionManager::new(Arc::clone(&channel_model)));
    ledger.record("channel-selection-manager", &["channel-model"])?;

    let audio = Arc::new(AudioManager::new(source.mixer()));
    ledger.record("audio-manager", &["source-manager"])?;

    let alias_action = Arc::new(AliasActionManager::new(Arc::clone(&alias_model)));
    ledger.record("alias-action-manager", &["alias-model"])?;

    let map_service = Arc::new(MapService::new());
    ledger.record("map-service", &[])?;

    let spectral_display = Arc::new(TunerSpectralDisplayManager::new(
        Arc::clone(&channel_model),
        Arc::clone(&processing),
        Arc::clone(&config),
    ));
    ledger.record(
        "tuner-spectral-display-manager",
        &[
            "channel-model",
            "channel-processing-manager",
            "config-store",
        ],
    )?;

    // Aggregation manager over the data models
    let playlist = Arc::new(PlaylistManager::new(
        Arc::clone(&alias_model),
        Arc::clone(&broadcast_model),
        Arc::clone(&channel_model),
        Arc::clone(&channel_map_model),
        home,
    ));
    ledger.record(
        "playlist-manager",
        &[
            "alias-model",
            "broadcast-model",
            "channel-model",
            "channel-map-model",
        ],
    )?;

    let window_title = Arc::new(WindowTitle::new());
    ledger.record("window-title", &[])?;

    // Every component exists; perform the listener registrations. The
    // orders below are contracts: processing observes channel events before
    // selection, and audio packets reach the recorder, then the audio
    // manager, then the streaming model.
    channel_model.add_listener(
        "channel-processing",
        Arc::clone(&processing) as Arc<dyn Listener<ChannelEvent>>,
    );
    channel_model.add_listener(
        "channel-selection",
        Arc::clone(&selection) as Arc<dyn Listener<ChannelEvent>>,
    );

    processing.add_audio_listener(
        "recorder",
        Arc::clone(&recorder) as Arc<dyn Listener<AudioPacket>>,
    );
    processing.add_audio_listener(
        "audio",
        Arc::clone(&audio) as Arc<dyn Listener<AudioPacket>>,
    );
    processing.add_audio_listener(
        "broadcast",
        Arc::clone(&broadcast_model) as Arc<dyn Listener<AudioPacket>>,
    );

    processing.add_message_listener(
        "alias-action",
        Arc::clone(&alias_action) as Arc<dyn Listener<DecodedMessage>>,
    );
    processing.add_message_listener(
        "map",
        Arc::clone(&map_service) as Arc<dyn Listener<DecodedMessage>>,
    );

    tuner_model.add_listener(
        "tuner-spectral-display",
        Arc::clone(&spectral_display) as Arc<dyn Listener<TunerEvent>>,
    );
    tuner_model.add_listener(
        "window-title",
        Arc::clone(&window_title) as Arc<dyn Listener<TunerEvent>>,
    );

    // Load the playlist only now, so restored channels flow through the
    // wired subscribers.
    playlist.init();

    tracing::info!(
        "Application graph composed: {} components",
        ledger.entries().len()
    );

    Ok(ApplicationGraph {
        config,
        tuner_config_model,
        tuner_model,
        channel_model,
        alias_model,
        channel_map_model,
        broadcast_model,
        event_log,
        recorder,
        source,
        processing,
        selection,
        audio,
        alias_action,
        map_service,
        spectral_display,
        playlist,
        window_title,
        ledger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_accepts_dependency_first_order() {
        let mut ledger = ConstructionLedger::new();
        ledger.record("a", &[]).unwrap();
        ledger.record("b", &["a"]).unwrap();
        ledger.record("c", &["a", "b"]).unwrap();

        assert!(ledger.index_of("a").unwrap() < ledger.index_of("b").unwrap());
        assert!(ledger.index_of("b").unwrap() < ledger.index_of("c").unwrap());
    }

    #[test]
    fn test_ledger_rejects_missing_dependency() {
        let mut ledger = ConstructionLedger::new();
        ledger.record("a", &[]).unwrap();

        let err = ledger.record("b", &["not-built"]).unwrap_err();
        assert!(matches!(err, ComposeError::DependencyNotReady { .. }));
    }

    #[test]
    fn test_ledger_rejects_duplicate_component() {
        let mut ledger = ConstructionLedger::new();
        ledger.record("a", &[]).unwrap();

        let err = ledger.record("a", &[]).unwrap_err();
        assert!(matches!(err, ComposeError::DuplicateComponent(_)));
    }

    #[test]
    fn test_window_title_follows_main_display() {
        let title = WindowTitle::new();
        assert_eq!(title.current(), APPLICATION_TITLE);

        title
            .receive(&TunerEvent::new("RTL-2832 #0", TunerEventKind::Added))
            .unwrap();
        assert_eq!(title.current(), APPLICATION_TITLE);

        title
            .receive(&TunerEvent::new(
                "RTL-2832 #0",
                TunerEventKind::MainDisplayRequested,
            ))
            .unwrap();
        assert_eq!(title.current(), "ScanCore - RTL-2832 #0");
    }
}
