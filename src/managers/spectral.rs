/// Tuner spectral display manager
///
/// Tuner-event subscriber that tracks which tuner owns the main spectral
/// display. Registered before the window-title listener, so the display
/// owner is current by the time the title updates.
use std::sync::Arc;

use parking_lot::Mutex;

use crate::managers::processing::ChannelProcessingManager;
use crate::messaging::{Listener, TunerEvent, TunerEventKind};
use crate::models::channel::ChannelModel;
use crate::properties::ConfigStore;

const AUTO_DISPLAY_KEY: &str = "spectral.display.auto";

pub struct TunerSpectralDisplayManager {
    channel_model: Arc<ChannelModel>,
    processing: Arc<ChannelProcessingManager>,

    /// Whether the first attached tuner is shown automatically
    auto_display: bool,
    displayed: Mutex<Option<String>>,
}

impl TunerSpectralDisplayManager {
    pub fn new(
        channel_model: Arc<ChannelModel>,
        processing: Arc<ChannelProcessingManager>,
        config: Arc<ConfigStore>,
    ) -> Self {
        Self {
            channel_model,
            processing,
            auto_display: config.get(AUTO_DISPLAY_KEY, true),
            displayed: Mutex::new(None),
        }
    }

    /// The tuner currently shown on the main spectral display
    pub fn displayed_tuner(&self) -> Option<String> {
        self.displayed.lock().clone()
    }
}

impl Listener<TunerEvent> for TunerSpectralDisplayManager {
    fn receive(&self, event: &TunerEvent) -> anyhow::Result<()> {
        match event.kind {
            TunerEventKind::MainDisplayRequested => {
                tracing::info!(
                    "Main spectral display showing {} ({} channels, {} processing)",
                    event.tuner,
                    self.channel_model.len(),
                    self.processing.processing_count()
                );
                *self.displayed.lock() = Some(event.tuner.clone());
            }
            TunerEventKind::Added => {
                let mut displayed = self.displayed.lock();
                if self.auto_display && displayed.is_none() {
                    *displayed = Some(event.tuner.clone());
                }
            }
            TunerEventKind::Removed => {
                let mut displayed = self.displayed.lock();
                if displayed.as_deref() == Some(event.tuner.as_str()) {
                    *displayed = None;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::event_log::EventLogManager;
    use crate::managers::recorder::RecorderManager;
    use crate::managers::source::SourceManager;
    use crate::models::alias::AliasModel;
    use crate::models::channel_map::ChannelMapModel;
    use crate::models::tuner::{TunerConfigModel, TunerModel};

    fn wired(config: Arc<ConfigStore>) -> (Arc<TunerModel>, Arc<TunerSpectralDisplayManager>) {
        let tuner_model = Arc::new(TunerModel::new(Arc::new(TunerConfigModel::new())));
        let channel_model = Arc::new(ChannelModel::new());
        let recorder = Arc::new(RecorderManager::new());

        let processing = Arc::new(ChannelProcessingManager::new(
            Arc::clone(&channel_model),
            Arc::new(ChannelMapModel::new()),
            Arc::new(AliasModel::new()),
            Arc::new(EventLogManager::new(None)),
            recorder,
            Arc::new(SourceManager::new(
                Arc::clone(&tuner_model),
                Arc::clone(&config),
            )),
        ));

        let manager = Arc::new(TunerSpectralDisplayManager::new(
            channel_model,
            processing,
            config,
        ));
        tuner_model.add_listener(
            "tuner-spectral-display",
            Arc::clone(&manager) as Arc<dyn Listener<TunerEvent>>,
        );

        (tuner_model, manager)
    }

    #[test]
    fn test_first_tuner_is_auto_displayed() {
        let (tuner_model, manager) = wired(Arc::new(ConfigStore::in_memory()));

        tuner_model.add_tuner("RTL-2832 #0");
        tuner_model.add_tuner("RTL-2832 #1");

        assert_eq!(manager.displayed_tuner().as_deref(), Some("RTL-2832 #0"));
    }

    #[test]
    fn test_auto_display_can_be_disabled() {
        let config = Arc::new(ConfigStore::in_memory());
        config.set(AUTO_DISPLAY_KEY, false);
        let (tuner_model, manager) = wired(config);

        tuner_model.add_tuner("RTL-2832 #0");
        assert_eq!(manager.displayed_tuner(), None);

        tuner_model.request_first_tuner_display();
        assert_eq!(manager.displayed_tuner().as_deref(), Some("RTL-2832 #0"));
    }

    #[test]
    fn test_removed_tuner_releases_display() {
        let (tuner_model, manager) = wired(Arc::new(ConfigStore::in_memory()));

        tuner_model.add_tuner("Airspy #0");
        tuner_model.remove_tuner("Airspy #0");

        assert_eq!(manager.displayed_tuner(), None);
    }
}
