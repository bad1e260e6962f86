/// Source manager
///
/// Bookkeeping for sample sources. Channels can only be processed while a
/// tuner is attached; the audio manager plays through the mixer resolved
/// here from configuration.
use std::sync::Arc;

use crate::models::tuner::TunerModel;
use crate::properties::ConfigStore;

const MIXER_KEY: &str = "audio.mixer";
const DEFAULT_MIXER: &str = "default";

/// Handle to the audio output mixer the audio manager plays through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerHandle {
    pub name: String,
}

pub struct SourceManager {
    tuner_model: Arc<TunerModel>,
    mixer: MixerHandle,
}

impl SourceManager {
    pub fn new(tuner_model: Arc<TunerModel>, config: Arc<ConfigStore>) -> Self {
        let mixer = MixerHandle {
            name: config.get(MIXER_KEY, DEFAULT_MIXER.to_string()),
        };

        tracing::info!("Audio mixer: {}", mixer.name);

        Self { tuner_model, mixer }
    }

    /// The configured output mixer
    pub fn mixer(&self) -> MixerHandle {
        self.mixer.clone()
    }

    /// Whether any tuner is attached and able to supply samples
    pub fn source_available(&self) -> bool {
        self.tuner_model.tuner_count() > 0
    }

    /// Number of attached sample sources
    pub fn source_count(&self) -> usize {
        self.tuner_model.tuner_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tuner::TunerConfigModel;

    #[test]
    fn test_mixer_resolved_from_config() {
        let config = Arc::new(ConfigStore::in_memory());
        config.set(MIXER_KEY, "usb-headset");

        let tuners = Arc::new(TunerModel::new(Arc::new(TunerConfigModel::new())));
        let manager = SourceManager::new(tuners, config);

        assert_eq!(manager.mixer().name, "usb-headset");
    }

    #[test]
    fn test_mixer_defaults_when_unset() {
        let config = Arc::new(ConfigStore::in_memory());
        let tuners = Arc::new(TunerModel::new(Arc::new(TunerConfigModel::new())));
        let manager = SourceManager::new(tuners, config);

        assert_eq!(manager.mixer().name, DEFAULT_MIXER);
    }

    #[test]
    fn test_source_availability_tracks_tuners() {
        let config = Arc::new(ConfigStore::in_memory());
        let tuners = Arc::new(TunerModel::new(Arc::new(TunerConfigModel::new())));
        let manager = SourceManager::new(Arc::clone(&tuners), config);

        assert!(!manager.source_available());

        tuners.add_tuner("RTL-2832 #0");
        assert!(manager.source_available());
        assert_eq!(manager.source_count(), 1);
    }
}
