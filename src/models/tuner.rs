/// Tuner models
///
/// `TunerConfigModel` stores per-tuner tuning settings; `TunerModel` is the
/// registry of attached tuners and the producer of tuner events.
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::messaging::{Broadcaster, Listener, TunerEvent, TunerEventKind};

/// Tuning settings for one tuner, keyed by tuner name
#[derive(Debug, Clone, PartialEq)]
pub struct TunerConfig {
    /// Center frequency in hertz
    pub frequency: u64,

    /// Gain in decibels
    pub gain: f64,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            frequency: 460_000_000,
            gain: 24.0,
        }
    }
}

/// Store of per-tuner configurations
pub struct TunerConfigModel {
    configs: Mutex<BTreeMap<String, TunerConfig>>,
}

impl TunerConfigModel {
    pub fn new() -> Self {
        Self {
            configs: Mutex::new(BTreeMap::new()),
        }
    }

    /// Configuration for a tuner, falling back to the defaults
    pub fn config(&self, tuner: &str) -> TunerConfig {
        self.configs.lock().get(tuner).cloned().unwrap_or_default()
    }

    /// Store the configuration for a tuner
    pub fn set_config(&self, tuner: &str, config: TunerConfig) {
        self.configs.lock().insert(tuner.to_string(), config);
    }

    /// Number of stored configurations
    pub fn len(&self) -> usize {
        self.configs.lock().len()
    }

    /// True when no configurations are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TunerConfigModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of attached tuners; producer of tuner events
pub struct TunerModel {
    config_model: Arc<TunerConfigModel>,
    tuners: Mutex<Vec<String>>,
    broadcaster: Broadcaster<TunerEvent>,
}

impl TunerModel {
    pub fn new(config_model: Arc<TunerConfigModel>) -> Self {
        Self {
            config_model,
            tuners: Mutex::new(Vec::new()),
            broadcaster: Broadcaster::new("tuner"),
        }
    }

    /// Register a tuner-event subscriber
    pub fn add_listener(&self, name: &str, listener: Arc<dyn Listener<TunerEvent>>) {
        self.broadcaster.add_listener(name, listener);
    }

    /// Subscriber names in registration order
    pub fn listener_names(&self) -> Vec<String> {
        self.broadcaster.listener_names()
    }

    /// Add a discovered tuner and announce it
    pub fn add_tuner(&self, name: impl Into<String>) {
        let name = name.into();
        self.tuners.lock().push(name.clone());

        tracing::info!(
            "Tuner {} added with config {:?}",
            name,
            self.config_model.config(&name)
        );

        self.broadcaster
            .broadcast(&TunerEvent::new(name, TunerEventKind::Added));
    }

    /// Remove a tuner and announce the removal
    pub fn remove_tuner(&self, name: &str) {
        let removed = {
            let mut tuners = self.tuners.lock();
            let before = tuners.len();
            tuners.retain(|t| t != name);
            tuners.len() != before
        };

        if removed {
            self.broadcaster
                .broadcast(&TunerEvent::new(name, TunerEventKind::Removed));
        }
    }

    /// Ask the presentation layer to show the first tuner on the main
    /// spectral display. No-op when no tuner is attached.
    pub fn request_first_tuner_display(&self) {
        let first = self.tuners.lock().first().cloned();

        if let Some(name) = first {
            self.broadcaster
                .broadcast(&TunerEvent::new(name, TunerEventKind::MainDisplayRequested));
        }
    }

    /// Snapshot of attached tuner names
    pub fn tuners(&self) -> Vec<String> {
        self.tuners.lock().clone()
    }

    /// Number of attached tuners
    pub fn tuner_count(&self) -> usize {
        self.tuners.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;

    #[test]
    fn test_config_falls_back_to_default() {
        let model = TunerConfigModel::new();
        assert_eq!(model.config("missing"), TunerConfig::default());

        model.set_config(
            "RTL-2832 #0",
            TunerConfig {
                frequency: 851_000_000,
                gain: 32.0,
            },
        );
        assert_eq!(model.config("RTL-2832 #0").frequency, 851_000_000);
    }

    #[test]
    fn test_add_and_remove_announce_tuners() {
        let model = TunerModel::new(Arc::new(TunerConfigModel::new()));
        let seen = Arc::new(PlMutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        model.add_listener(
            "probe",
            Arc::new(move |event: &TunerEvent| -> anyhow::Result<()> {
                log.lock().push((event.tuner.clone(), event.kind));
                Ok(())
            }),
        );

        model.add_tuner("Airspy #0");
        model.remove_tuner("Airspy #0");
        model.remove_tuner("not-attached");

        assert_eq!(
            *seen.lock(),
            vec![
                ("Airspy #0".to_string(), TunerEventKind::Added),
                ("Airspy #0".to_string(), TunerEventKind::Removed),
            ]
        );
    }

    #[test]
    fn test_first_tuner_display_request() {
        let model = TunerModel::new(Arc::new(TunerConfigModel::new()));
        let seen = Arc::new(PlMutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        model.add_listener(
            "probe",
            Arc::new(move |event: &TunerEvent| -> anyhow::Result<()> {
                if event.kind == TunerEventKind::MainDisplayRequested {
                    log.lock().push(event.tuner.clone());
                }
                Ok(())
            }),
        );

        // No tuners attached: no request is made.
        model.request_first_tuner_display();
        assert!(seen.lock().is_empty());

        model.add_tuner("RTL-2832 #0");
        model.add_tuner("RTL-2832 #1");
        model.request_first_tuner_display();

        assert_eq!(*seen.lock(), vec!["RTL-2832 #0".to_string()]);
    }
}
