/// Map service
///
/// Decoded-message subscriber that collects position reports so the
/// presentation layer can plot active radios.
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::messaging::{DecodedMessage, Listener};

/// Latest known position for one radio identifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plot {
    pub latitude: f64,
    pub longitude: f64,
}

pub struct MapService {
    plots: Mutex<HashMap<String, Plot>>,
}

impl MapService {
    pub fn new() -> Self {
        Self {
            plots: Mutex::new(HashMap::new()),
        }
    }

    /// Latest plot for a radio identifier
    pub fn plot(&self, identifier: &str) -> Option<Plot> {
        self.plots.lock().get(identifier).copied()
    }

    /// Number of radios with a known position
    pub fn plotted_count(&self) -> usize {
        self.plots.lock().len()
    }
}

impl Default for MapService {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener<DecodedMessage> for MapService {
    fn receive(&self, message: &DecodedMessage) -> anyhow::Result<()> {
        let (Some(from), Some((latitude, longitude))) = (&message.from, message.location) else {
            return Ok(());
        };

        self.plots.lock().insert(
            from.clone(),
            Plot {
                latitude,
                longitude,
            },
        );

        Ok(())
    }
}
