/// Channel map model
///
/// Named tables translating protocol channel numbers into frequencies, used
/// by the processing manager when a decoded message references a channel by
/// number instead of by frequency.
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A contiguous range of channel numbers with a linear frequency layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRange {
    pub first: u16,
    pub last: u16,

    /// Frequency of channel `first`, in hertz
    pub base: u64,

    /// Channel-to-channel spacing in hertz
    pub step: u64,
}

impl ChannelRange {
    /// Frequency for a channel number, when it falls inside this range
    pub fn frequency(&self, number: u16) -> Option<u64> {
        if number < self.first || number > self.last {
            return None;
        }

        Some(self.base + u64::from(number - self.first) * self.step)
    }
}

/// A named channel-number→frequency map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMap {
    pub name: String,
    pub ranges: Vec<ChannelRange>,
}

impl ChannelMap {
    /// Frequency for a channel number, searching the ranges in order
    pub fn frequency(&self, number: u16) -> Option<u64> {
        self.ranges.iter().find_map(|r| r.frequency(number))
    }
}

/// Mutable store of channel maps keyed by name
pub struct ChannelMapModel {
    maps: Mutex<Vec<ChannelMap>>,
}

impl ChannelMapModel {
    pub fn new() -> Self {
        Self {
            maps: Mutex::new(Vec::new()),
        }
    }

    /// Add or replace a map by name
    pub fn add(&self, map: ChannelMap) {
        let mut maps = self.maps.lock();
        maps.retain(|m| m.name != map.name);
        maps.push(map);
    }

    /// Look up a map by name
    pub fn map(&self, name: &str) -> Option<ChannelMap> {
        self.maps.lock().iter().find(|m| m.name == name).cloned()
    }

    /// Frequency for a channel number in a named map
    pub fn frequency(&self, map_name: &str, number: u16) -> Option<u64> {
        self.map(map_name).and_then(|m| m.frequency(number))
    }

    /// Snapshot of all maps
    pub fn maps(&self) -> Vec<ChannelMap> {
        self.maps.lock().clone()
    }

    /// Number of maps in the model
    pub fn len(&self) -> usize {
        self.maps.lock().len()
    }

    /// True when the model holds no maps
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChannelMapModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uhf_map() -> ChannelMap {
        ChannelMap {
            name: "UHF".to_string(),
            ranges: vec![
                ChannelRange {
                    first: 1,
                    last: 100,
                    base: 450_000_000,
                    step: 12_500,
                },
                ChannelRange {
                    first: 101,
                    last: 200,
                    base: 460_000_000,
                    step: 12_500,
                },
            ],
        }
    }

    #[test]
    fn test_range_frequency_is_linear() {
        let range = ChannelRange {
            first: 1,
            last: 10,
            base: 450_000_000,
            step: 12_500,
        };

        assert_eq!(range.frequency(1), Some(450_000_000));
        assert_eq!(range.frequency(3), Some(450_025_000));
        assert_eq!(range.frequency(11), None);
        assert_eq!(range.frequency(0), None);
    }

    #[test]
    fn test_map_searches_ranges_in_order() {
        let map = uhf_map();
        assert_eq!(map.frequency(101), Some(460_000_000));
        assert_eq!(map.frequency(250), None);
    }

    #[test]
    fn test_model_lookup_by_name() {
        let model = ChannelMapModel::new();
        model.add(uhf_map());

        assert_eq!(model.frequency("UHF", 2), Some(450_012_500));
        assert_eq!(model.frequency("VHF", 2), None);
        assert_eq!(model.len(), 1);
    }
}
