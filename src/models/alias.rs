/// Alias model
///
/// Maps radio identifiers seen in decoded messages to display names and
/// the actions to fire when that identifier is active.
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Action attached to an alias, fired by the alias action manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasAction {
    /// Sound an audible alert
    Beep,

    /// Play a named audio clip
    PlayClip(String),

    /// Run an external script
    RunScript(String),
}

/// An alias record for one radio identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    /// Radio identifier as it appears in decoded messages
    pub identifier: String,

    /// Display name shown in place of the raw identifier
    pub name: String,

    #[serde(default)]
    pub actions: Vec<AliasAction>,
}

/// Mutable store of aliases keyed by radio identifier
pub struct AliasModel {
    aliases: Mutex<Vec<Alias>>,
}

impl AliasModel {
    pub fn new() -> Self {
        Self {
            aliases: Mutex::new(Vec::new()),
        }
    }

    /// Add or replace the alias for an identifier
    pub fn add(&self, alias: Alias) {
        let mut aliases = self.aliases.lock();
        aliases.retain(|a| a.identifier != alias.identifier);
        aliases.push(alias);
    }

    /// Look up an alias by radio identifier
    pub fn lookup(&self, identifier: &str) -> Option<Alias> {
        self.aliases
            .lock()
            .iter()
            .find(|a| a.identifier == identifier)
            .cloned()
    }

    /// Snapshot of all aliases
    pub fn aliases(&self) -> Vec<Alias> {
        self.aliases.lock().clone()
    }

    /// Number of aliases in the model
    pub fn len(&self) -> usize {
        self.aliases.lock().len()
    }

    /// True when the model holds no aliases
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AliasModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_identifier() {
        let model = AliasModel::new();
        model.add(Alias {
            identifier: "1234567".to_string(),
            name: "Engine 7".to_string(),
            actions: vec![AliasAction::Beep],
        });

        let alias = model.lookup("1234567").unwrap();
        assert_eq!(alias.name, "Engine 7");
        assert_eq!(alias.actions, vec![AliasAction::Beep]);
        assert!(model.lookup("7654321").is_none());
    }

    #[test]
    fn test_add_replaces_existing_identifier() {
        let model = AliasModel::new();
        model.add(Alias {
            identifier: "100".to_string(),
            name: "Old Name".to_string(),
            actions: Vec::new(),
        });
        model.add(Alias {
            identifier: "100".to_string(),
            name: "New Name".to_string(),
            actions: Vec::new(),
        });

        assert_eq!(model.len(), 1);
        assert_eq!(model.lookup("100").unwrap().name, "New Name");
    }
}
