/// Alias action manager
///
/// Decoded-message subscriber that fires the actions attached to the alias
/// of the sending radio, when one is configured.
use std::sync::Arc;

use parking_lot::Mutex;

use crate::messaging::{DecodedMessage, Listener};
use crate::models::alias::{AliasAction, AliasModel};

pub struct AliasActionManager {
    alias_model: Arc<AliasModel>,
    fired: Mutex<Vec<(String, AliasAction)>>,
}

impl AliasActionManager {
    pub fn new(alias_model: Arc<AliasModel>) -> Self {
        Self {
            alias_model,
            fired: Mutex::new(Vec::new()),
        }
    }

    /// Actions fired so far, in firing order
    pub fn fired_actions(&self) -> Vec<(String, AliasAction)> {
        self.fired.lock().clone()
    }

    /// Number of actions fired so far
    pub fn fired_count(&self) -> usize {
        self.fired.lock().len()
    }
}

impl Listener<DecodedMessage> for AliasActionManager {
    fn receive(&self, message: &DecodedMessage) -> anyhow::Result<()> {
        let Some(from) = &message.from else {
            return Ok(());
        };

        let Some(alias) = self.alias_model.lookup(from) else {
            return Ok(());
        };

        for action in alias.actions {
            tracing::info!("Alias {} fired action {:?}", alias.name, action);
            self.fired.lock().push((alias.name.clone(), action));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alias::Alias;
    use crate::models::channel::ChannelId;

    #[test]
    fn test_actions_fire_for_aliased_sender() {
        let aliases = Arc::new(AliasModel::new());
        aliases.add(Alias {
            identifier: "1234567".to_string(),
            name: "Engine 7".to_string(),
            actions: vec![AliasAction::Beep, AliasAction::PlayClip("alert.wav".into())],
        });

        let manager = AliasActionManager::new(aliases);

        let message =
            DecodedMessage::new(ChannelId(1), "P25", "GROUP CALL").with_from("1234567");
        manager.receive(&message).unwrap();

        let fired = manager.fired_actions();
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0], ("Engine 7".to_string(), AliasAction::Beep));
    }

    #[test]
    fn test_no_actions_without_alias_or_sender() {
        let manager = AliasActionManager::new(Arc::new(AliasModel::new()));

        // No sender on the message
        manager
            .receive(&DecodedMessage::new(ChannelId(1), "P25", "idle"))
            .unwrap();

        // Sender with no alias record
        manager
            .receive(&DecodedMessage::new(ChannelId(1), "P25", "call").with_from("999"))
            .unwrap();

        assert_eq!(manager.fired_count(), 0);
    }
}
