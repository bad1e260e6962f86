/// Mutable data models
///
/// Each model is an independently constructed store with no construction-time
/// dependency on the other models (the tuner model's dependency on the tuner
/// configuration model is the one exception). Models that emit events own
/// their broadcaster.

pub mod alias;
pub mod broadcast;
pub mod channel;
pub mod channel_map;
pub mod tuner;

pub use alias::{Alias, AliasAction, AliasModel};
pub use broadcast::{BroadcastModel, StreamConfig};
pub use channel::{Channel, ChannelId, ChannelModel};
pub use channel_map::{ChannelMap, ChannelMapModel, ChannelRange};
pub use tuner::{TunerConfig, TunerConfigModel, TunerModel};
