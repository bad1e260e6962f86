/// Messaging module for the event-notification graph
///
/// Producers own one `Broadcaster` per event family they emit. Delivery is
/// synchronous and in registration order; a failing subscriber is isolated
/// (logged) and never prevents delivery to the subscribers after it.
///
/// ## Architecture
///
/// ```text
/// ┌───────────────┐   ChannelEvent    ┌──────────────────────┐
/// │ ChannelModel  │ ────────────────> │ processing, selection │
/// └───────────────┘                   └──────────────────────┘
/// ┌───────────────┐   AudioPacket     ┌──────────────────────────┐
/// │  Processing   │ ────────────────> │ recorder, audio, streams │
/// │   Manager     │   DecodedMessage  ├──────────────────────────┤
/// └───────────────┘ ────────────────> │ alias actions, map       │
///                                     └──────────────────────────┘
/// ```

pub mod broadcaster;
pub mod events;

// Re-export commonly used types
pub use broadcaster::{Broadcaster, Listener};
pub use events::{
    AudioPacket, ChannelEvent, ChannelEventKind, DecodedMessage, TunerEvent, TunerEventKind,
};
