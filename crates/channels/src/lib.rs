//! Channel plugin system.
//!
//! Platform adapters (currently Discord) translate inbound platform messages
//! into the canonical [`MessageChain`] model and deliver outbound chains back
//! through the [`ChannelOutbound`] trait.

pub mod error;
pub mod message;
pub mod plugin;

pub use {
    error::{Error, Result},
    message::{
        ConversationKind, Envelope, ImageSource, LOCAL_FILE_PREFIX, MessageChain,
        MessageComponent, PlatformMetadata, RawHandle, Sender,
    },
    plugin::{BatchOutcome, ChannelEventSink, ChannelOutbound, ChannelPlugin, DispatchReport},
};
