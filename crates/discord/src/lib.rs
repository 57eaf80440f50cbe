//! Discord channel plugin.
//!
//! Implements `ChannelPlugin` using serenity: gateway messages are translated
//! into canonical message chains, and outbound chains are rendered back into
//! paced Discord sends that respect the text and attachment limits.

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod inbound;
pub mod mention;
pub mod outbound;
pub mod plugin;
pub mod state;

pub use {
    config::DiscordAccountConfig,
    error::{Error, Result},
    inbound::{InboundMessage, MessageFetcher, translate},
    outbound::{DispatchOptions, Dispatcher, send_to_session},
    plugin::DiscordPlugin,
};
