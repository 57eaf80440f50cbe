//! Discord gateway event handler.
//!
//! Receives serenity events, filters out our own (and optionally other
//! bots') messages, translates the rest and commits them to the host sink.

use std::sync::Arc;

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, Message, Ready},
        async_trait,
    },
    tracing::{debug, info},
};

use switchboard_channels::ChannelEventSink;

use crate::{
    client::{SerenityChannel, inbound_from_serenity},
    config::DiscordAccountConfig,
    inbound::{MessageFetcher, translate},
    state::{AccountStateMap, bot_user_id},
};

/// Handler for Discord gateway events.
pub struct DiscordHandler {
    pub account_id: String,
    pub config: DiscordAccountConfig,
    pub accounts: AccountStateMap,
    pub event_sink: Arc<dyn ChannelEventSink>,
}

impl DiscordHandler {
    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

/// Whether an inbound message is dropped before translation.
///
/// Our own messages are always dropped, other bots only when `ignore_bots`.
fn should_skip(
    author_id: u64,
    author_is_bot: bool,
    self_id: Option<u64>,
    ignore_bots: bool,
) -> bool {
    self_id == Some(author_id) || (author_is_bot && ignore_bots)
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            account_id = %self.account_id,
            bot_name = %ready.user.name,
            bot_id = ready.user.id.get(),
            guilds = ready.guilds.len(),
            "discord bot ready"
        );

        let mut accounts = self.accounts.write().unwrap_or_else(|e| e.into_inner());
        if let Some(state) = accounts.get_mut(&self.account_id) {
            state.bot_user_id = Some(ready.user.id.get());
            state.http = Arc::clone(&ctx.http);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let self_id = bot_user_id(&self.accounts, &self.account_id);
        if should_skip(
            msg.author.id.get(),
            msg.author.bot,
            self_id,
            self.config.ignore_bots,
        ) {
            return;
        }

        debug!(
            account_id = %self.account_id,
            channel_id = msg.channel_id.get(),
            message_id = msg.id.get(),
            author = %msg.author.name,
            "discord inbound message"
        );

        let channel = self
            .config
            .resolve_replies
            .then(|| SerenityChannel::new(Arc::clone(&ctx.http), msg.channel_id));
        let fetcher = channel.as_ref().map(|c| c as &dyn MessageFetcher);
        let self_id = self_id.map(|id| id.to_string()).unwrap_or_default();

        let (envelope, chain) = translate(inbound_from_serenity(msg), &self_id, fetcher).await;
        self.event_sink.commit(envelope, chain).await;
    }
}
