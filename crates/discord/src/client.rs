//! Serenity-backed channel handle and message conversion.

use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::{
        all::{ChannelId, CreateAttachment, CreateMessage, Message, MessageId},
        http::Http,
    },
    tracing::debug,
};

use switchboard_channels::{RawHandle, Sender};

use crate::{
    Error, Result,
    inbound::{
        AttachmentRecord, InboundMessage, MentionRecord, MessageFetcher, MessageReference,
        ResolvedMessage,
    },
    outbound::{ChannelHandle, OutboundBatch, OutboundFile, SentMessage},
};

/// Parse a Discord snowflake. Zero is rejected since serenity IDs are nonzero.
pub fn parse_snowflake(id: &str) -> Result<u64> {
    match id.trim().parse::<u64>() {
        Ok(value) if value != 0 => Ok(value),
        _ => Err(Error::InvalidId { id: id.to_string() }),
    }
}

/// A resolved Discord text channel reachable over REST.
pub struct SerenityChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
    id: String,
}

impl SerenityChannel {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self {
            http,
            id: channel_id.get().to_string(),
            channel_id,
        }
    }

    /// Resolve `session_id` to a channel, failing if it does not exist or
    /// the bot cannot see it.
    pub async fn fetch(http: Arc<Http>, session_id: &str) -> Result<Self> {
        let channel_id = ChannelId::new(parse_snowflake(session_id)?);
        channel_id.to_channel(http.as_ref()).await?;
        Ok(Self::new(http, channel_id))
    }
}

#[async_trait]
impl MessageFetcher for SerenityChannel {
    async fn fetch_message(&self, message_id: &str) -> Result<ResolvedMessage> {
        let message_id = MessageId::new(parse_snowflake(message_id)?);
        let msg = self
            .channel_id
            .message(self.http.as_ref(), message_id)
            .await?;
        Ok(resolved_from_serenity(&msg))
    }
}

#[async_trait]
impl ChannelHandle for SerenityChannel {
    fn channel_id(&self) -> &str {
        &self.id
    }

    async fn send(&self, batch: OutboundBatch) -> Result<SentMessage> {
        let mut builder = CreateMessage::new();
        if let Some(text) = batch.text {
            builder = builder.content(text);
        }

        let mut attachments = Vec::with_capacity(batch.files.len());
        for file in &batch.files {
            // Opaque references are platform-side file paths for this adapter.
            let path = match file {
                OutboundFile::Path(path) => path.as_path(),
                OutboundFile::Opaque(id) => std::path::Path::new(id),
            };
            attachments.push(CreateAttachment::path(path).await?);
        }
        if !attachments.is_empty() {
            builder = builder.add_files(attachments);
        }

        let sent = self
            .channel_id
            .send_message(self.http.as_ref(), builder)
            .await?;
        debug!(channel_id = %self.id, message_id = %sent.id, "discord message created");
        Ok(SentMessage {
            id: sent.id.to_string(),
        })
    }
}

/// Snapshot of a serenity message used for reply quoting.
pub fn resolved_from_serenity(msg: &Message) -> ResolvedMessage {
    ResolvedMessage {
        id: msg.id.to_string(),
        author_name: msg.author.name.clone(),
        content: msg.content.clone(),
        timestamp: msg.timestamp.unix_timestamp(),
    }
}

/// Convert a gateway message into the platform-neutral inbound record.
pub fn inbound_from_serenity(msg: Message) -> InboundMessage {
    let reference = match (&msg.referenced_message, &msg.message_reference) {
        (Some(referenced), _) => Some(MessageReference::Resolved(resolved_from_serenity(
            referenced,
        ))),
        (None, Some(reference)) => reference
            .message_id
            .map(|id| MessageReference::Unresolved {
                message_id: id.to_string(),
            }),
        (None, None) => None,
    };

    let mentions = msg
        .mentions
        .iter()
        .map(|user| MentionRecord {
            user_id: user.id.to_string(),
            display_name: Some(user.global_name.clone().unwrap_or_else(|| user.name.clone())),
        })
        .collect();

    let attachments = msg
        .attachments
        .iter()
        .map(|a| AttachmentRecord {
            url: a.url.clone(),
            filename: a.filename.clone(),
            content_type: a.content_type.clone(),
        })
        .collect();

    InboundMessage {
        id: msg.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        guild_id: msg.guild_id.map(|g| g.to_string()),
        // Bots cannot join group DMs, so a guild-less message is one-to-one.
        is_direct: msg.guild_id.is_none(),
        author: Sender {
            user_id: msg.author.id.to_string(),
            nickname: msg.author.name.clone(),
        },
        content: msg.content.clone(),
        mentions,
        attachments,
        reference,
        raw: RawHandle::new(msg),
    }
}
