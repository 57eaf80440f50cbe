//! Inbound translation: Discord message → envelope + canonical chain.
//!
//! The translator works on [`InboundMessage`], a plain view of the fields it
//! needs, so the algorithm is independent of the gateway library. See
//! [`crate::client::inbound_from_serenity`] for the conversion.

use std::collections::{HashMap, HashSet};

use {async_trait::async_trait, tracing::debug};

use switchboard_channels::{
    ConversationKind, Envelope, ImageSource, MessageChain, MessageComponent, RawHandle, Sender,
};

use crate::{Result, mention::parse_mention_token};

/// A user mentioned by the message, as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRecord {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// A file attached to the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRecord {
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
}

/// A previously sent message, as needed for quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub id: String,
    pub author_name: String,
    pub content: String,
    /// Unix seconds.
    pub timestamp: i64,
}

/// What the message replies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReference {
    /// The platform already delivered the referenced message.
    Resolved(ResolvedMessage),
    /// Only the ID is known; it has to be fetched.
    Unresolved { message_id: String },
}

/// Everything the translator reads from a raw platform message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    /// One-to-one conversation.
    pub is_direct: bool,
    pub author: Sender,
    pub content: String,
    pub mentions: Vec<MentionRecord>,
    pub attachments: Vec<AttachmentRecord>,
    pub reference: Option<MessageReference>,
    pub raw: RawHandle,
}

/// Looks up earlier messages by ID.
#[async_trait]
pub trait MessageFetcher: Send + Sync {
    async fn fetch_message(&self, message_id: &str) -> Result<ResolvedMessage>;
}

/// Translate one inbound message.
///
/// Never fails: an unresolvable reply is omitted, unusable attachments are
/// dropped, and a message without text or images yields an empty chain. The
/// chain starts with at most one `Reply`, followed by the interleaved text and
/// mentions, followed by one `Image` per image attachment.
pub async fn translate(
    msg: InboundMessage,
    self_id: &str,
    fetcher: Option<&dyn MessageFetcher>,
) -> (Envelope, MessageChain) {
    let mut chain = MessageChain::new();

    if let Some(reply) = resolve_reply(msg.reference.as_ref(), fetcher, &msg.id).await {
        chain.push(reply);
    }
    for component in interleave_mentions(&msg.content, &msg.mentions) {
        chain.push(component);
    }
    for attachment in msg.attachments.iter().filter(|a| is_image_attachment(a)) {
        chain.push(MessageComponent::image(ImageSource::RemoteUrl(
            attachment.url.clone(),
        )));
    }

    let (kind, group_id) = if msg.is_direct {
        (ConversationKind::Direct, String::new())
    } else {
        (ConversationKind::Group, msg.guild_id.unwrap_or_default())
    };

    let envelope = Envelope {
        kind,
        group_id,
        sender: msg.author,
        self_id: self_id.to_string(),
        session_id: msg.channel_id,
        message_id: msg.id,
        message_str: msg.content,
        raw: msg.raw,
    };
    (envelope, chain)
}

/// Split `text` into `Plain` spans and `At` mentions.
///
/// One left-to-right scan: each `<@id>` token whose ID appears in `mentions`
/// becomes an `At`, the text between tokens becomes `Plain` (empty spans are
/// skipped). A user produces at most one `At`; later tokens for the same user,
/// and tokens for users not listed, stay inside the surrounding `Plain` text
/// verbatim. When several records share an ID, the first listed one supplies
/// the display name.
///
/// Concatenating the `Plain` texts with `<@id>` reinserted for each `At`
/// reproduces `text` exactly (nickname-form tokens `<@!id>` are normalised).
/// Empty text yields no components.
pub fn interleave_mentions(text: &str, mentions: &[MentionRecord]) -> Vec<MessageComponent> {
    if text.is_empty() {
        return Vec::new();
    }
    if mentions.is_empty() {
        return vec![MessageComponent::plain(text)];
    }

    let mut listed: HashMap<&str, &MentionRecord> = HashMap::with_capacity(mentions.len());
    for record in mentions {
        listed.entry(record.user_id.as_str()).or_insert(record);
    }

    let mut components = Vec::new();
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut span_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find("<@") {
        let token_start = cursor + offset;
        let Some((user_id, token_len)) = parse_mention_token(&text[token_start..]) else {
            cursor = token_start + 2;
            continue;
        };
        cursor = token_start + token_len;

        let Some(record) = listed.get(user_id) else {
            continue;
        };
        if !emitted.insert(user_id) {
            continue;
        }

        if token_start > span_start {
            components.push(MessageComponent::plain(&text[span_start..token_start]));
        }
        components.push(MessageComponent::At {
            user_id: user_id.to_string(),
            display_name: record.display_name.clone(),
        });
        span_start = cursor;
    }

    if span_start < text.len() {
        components.push(MessageComponent::plain(&text[span_start..]));
    }
    components
}

async fn resolve_reply(
    reference: Option<&MessageReference>,
    fetcher: Option<&dyn MessageFetcher>,
    message_id: &str,
) -> Option<MessageComponent> {
    let resolved = match reference? {
        MessageReference::Resolved(resolved) => resolved.clone(),
        MessageReference::Unresolved {
            message_id: referenced,
        } => {
            let fetcher = fetcher?;
            match fetcher.fetch_message(referenced).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    debug!(
                        message_id,
                        referenced_message_id = %referenced,
                        error = %e,
                        "reply reference unresolvable, omitting quote"
                    );
                    return None;
                },
            }
        },
    };

    Some(MessageComponent::Reply {
        referenced_message_id: resolved.id,
        quoted_author_name: Some(resolved.author_name),
        quoted_text: Some(resolved.content),
        quoted_timestamp: Some(resolved.timestamp),
    })
}

fn is_image_attachment(attachment: &AttachmentRecord) -> bool {
    if attachment.url.is_empty() {
        return false;
    }
    match attachment.content_type.as_deref() {
        Some(content_type) => switchboard_media::mime::is_image_mime(content_type),
        None => switchboard_media::mime::image_mime_from_name(&attachment.filename).is_some(),
    }
}
