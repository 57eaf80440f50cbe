//! Platform-agnostic message model.
//!
//! Inbound translators produce an [`Envelope`] plus a [`MessageChain`];
//! outbound dispatchers consume a [`MessageChain`]. Chains are built fresh
//! per message and never shared between calls.

use std::{any::Any, fmt, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

/// Reference prefix marking a local file in textual image references.
pub const LOCAL_FILE_PREFIX: &str = "file:///";

/// Where an image can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageSource {
    /// A file on the local filesystem.
    LocalPath(PathBuf),
    /// An `http(s)` URL that has to be downloaded before upload.
    RemoteUrl(String),
    /// A platform-owned identifier passed through untouched.
    OpaqueId(String),
}

impl ImageSource {
    /// Classify a textual image reference.
    ///
    /// `file:///tmp/a.png` becomes `LocalPath("/tmp/a.png")` (and
    /// `file:///C:/a.png` keeps its drive letter), anything starting with
    /// `http` is a remote URL and everything else is treated as opaque.
    pub fn parse(reference: &str) -> Self {
        if let Some(rest) = reference.strip_prefix(LOCAL_FILE_PREFIX) {
            let path = if has_drive_letter(rest) {
                PathBuf::from(rest)
            } else {
                PathBuf::from(format!("/{rest}"))
            };
            Self::LocalPath(path)
        } else if reference.starts_with("http") {
            Self::RemoteUrl(reference.to_string())
        } else {
            Self::OpaqueId(reference.to_string())
        }
    }
}

fn has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// One semantic unit of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageComponent {
    /// Literal text span.
    Plain { text: String },
    /// Mention of a user.
    At {
        user_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    /// Image reference, never inlined.
    Image { source: ImageSource },
    /// Reference to an earlier message. Quoted fields stay empty when the
    /// referenced message could not be resolved.
    Reply {
        referenced_message_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quoted_author_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quoted_text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quoted_timestamp: Option<i64>,
    },
}

impl MessageComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn at(user_id: impl Into<String>) -> Self {
        Self::At {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    pub fn image(source: ImageSource) -> Self {
        Self::Image { source }
    }

    pub fn reply(referenced_message_id: impl Into<String>) -> Self {
        Self::Reply {
            referenced_message_id: referenced_message_id.into(),
            quoted_author_name: None,
            quoted_text: None,
            quoted_timestamp: None,
        }
    }
}

/// Ordered sequence of components making up one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageChain {
    components: Vec<MessageComponent>,
}

impl MessageChain {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn plain(mut self, text: impl Into<String>) -> Self {
        self.components.push(MessageComponent::plain(text));
        self
    }

    #[must_use]
    pub fn at(mut self, user_id: impl Into<String>) -> Self {
        self.components.push(MessageComponent::at(user_id));
        self
    }

    #[must_use]
    pub fn image(mut self, source: ImageSource) -> Self {
        self.components.push(MessageComponent::image(source));
        self
    }

    #[must_use]
    pub fn reply(mut self, referenced_message_id: impl Into<String>) -> Self {
        self.components
            .push(MessageComponent::reply(referenced_message_id));
        self
    }

    pub fn push(&mut self, component: MessageComponent) {
        self.components.push(component);
    }

    pub fn components(&self) -> &[MessageComponent] {
        &self.components
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageComponent> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Concatenation of every `Plain` span, in order.
    pub fn plain_text(&self) -> String {
        self.components
            .iter()
            .filter_map(|c| match c {
                MessageComponent::Plain { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<MessageComponent>> for MessageChain {
    fn from(components: Vec<MessageComponent>) -> Self {
        Self { components }
    }
}

impl FromIterator<MessageComponent> for MessageChain {
    fn from_iter<I: IntoIterator<Item = MessageComponent>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MessageChain {
    type Item = MessageComponent;
    type IntoIter = std::vec::IntoIter<MessageComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageChain {
    type Item = &'a MessageComponent;
    type IntoIter = std::slice::Iter<'a, MessageComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

// ── Envelope ────────────────────────────────────────────────────────────────

/// Direct (one-to-one) or group conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    Direct,
    Group,
}

/// Author of an inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub user_id: String,
    pub nickname: String,
}

/// Opaque platform message, carried through for later use (e.g. replying).
#[derive(Clone)]
pub struct RawHandle(Arc<dyn Any + Send + Sync>);

impl RawHandle {
    pub fn new<T: Any + Send + Sync>(raw: T) -> Self {
        Self(Arc::new(raw))
    }

    /// Borrow the platform object if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawHandle(..)")
    }
}

/// Origin metadata for an inbound message, independent of its content.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub kind: ConversationKind,
    /// Guild/community ID, empty for direct conversations.
    pub group_id: String,
    pub sender: Sender,
    pub self_id: String,
    /// Channel/conversation ID outbound replies are addressed to.
    pub session_id: String,
    pub message_id: String,
    /// Raw message text as received.
    pub message_str: String,
    #[serde(skip)]
    pub raw: RawHandle,
}

/// Static description of a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformMetadata {
    pub name: String,
    pub description: String,
    /// The bot's own user ID on the platform, empty until known.
    pub id: String,
}
