use {async_trait::async_trait, serde::Serialize};

use crate::{
    Result,
    message::{Envelope, MessageChain, PlatformMetadata},
};

/// Sink for translated inbound messages, implemented by the host framework.
#[async_trait]
pub trait ChannelEventSink: Send + Sync {
    /// Hand one translated message to the host. Called once per inbound
    /// message; the translator does not wait on any downstream handling.
    async fn commit(&self, envelope: Envelope, chain: MessageChain);
}

/// Core channel plugin trait. Each messaging platform implements this.
#[async_trait]
pub trait ChannelPlugin: Send + Sync {
    /// Channel identifier (e.g. "discord").
    fn id(&self) -> &str;

    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Metadata for one running account.
    fn meta(&self, account_id: &str) -> PlatformMetadata;

    /// Start an account connection.
    async fn start_account(&mut self, account_id: &str, config: serde_json::Value) -> Result<()>;

    /// Stop an account connection.
    async fn stop_account(&mut self, account_id: &str) -> Result<()>;

    /// Get outbound adapter for sending messages.
    fn outbound(&self) -> Option<&dyn ChannelOutbound>;
}

/// Send canonical messages to a channel.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    /// Deliver `chain` to the conversation identified by `session_id`.
    ///
    /// Batches already sent stay sent if a later one fails or the call is
    /// cancelled; there is no rollback.
    async fn send_chain(
        &self,
        account_id: &str,
        session_id: &str,
        chain: &MessageChain,
    ) -> Result<DispatchReport>;
}

/// Result of one outbound batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Sent {
        message_id: String,
        text_len: usize,
        attachment_count: usize,
    },
    Failed {
        error: String,
        text_len: usize,
        attachment_count: usize,
    },
}

impl BatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Ordered per-batch results of one dispatch call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub batches: Vec<BatchOutcome>,
}

impl DispatchReport {
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn sent_count(&self) -> usize {
        self.batches.iter().filter(|b| b.is_sent()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.batches.len() - self.sent_count()
    }

    /// IDs of the platform messages that were created, in send order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.batches
            .iter()
            .filter_map(|b| match b {
                BatchOutcome::Sent { message_id, .. } => Some(message_id.as_str()),
                BatchOutcome::Failed { .. } => None,
            })
            .collect()
    }
}
