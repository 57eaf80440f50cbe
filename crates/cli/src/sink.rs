//! Event sink used by `switchboard run`.

use {
    async_trait::async_trait,
    tracing::{info, warn},
};

use switchboard_channels::{ChannelEventSink, Envelope, MessageChain};

/// Logs each committed message and prints it to stdout as one JSON line.
pub struct LoggingSink;

/// One JSON object holding the envelope and its chain.
pub fn render_line(envelope: &Envelope, chain: &MessageChain) -> serde_json::Result<String> {
    serde_json::to_string(&serde_json::json!({
        "envelope": envelope,
        "chain": chain,
    }))
}

#[async_trait]
impl ChannelEventSink for LoggingSink {
    async fn commit(&self, envelope: Envelope, chain: MessageChain) {
        info!(
            session_id = %envelope.session_id,
            message_id = %envelope.message_id,
            sender = %envelope.sender.user_id,
            components = chain.len(),
            "inbound message committed"
        );
        match render_line(&envelope, &chain) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "failed to render inbound message"),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        switchboard_channels::{ConversationKind, RawHandle, Sender},
    };

    #[test]
    fn line_contains_envelope_and_tagged_chain() {
        let envelope = Envelope {
            kind: ConversationKind::Group,
            group_id: "1".into(),
            sender: Sender {
                user_id: "2".into(),
                nickname: "ann".into(),
            },
            self_id: "3".into(),
            session_id: "4".into(),
            message_id: "5".into(),
            message_str: "hi <@9>".into(),
            raw: RawHandle::new(()),
        };
        let chain = MessageChain::new().plain("hi ").at("9");

        let line = render_line(&envelope, &chain).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert!(!line.contains('\n'));
        assert_eq!(value["envelope"]["session_id"], "4");
        assert_eq!(value["envelope"]["sender"]["nickname"], "ann");
        assert_eq!(value["chain"][0]["type"], "plain");
        assert_eq!(value["chain"][1]["type"], "at");
        assert_eq!(value["chain"][1]["user_id"], "9");
        assert!(value["envelope"].get("raw").is_none());
    }
}
