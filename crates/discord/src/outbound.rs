use std::{collections::VecDeque, path::PathBuf, sync::Arc, time::Duration};

use {
    async_trait::async_trait,
    serenity::http::Http,
    tracing::{debug, info, warn},
};

use {
    switchboard_channels::{
        BatchOutcome, ChannelOutbound, DispatchReport, ImageSource, MessageChain,
        MessageComponent,
    },
    switchboard_media::MediaDownloader,
};

use crate::{
    Error, Result,
    client::SerenityChannel,
    inbound::{MessageFetcher, ResolvedMessage},
    mention::mention_token,
    state::AccountStateMap,
};

/// Maximum characters per Discord message.
pub const DISCORD_MAX_MESSAGE_LEN: usize = 2000;

/// Maximum attachments per Discord message.
pub const DISCORD_MAX_ATTACHMENTS: usize = 10;

/// A chunk is only cut at a newline if at least this many characters precede it.
pub const SPLIT_MIN_LEN: usize = 1500;

/// Delay between consecutive batches of one dispatch.
pub const BATCH_PACING: Duration = Duration::from_secs(1);

/// A file ready to be attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFile {
    /// Local file, opened at send time.
    Path(PathBuf),
    /// Platform-side reference, handed to the channel unchanged.
    Opaque(String),
}

/// One platform send: a text slice and/or up to ten files.
///
/// Embeds are intentionally absent; they are a reserved extension point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundBatch {
    pub text: Option<String>,
    pub files: Vec<OutboundFile>,
}

/// Platform message created by a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub id: String,
}

/// Capability handle for one channel: send and fetch only.
#[async_trait]
pub trait ChannelHandle: MessageFetcher {
    fn channel_id(&self) -> &str;

    async fn send(&self, batch: OutboundBatch) -> Result<SentMessage>;
}

/// Caller knobs for [`Dispatcher::dispatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Skip the remaining batches after the first failed send.
    pub stop_on_error: bool,
}

/// Turns a [`MessageChain`] into one or more paced channel sends.
///
/// Holds no state between calls; concurrent dispatches to the same or
/// different channels are independent.
pub struct Dispatcher<'a> {
    channel: &'a dyn ChannelHandle,
    downloader: &'a dyn MediaDownloader,
    options: DispatchOptions,
}

/// Text and files accumulated from a chain, before batching.
#[derive(Debug, Default)]
struct Pending {
    text: String,
    files: VecDeque<OutboundFile>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(channel: &'a dyn ChannelHandle, downloader: &'a dyn MediaDownloader) -> Self {
        Self {
            channel,
            downloader,
            options: DispatchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Send `chain`, returning the outcome of every attempted batch in order.
    ///
    /// A chain with nothing sendable performs no sends and returns an empty
    /// report. Fails only when every attempted batch failed; partial success
    /// is reported, never rolled back.
    pub async fn dispatch(&self, chain: &MessageChain) -> Result<DispatchReport> {
        let channel_id = self.channel.channel_id();
        let pending = self.accumulate(chain).await;
        let mut files = pending.files;
        let mut rest = pending.text.as_str();
        let mut report = DispatchReport::default();
        let mut last_error = None;

        while !rest.is_empty() || !files.is_empty() {
            let (chunk, remainder) = split_text(rest, DISCORD_MAX_MESSAGE_LEN, SPLIT_MIN_LEN);
            // Whitespace-only tails are never sent.
            rest = if remainder.trim().is_empty() {
                ""
            } else {
                remainder
            };
            let take = files.len().min(DISCORD_MAX_ATTACHMENTS);
            let batch = OutboundBatch {
                text: (!chunk.trim().is_empty()).then(|| chunk.to_string()),
                files: files.drain(..take).collect(),
            };
            if batch.text.is_none() && batch.files.is_empty() {
                continue;
            }

            let text_len = batch.text.as_deref().map_or(0, |t| t.chars().count());
            let attachment_count = batch.files.len();
            let batch_no = report.batches.len() + 1;

            match self.channel.send(batch).await {
                Ok(sent) => {
                    debug!(
                        channel_id,
                        batch = batch_no,
                        message_id = %sent.id,
                        text_len,
                        attachment_count,
                        "discord batch sent"
                    );
                    report.batches.push(BatchOutcome::Sent {
                        message_id: sent.id,
                        text_len,
                        attachment_count,
                    });
                },
                Err(e) => {
                    warn!(
                        channel_id,
                        batch = batch_no,
                        text_len,
                        attachment_count,
                        error = %e,
                        "discord batch send failed"
                    );
                    report.batches.push(BatchOutcome::Failed {
                        error: e.to_string(),
                        text_len,
                        attachment_count,
                    });
                    last_error = Some(e.to_string());
                    if self.options.stop_on_error {
                        break;
                    }
                },
            }

            if !rest.is_empty() || !files.is_empty() {
                tokio::time::sleep(BATCH_PACING).await;
            }
        }

        if let Some(last_error) = last_error
            && report.sent_count() == 0
        {
            return Err(switchboard_channels::Error::Send {
                attempted: report.batches.len(),
                last_error,
            }
            .into());
        }
        Ok(report)
    }

    async fn accumulate(&self, chain: &MessageChain) -> Pending {
        let mut pending = Pending::default();
        // A span directly after a mention continues the same line.
        let mut after_mention = false;

        for component in chain {
            match component {
                MessageComponent::Plain { text } => {
                    if !after_mention && !pending.text.is_empty() && !pending.text.ends_with('\n')
                    {
                        pending.text.push('\n');
                    }
                    pending.text.push_str(text);
                    after_mention = false;
                },
                MessageComponent::At { user_id, .. } => {
                    pending.text.push_str(&mention_token(user_id));
                    after_mention = true;
                },
                MessageComponent::Reply {
                    referenced_message_id,
                    ..
                } => match self.channel.fetch_message(referenced_message_id).await {
                    Ok(quoted) => pending.text.insert_str(0, &format_quote(&quoted)),
                    Err(e) => debug!(
                        channel_id = self.channel.channel_id(),
                        referenced_message_id = %referenced_message_id,
                        error = %e,
                        "reply target unresolvable, skipping quote"
                    ),
                },
                MessageComponent::Image { source } => {
                    if let Some(file) = self.resolve_image(source).await {
                        pending.files.push_back(file);
                    }
                },
            }
        }

        if pending.text.trim().is_empty() {
            pending.text.clear();
        }
        pending
    }

    async fn resolve_image(&self, source: &ImageSource) -> Option<OutboundFile> {
        match source {
            ImageSource::LocalPath(path) => match tokio::fs::metadata(path).await {
                Ok(meta) if meta.is_file() => Some(OutboundFile::Path(path.clone())),
                Ok(_) => {
                    warn!(path = %path.display(), "image path is not a file, skipping");
                    None
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "local image unreadable, skipping");
                    None
                },
            },
            ImageSource::RemoteUrl(url) => match self.downloader.download(url).await {
                Ok(path) => Some(OutboundFile::Path(path)),
                Err(e) => {
                    warn!(url = %url, error = %e, "image download failed, skipping");
                    None
                },
            },
            ImageSource::OpaqueId(id) => Some(OutboundFile::Opaque(id.clone())),
        }
    }
}

/// Blockquote prepended for a resolved reply target, ending in a newline.
fn format_quote(quoted: &ResolvedMessage) -> String {
    let mut lines = quoted.content.lines();
    let mut out = format!("> **{}**", quoted.author_name);
    if let Some(first) = lines.next() {
        out.push_str(": ");
        out.push_str(first);
    }
    out.push('\n');
    for line in lines {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Split off the next chunk of at most `max_chars` characters.
///
/// Prefers cutting at the last newline inside the window, as long as at least
/// `min_chars` characters come before it; the newline itself is dropped.
/// Otherwise cuts exactly at `max_chars`.
pub fn split_text(text: &str, max_chars: usize, min_chars: usize) -> (&str, &str) {
    let Some((limit, _)) = text.char_indices().nth(max_chars) else {
        return (text, "");
    };
    let window = &text[..limit];
    if let Some(newline) = window.rfind('\n')
        && window[..newline].chars().count() >= min_chars
    {
        return (&text[..newline], &text[newline + 1..]);
    }
    (window, &text[limit..])
}

/// Send `chain` to the Discord channel `session_id` using a REST client.
pub async fn send_to_session(
    http: Arc<Http>,
    downloader: &dyn MediaDownloader,
    session_id: &str,
    chain: &MessageChain,
    options: DispatchOptions,
) -> Result<DispatchReport> {
    let channel = SerenityChannel::fetch(http, session_id).await?;
    Dispatcher::new(&channel, downloader)
        .with_options(options)
        .dispatch(chain)
        .await
}

/// Outbound sender for Discord accounts managed by the plugin.
pub struct DiscordOutbound {
    pub(crate) accounts: AccountStateMap,
}

impl DiscordOutbound {
    fn account_handles(&self, account_id: &str) -> Result<(Arc<Http>, Arc<dyn MediaDownloader>)> {
        let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
        accounts
            .get(account_id)
            .map(|s| (Arc::clone(&s.http), Arc::clone(&s.downloader)))
            .ok_or_else(|| switchboard_channels::Error::unknown_account(account_id).into())
    }
}

#[async_trait]
impl ChannelOutbound for DiscordOutbound {
    async fn send_chain(
        &self,
        account_id: &str,
        session_id: &str,
        chain: &MessageChain,
    ) -> switchboard_channels::Result<DispatchReport> {
        let (http, downloader) = self.account_handles(account_id)?;
        info!(
            account_id,
            channel_id = session_id,
            components = chain.len(),
            "discord outbound send start"
        );

        let report = send_to_session(
            http,
            downloader.as_ref(),
            session_id,
            chain,
            DispatchOptions::default(),
        )
        .await
        .map_err(|e: Error| {
            warn!(account_id, channel_id = session_id, error = %e, "discord outbound send failed");
            switchboard_channels::Error::from(e)
        })?;

        info!(
            account_id,
            channel_id = session_id,
            sent = report.sent_count(),
            failed = report.failed_count(),
            "discord outbound send done"
        );
        Ok(report)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::inbound::{MentionRecord, interleave_mentions},
        rstest::rstest,
        std::{path::Path, sync::Mutex},
        tokio::time::Instant,
    };

    #[derive(Default)]
    struct MockChannel {
        sent: Mutex<Vec<(OutboundBatch, Instant)>>,
        /// 1-based send attempts that fail.
        fail_on: Vec<usize>,
        attempts: Mutex<usize>,
        quoted: Option<ResolvedMessage>,
    }

    impl MockChannel {
        fn batches(&self) -> Vec<OutboundBatch> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(b, _)| b.clone())
                .collect()
        }

        fn send_times(&self) -> Vec<Instant> {
            self.sent.lock().unwrap().iter().map(|(_, t)| *t).collect()
        }
    }

    #[async_trait]
    impl MessageFetcher for MockChannel {
        async fn fetch_message(&self, _message_id: &str) -> Result<ResolvedMessage> {
            self.quoted
                .clone()
                .ok_or_else(|| Error::message("Unknown Message"))
        }
    }

    #[async_trait]
    impl ChannelHandle for MockChannel {
        fn channel_id(&self) -> &str {
            "42"
        }

        async fn send(&self, batch: OutboundBatch) -> Result<SentMessage> {
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                *attempts += 1;
                *attempts
            };
            if self.fail_on.contains(&attempt) {
                return Err(Error::message("Missing Permissions"));
            }
            self.sent.lock().unwrap().push((batch, Instant::now()));
            Ok(SentMessage {
                id: format!("m{attempt}"),
            })
        }
    }

    #[derive(Default)]
    struct MockDownloader {
        fail: bool,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaDownloader for MockDownloader {
        async fn download(&self, url: &str) -> switchboard_media::Result<PathBuf> {
            self.urls.lock().unwrap().push(url.to_string());
            if self.fail {
                return Err(switchboard_media::Error::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
            Ok(PathBuf::from(format!(
                "/tmp/dl/{}",
                url.rsplit('/').next().unwrap_or("x")
            )))
        }
    }

    fn opaque_images(n: usize) -> MessageChain {
        (0..n)
            .map(|i| MessageComponent::image(ImageSource::OpaqueId(format!("img{i}"))))
            .collect()
    }

    async fn dispatch(channel: &MockChannel, chain: &MessageChain) -> Result<DispatchReport> {
        let downloader = MockDownloader::default();
        Dispatcher::new(channel, &downloader).dispatch(chain).await
    }

    #[rstest]
    #[case("short", 2000, 1500, "short", "")]
    #[case("abcdef", 4, 2, "abcd", "ef")]
    #[case("ab\ncdef", 4, 2, "ab", "cdef")]
    #[case("a\nbcdef", 4, 2, "a\nbc", "def")]
    #[case("éééé", 2, 1, "éé", "éé")]
    fn split_text_cases(
        #[case] text: &str,
        #[case] max: usize,
        #[case] min: usize,
        #[case] head: &str,
        #[case] tail: &str,
    ) {
        assert_eq!(split_text(text, max, min), (head, tail));
    }

    #[tokio::test]
    async fn small_message_is_one_send() {
        let channel = MockChannel::default();
        let chain = MessageChain::new()
            .plain("hi ")
            .at("7")
            .image(ImageSource::OpaqueId("a".into()))
            .image(ImageSource::OpaqueId("b".into()));

        let report = dispatch(&channel, &chain).await.unwrap();

        assert_eq!(report.sent_count(), 1);
        assert_eq!(channel.batches(), [OutboundBatch {
            text: Some("hi <@7>".into()),
            files: vec![
                OutboundFile::Opaque("a".into()),
                OutboundFile::Opaque("b".into())
            ],
        }]);
    }

    #[tokio::test(start_paused = true)]
    async fn long_text_is_hard_split_at_limit() {
        let channel = MockChannel::default();
        let chain = MessageChain::new().plain("a".repeat(2500));

        let report = dispatch(&channel, &chain).await.unwrap();

        let batches = channel.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].text.as_deref().map(str::len), Some(2000));
        assert_eq!(batches[1].text.as_deref().map(str::len), Some(500));
        assert_eq!(report.batches.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn long_text_prefers_newline_past_threshold() {
        let channel = MockChannel::default();
        let text = format!("{}\n{}", "a".repeat(1600), "b".repeat(600));
        dispatch(&channel, &MessageChain::new().plain(text))
            .await
            .unwrap();

        let batches = channel.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].text, Some("a".repeat(1600)));
        assert_eq!(batches[1].text, Some("b".repeat(600)));
    }

    #[tokio::test(start_paused = true)]
    async fn newline_before_threshold_is_ignored() {
        let channel = MockChannel::default();
        let text = format!("{}\n{}", "a".repeat(1200), "b".repeat(1300));
        dispatch(&channel, &MessageChain::new().plain(text.clone()))
            .await
            .unwrap();

        let batches = channel.batches();
        assert_eq!(batches.len(), 2);
        let first = batches[0].text.clone().unwrap();
        assert_eq!(first.chars().count(), 2000);
        assert_eq!(format!("{first}{}", batches[1].text.clone().unwrap()), text);
    }

    #[tokio::test(start_paused = true)]
    async fn split_counts_characters_not_bytes() {
        let channel = MockChannel::default();
        dispatch(&channel, &MessageChain::new().plain("é".repeat(2001)))
            .await
            .unwrap();

        let batches = channel.batches();
        assert_eq!(batches[0].text.as_deref().map(|t| t.chars().count()), Some(2000));
        assert_eq!(batches[1].text.as_deref(), Some("é"));
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_tail_after_split_is_dropped_without_delay() {
        let channel = MockChannel::default();
        let start = Instant::now();

        let report = dispatch(
            &channel,
            &MessageChain::new().plain(format!("{}   \n ", "a".repeat(2000))),
        )
        .await
        .unwrap();

        assert_eq!(report.batches.len(), 1);
        assert_eq!(channel.batches()[0].text, Some("a".repeat(2000)));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn many_images_are_batched_in_order_with_pacing() {
        let channel = MockChannel::default();
        let start = Instant::now();

        let report = dispatch(&channel, &opaque_images(23)).await.unwrap();

        let batches = channel.batches();
        assert_eq!(
            batches.iter().map(|b| b.files.len()).collect::<Vec<_>>(),
            [10, 10, 3]
        );
        let order: Vec<OutboundFile> = batches.into_iter().flat_map(|b| b.files).collect();
        let expected: Vec<OutboundFile> = (0..23)
            .map(|i| OutboundFile::Opaque(format!("img{i}")))
            .collect();
        assert_eq!(order, expected);
        assert_eq!(report.message_ids(), ["m1", "m2", "m3"]);

        let times = channel.send_times();
        assert!(times.windows(2).all(|w| w[1] - w[0] >= BATCH_PACING));
        // No trailing delay after the last batch.
        assert!(start.elapsed() < BATCH_PACING * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn text_rides_along_with_first_attachment_batch() {
        let channel = MockChannel::default();
        let mut chain = MessageChain::new().plain("caption");
        for c in opaque_images(12) {
            chain.push(c);
        }

        dispatch(&channel, &chain).await.unwrap();

        let batches = channel.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].text.as_deref(), Some("caption"));
        assert_eq!(batches[0].files.len(), 10);
        assert_eq!(batches[1].text, None);
        assert_eq!(batches[1].files.len(), 2);
    }

    #[tokio::test]
    async fn empty_chain_sends_nothing() {
        let channel = MockChannel::default();
        let report = dispatch(&channel, &MessageChain::new()).await.unwrap();
        assert!(report.is_empty());
        assert!(channel.batches().is_empty());

        let report = dispatch(&channel, &MessageChain::new().plain("  \n "))
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn plain_spans_are_joined_by_newline() {
        let channel = MockChannel::default();
        let chain = MessageChain::new().plain("first").plain("second");
        dispatch(&channel, &chain).await.unwrap();
        assert_eq!(channel.batches()[0].text.as_deref(), Some("first\nsecond"));
    }

    #[tokio::test]
    async fn translated_mentions_render_back_to_original_text() {
        let channel = MockChannel::default();
        let text = "hello <@123> and <@456>, bye";
        let records = [
            MentionRecord {
                user_id: "123".into(),
                display_name: None,
            },
            MentionRecord {
                user_id: "456".into(),
                display_name: None,
            },
        ];
        let chain: MessageChain = interleave_mentions(text, &records).into();

        dispatch(&channel, &chain).await.unwrap();

        assert_eq!(channel.batches()[0].text.as_deref(), Some(text));
    }

    #[tokio::test]
    async fn reply_prepends_quote_to_current_text() {
        let channel = MockChannel {
            quoted: Some(ResolvedMessage {
                id: "9".into(),
                author_name: "bob".into(),
                content: "line one\nline two".into(),
                timestamp: 0,
            }),
            ..Default::default()
        };
        let chain = MessageChain::new().plain("before").reply("9").plain("after");

        dispatch(&channel, &chain).await.unwrap();

        assert_eq!(
            channel.batches()[0].text.as_deref(),
            Some("> **bob**: line one\n> line two\nbefore\nafter")
        );
    }

    #[tokio::test]
    async fn unresolvable_reply_adds_no_quote() {
        let channel = MockChannel::default();
        let chain = MessageChain::new().reply("404").plain("still sent");

        let report = dispatch(&channel, &chain).await.unwrap();

        assert_eq!(report.sent_count(), 1);
        assert_eq!(channel.batches()[0].text.as_deref(), Some("still sent"));
    }

    #[tokio::test]
    async fn remote_images_are_downloaded_and_failures_skipped() {
        let channel = MockChannel::default();
        let downloader = MockDownloader::default();
        let chain = MessageChain::new()
            .image(ImageSource::RemoteUrl("https://x.test/a.png".into()))
            .plain("text");

        Dispatcher::new(&channel, &downloader)
            .dispatch(&chain)
            .await
            .unwrap();

        assert_eq!(*downloader.urls.lock().unwrap(), ["https://x.test/a.png"]);
        assert_eq!(channel.batches()[0].files, [OutboundFile::Path(PathBuf::from(
            "/tmp/dl/a.png"
        ))]);

        let channel = MockChannel::default();
        let failing = MockDownloader {
            fail: true,
            ..Default::default()
        };
        Dispatcher::new(&channel, &failing)
            .dispatch(&chain)
            .await
            .unwrap();
        assert_eq!(channel.batches(), [OutboundBatch {
            text: Some("text".into()),
            files: Vec::new(),
        }]);
    }

    #[tokio::test]
    async fn local_images_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("cat.png");
        std::fs::write(&present, b"png").unwrap();
        let missing = dir.path().join("missing.png");

        let channel = MockChannel::default();
        let chain = MessageChain::new()
            .image(ImageSource::LocalPath(present.clone()))
            .image(ImageSource::LocalPath(missing))
            .image(ImageSource::LocalPath(dir.path().to_path_buf()));

        dispatch(&channel, &chain).await.unwrap();

        assert_eq!(channel.batches()[0].files, [OutboundFile::Path(present)]);
    }

    #[tokio::test]
    async fn only_unresolvable_images_sends_nothing() {
        let channel = MockChannel::default();
        let chain = MessageChain::new().image(ImageSource::LocalPath(
            Path::new("/definitely/not/here.png").to_path_buf(),
        ));
        let report = dispatch(&channel, &chain).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn partial_failure_is_reported_and_later_batches_continue() {
        let channel = MockChannel {
            fail_on: vec![2],
            ..Default::default()
        };

        let report = dispatch(&channel, &opaque_images(25)).await.unwrap();

        assert_eq!(report.batches.len(), 3);
        assert!(report.batches[0].is_sent());
        assert!(matches!(
            &report.batches[1],
            BatchOutcome::Failed { attachment_count: 10, error, .. } if error.contains("Missing Permissions")
        ));
        assert!(report.batches[2].is_sent());
        assert_eq!(channel.batches().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_on_error_skips_remaining_batches() {
        let channel = MockChannel {
            fail_on: vec![2],
            ..Default::default()
        };
        let downloader = MockDownloader::default();

        let report = Dispatcher::new(&channel, &downloader)
            .with_options(DispatchOptions {
                stop_on_error: true,
            })
            .dispatch(&opaque_images(25))
            .await
            .unwrap();

        assert_eq!(report.batches.len(), 2);
        assert_eq!(report.failed_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn every_batch_failing_is_a_send_error() {
        let channel = MockChannel {
            fail_on: vec![1, 2],
            ..Default::default()
        };

        let err = dispatch(&channel, &opaque_images(15)).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Channel(switchboard_channels::Error::Send { attempted: 2, .. })
        ));
    }

    #[test]
    fn quote_without_content_is_author_only() {
        let quoted = ResolvedMessage {
            id: "1".into(),
            author_name: "eve".into(),
            content: String::new(),
            timestamp: 0,
        };
        assert_eq!(format_quote(&quoted), "> **eve**\n");
    }
}
