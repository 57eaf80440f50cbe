use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use {
    async_trait::async_trait,
    secrecy::ExposeSecret,
    serenity::Client,
    tracing::{info, warn},
};

use {
    switchboard_channels::{
        ChannelEventSink, ChannelOutbound, ChannelPlugin, Error as ChannelError, PlatformMetadata,
        Result,
    },
    switchboard_media::HttpDownloader,
};

use crate::{
    config::DiscordAccountConfig,
    handler::DiscordHandler,
    outbound::DiscordOutbound,
    state::{AccountState, AccountStateMap, bot_user_id},
};

/// Discord channel plugin.
pub struct DiscordPlugin {
    accounts: AccountStateMap,
    outbound: DiscordOutbound,
    event_sink: Option<Arc<dyn ChannelEventSink>>,
    default_download_dir: Option<PathBuf>,
}

impl DiscordPlugin {
    pub fn new() -> Self {
        let accounts: AccountStateMap = Arc::new(RwLock::new(HashMap::new()));
        let outbound = DiscordOutbound {
            accounts: Arc::clone(&accounts),
        };
        Self {
            accounts,
            outbound,
            event_sink: None,
            default_download_dir: None,
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn ChannelEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Download directory for accounts that do not set their own.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_download_dir = Some(dir.into());
        self
    }

    /// List all active account IDs.
    pub fn account_ids(&self) -> Vec<String> {
        let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
        accounts.keys().cloned().collect()
    }
}

impl Default for DiscordPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelPlugin for DiscordPlugin {
    fn id(&self) -> &str {
        "discord"
    }

    fn name(&self) -> &str {
        "Discord"
    }

    fn meta(&self, account_id: &str) -> PlatformMetadata {
        PlatformMetadata {
            name: "discord".into(),
            description: "Discord adapter".into(),
            id: bot_user_id(&self.accounts, account_id)
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    async fn start_account(&mut self, account_id: &str, config: serde_json::Value) -> Result<()> {
        let config: DiscordAccountConfig = serde_json::from_value(config)?;
        if !config.has_token() {
            return Err(ChannelError::invalid_input("discord bot token is required"));
        }
        let Some(event_sink) = self.event_sink.clone() else {
            return Err(ChannelError::unavailable("no event sink configured"));
        };
        if self
            .accounts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(account_id)
        {
            return Err(ChannelError::invalid_input(format!(
                "discord account {account_id} is already running"
            )));
        }

        info!(account_id, "starting discord account");

        let handler = DiscordHandler {
            account_id: account_id.to_string(),
            config: config.clone(),
            accounts: Arc::clone(&self.accounts),
            event_sink,
        };
        let mut client = Client::builder(config.token.expose_secret(), DiscordHandler::intents())
            .event_handler(handler)
            .await
            .map_err(crate::Error::from)?;

        let download_dir = config
            .download_dir
            .clone()
            .or_else(|| self.default_download_dir.clone())
            .unwrap_or_else(HttpDownloader::default_dir);

        // Registered before the gateway starts so `ready` finds the entry.
        {
            let mut accounts = self.accounts.write().unwrap_or_else(|e| e.into_inner());
            accounts.insert(account_id.to_string(), AccountState {
                account_id: account_id.to_string(),
                config,
                http: Arc::clone(&client.http),
                bot_user_id: None,
                shard_manager: Arc::clone(&client.shard_manager),
                downloader: Arc::new(HttpDownloader::new(download_dir)),
                task: None,
            });
        }

        let task_account = account_id.to_string();
        let task = tokio::spawn(async move {
            if let Err(e) = client.start().await {
                warn!(account_id = %task_account, error = %e, "discord gateway stopped");
            }
        });

        let mut accounts = self.accounts.write().unwrap_or_else(|e| e.into_inner());
        if let Some(state) = accounts.get_mut(account_id) {
            state.task = Some(task);
        }
        Ok(())
    }

    async fn stop_account(&mut self, account_id: &str) -> Result<()> {
        let state = {
            let mut accounts = self.accounts.write().unwrap_or_else(|e| e.into_inner());
            accounts.remove(account_id)
        };

        let Some(state) = state else {
            warn!(account_id, "discord account not found");
            return Ok(());
        };

        info!(account_id = %state.account_id, "stopping discord account");
        state.shard_manager.shutdown_all().await;
        if let Some(task) = state.task
            && let Err(e) = task.await
        {
            warn!(account_id, error = %e, "discord gateway task ended abnormally");
        }
        Ok(())
    }

    fn outbound(&self) -> Option<&dyn ChannelOutbound> {
        Some(&self.outbound)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        serde_json::json,
        switchboard_channels::{Envelope, MessageChain},
    };

    struct NullSink;

    #[async_trait]
    impl ChannelEventSink for NullSink {
        async fn commit(&self, _envelope: Envelope, _chain: MessageChain) {}
    }

    fn plugin() -> DiscordPlugin {
        DiscordPlugin::new().with_event_sink(Arc::new(NullSink))
    }

    #[test]
    fn identity() {
        let plugin = plugin();
        assert_eq!(plugin.id(), "discord");
        assert_eq!(plugin.name(), "Discord");
        assert!(plugin.outbound().is_some());
    }

    #[test]
    fn meta_before_ready_has_empty_id() {
        let meta = plugin().meta("main");
        assert_eq!(meta.name, "discord");
        assert_eq!(meta.description, "Discord adapter");
        assert_eq!(meta.id, "");
    }

    #[tokio::test]
    async fn start_requires_token() {
        let mut plugin = plugin();
        let err = plugin
            .start_account("main", json!({ "token": "  " }))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::InvalidInput { .. }));
        assert!(plugin.account_ids().is_empty());
    }

    #[tokio::test]
    async fn start_rejects_malformed_config() {
        let mut plugin = plugin();
        let err = plugin
            .start_account("main", json!({ "token": 5 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::SerdeJson(_)));
    }

    #[tokio::test]
    async fn start_requires_event_sink() {
        let mut plugin = DiscordPlugin::new();
        let err = plugin
            .start_account("main", json!({ "token": "abc" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn stop_unknown_account_is_noop() {
        let mut plugin = plugin();
        plugin.stop_account("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn send_to_unknown_account_fails() {
        let plugin = plugin();
        let outbound = plugin.outbound().unwrap();
        let err = outbound
            .send_chain("ghost", "123", &MessageChain::new().plain("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::UnknownAccount { account_id } if account_id == "ghost"));
    }
}
