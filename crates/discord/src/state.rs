use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use {
    serenity::{gateway::ShardManager, http::Http},
    switchboard_media::MediaDownloader,
    tokio::task::JoinHandle,
};

use crate::config::DiscordAccountConfig;

/// Shared account state map.
pub type AccountStateMap = Arc<RwLock<HashMap<String, AccountState>>>;

/// Per-account runtime state.
pub struct AccountState {
    pub account_id: String,
    pub config: DiscordAccountConfig,
    pub http: Arc<Http>,
    /// Set once the gateway reports `ready`.
    pub bot_user_id: Option<u64>,
    pub shard_manager: Arc<ShardManager>,
    pub downloader: Arc<dyn MediaDownloader>,
    pub task: Option<JoinHandle<()>>,
}

/// Bot user ID of `account_id`, once known.
pub fn bot_user_id(accounts: &AccountStateMap, account_id: &str) -> Option<u64> {
    let accounts = accounts.read().unwrap_or_else(|e| e.into_inner());
    accounts.get(account_id).and_then(|s| s.bot_user_id)
}
