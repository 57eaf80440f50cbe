//! Config schema types.
use std::{collections::HashMap, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchboardConfig {
    pub channels: ChannelsConfig,
    pub media: MediaConfig,
}

/// Channel accounts, per platform, keyed by account ID.
///
/// Account tables stay untyped here; each channel plugin deserializes its own
/// account config when the account is started.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub discord: HashMap<String, serde_json::Value>,
}

/// Media handling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Where downloaded remote images are stored before upload.
    pub download_dir: Option<PathBuf>,
}
