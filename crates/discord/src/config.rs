use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Configuration for a single Discord bot account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordAccountConfig {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Drop messages authored by other bots, not just our own.
    pub ignore_bots: bool,

    /// Fetch replied-to messages that the gateway payload did not embed.
    pub resolve_replies: bool,

    /// Where remote images are downloaded before upload. Falls back to the
    /// global media directory, then the system temp dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl DiscordAccountConfig {
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for DiscordAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordAccountConfig")
            .field("token", &"[REDACTED]")
            .field("ignore_bots", &self.ignore_bots)
            .field("resolve_replies", &self.resolve_replies)
            .field("download_dir", &self.download_dir)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for DiscordAccountConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            ignore_bots: true,
            resolve_replies: true,
            download_dir: None,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = DiscordAccountConfig::default();
        assert!(cfg.ignore_bots);
        assert!(cfg.resolve_replies);
        assert!(cfg.download_dir.is_none());
        assert!(!cfg.has_token());
    }

    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "token": "MTIz.abc",
            "ignore_bots": false,
            "download_dir": "/srv/media"
        }"#;
        let cfg: DiscordAccountConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.token.expose_secret(), "MTIz.abc");
        assert!(!cfg.ignore_bots);
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/srv/media")));
        // defaults for unspecified fields
        assert!(cfg.resolve_replies);
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = DiscordAccountConfig {
            token: Secret::new("super-secret".into()),
            ..Default::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn whitespace_token_is_missing() {
        let cfg = DiscordAccountConfig {
            token: Secret::new("   ".into()),
            ..Default::default()
        };
        assert!(!cfg.has_token());
    }
}
