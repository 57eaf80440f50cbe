use std::path::{Path, PathBuf};

use {async_trait::async_trait, tracing::debug};

use crate::{
    Error, Result,
    mime::{extension_for_mime, image_mime_from_name},
};

/// Fetches a remote file and returns where it was stored locally.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<PathBuf>;
}

/// [`MediaDownloader`] backed by a shared `reqwest` client, storing files in
/// one directory.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
    dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_client(reqwest::Client::new(), dir)
    }

    pub fn with_client(client: reqwest::Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    /// `<tmp>/switchboard-media`.
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("switchboard-media")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

#[async_trait]
impl MediaDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<PathBuf> {
        download_by_url(&self.client, url, &self.dir).await
    }
}

/// Download `url` into `dir` under a fresh `<uuid>.<ext>` name.
///
/// The extension comes from the response `Content-Type`, falling back to the
/// URL's file name.
pub async fn download_by_url(client: &reqwest::Client, url: &str, dir: &Path) -> Result<PathBuf> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::invalid_input(format!("not an http(s) url: {url}")));
    }

    let response = client.get(url).send().await.map_err(|source| Error::Http {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.bytes().await.map_err(|source| Error::Http {
        url: url.to_string(),
        source,
    })?;

    let ext = match content_type.as_deref().map(extension_for_mime) {
        Some(ext) if ext != "bin" => ext,
        _ => image_mime_from_name(url)
            .map(extension_for_mime)
            .unwrap_or("bin"),
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io(dir, e))?;
    let path = dir.join(format!("{}.{ext}", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| Error::io(&path, e))?;

    debug!(url, path = %path.display(), bytes = bytes.len(), "downloaded media");
    Ok(path)
}
