//! Media helpers: remote image download and MIME detection.

pub mod download;
pub mod error;
pub mod mime;

pub use {
    download::{HttpDownloader, MediaDownloader, download_by_url},
    error::{Error, Result},
};
