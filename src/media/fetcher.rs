//! Remote image download.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use sanitize_filename::sanitize;
use thiserror::Error;

use super::models::DownloadedImage;

#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("Failed to download image: invalid URL {0}")]
    InvalidUrl(String),
    #[error("Failed to download image: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to download image: server responded with {0}")]
    UnexpectedStatus(u16),
    #[error("Failed to download image: larger than {0} bytes")]
    TooLarge(u64),
    #[error("Failed to store downloaded image: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn download(&self, url: &str) -> Result<DownloadedImage, ImageFetchError>;
}

pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Downloads with a plain GET into the upload directory. No retries.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    upload_dir: PathBuf,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            upload_dir: upload_dir.into(),
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Base name of the URL path, made safe for the local filesystem.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let last = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())?;
    let decoded = urlencoding::decode(last)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| last.to_string());
    let name = sanitize(decoded);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn download(&self, url: &str) -> Result<DownloadedImage, ImageFetchError> {
        let parsed = Url::parse(url.trim()).map_err(|_| ImageFetchError::InvalidUrl(url.to_string()))?;
        let file_name =
            file_name_from_url(&parsed).ok_or_else(|| ImageFetchError::InvalidUrl(url.to_string()))?;

        log::debug!("Downloading featured image from {}", parsed);
        let mut response = self.client.get(parsed.clone()).send().await?;
        if response.status() != StatusCode::OK {
            log::warn!(
                "Featured image download from {} returned {}",
                parsed,
                response.status()
            );
            return Err(ImageFetchError::UnexpectedStatus(response.status().as_u16()));
        }
        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                log::warn!("Featured image at {} is {} bytes, refusing", parsed, length);
                return Err(ImageFetchError::TooLarge(self.max_bytes));
            }
        }

        // Content-Length may be absent or wrong.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                log::warn!("Featured image at {} exceeded {} bytes", parsed, self.max_bytes);
                return Err(ImageFetchError::TooLarge(self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let path = self.upload_dir.join(&file_name);
        tokio::fs::write(&path, &body).await?;
        log::info!("Saved featured image ({} bytes) to {}", body.len(), path.display());

        Ok(DownloadedImage { path })
    }
}
