//! Attachment registration for files that already exist on local storage.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sanitize_filename::sanitize;
use thiserror::Error;

use super::models::{Attachment, AttachmentMetadata, AttachmentStatus};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("file {0} has no usable name")]
    InvalidFileName(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Registers the file as an attachment and returns its id.
    async fn upload(&self, file_path: &Path) -> Result<u64, MediaError>;
    async fn get(&self, id: u64) -> Option<Attachment>;
}

pub struct LocalMediaStore {
    site_url: String,
    attachments: RwLock<BTreeMap<u64, Attachment>>,
    next_id: AtomicU64,
}

impl LocalMediaStore {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: crate::config::normalize_base_url(site_url),
            attachments: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.attachments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.read().is_empty()
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, file_path: &Path) -> Result<u64, MediaError> {
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MediaError::InvalidFileName(file_path.display().to_string()))?;

        let mime_type = mime_guess::from_path(file_path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let file_meta = tokio::fs::metadata(file_path)
            .await
            .map_err(|source| MediaError::Io {
                path: file_path.display().to_string(),
                source,
            })?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let attachment = Attachment {
            id,
            title: sanitize(file_name),
            mime_type: mime_type.clone(),
            source_file: file_path.to_path_buf(),
            url: format!("{}/uploads/{}", self.site_url, urlencoding::encode(file_name)),
            status: AttachmentStatus::Inherit,
            parent_id: None,
            metadata: AttachmentMetadata {
                file: file_name.to_string(),
                filesize: file_meta.len(),
                mime_type,
            },
            created_at: Utc::now(),
        };

        log::info!(
            "Registered attachment {} ({}, {} bytes)",
            id,
            attachment.mime_type,
            attachment.metadata.filesize
        );
        self.attachments.write().insert(id, attachment);
        Ok(id)
    }

    async fn get(&self, id: u64) -> Option<Attachment> {
        self.attachments.read().get(&id).cloned()
    }
}
