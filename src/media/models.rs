use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attachments are never listed on their own; they follow their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentStatus {
    Inherit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttachmentMetadata {
    #[schema(example = "cover.jpg")]
    pub file: String,
    #[schema(example = 52_431)]
    pub filesize: u64,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    #[schema(example = 7)]
    pub id: u64,
    #[schema(example = "cover.jpg")]
    pub title: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
    #[schema(value_type = String, example = "./uploads/cover.jpg")]
    pub source_file: PathBuf,
    #[schema(example = "https://blog.example.com/uploads/cover.jpg")]
    pub url: String,
    pub status: AttachmentStatus,
    pub parent_id: Option<u64>,
    pub metadata: AttachmentMetadata,
    pub created_at: DateTime<Utc>,
}

/// A file written to local storage by an `ImageFetcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    pub path: PathBuf,
}
