use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::PostError;
use super::params;

pub const META_CREATED_BY_INTEGRATION: &str = "created_by_integration";
pub const META_UPDATED_BY_INTEGRATION: &str = "updated_by_integration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Future,
    Publish,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Future => "future",
            PostStatus::Publish => "publish",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "future" => Ok(PostStatus::Future),
            "publish" => Ok(PostStatus::Publish),
            _ => Err(PostError::InvalidStatus),
        }
    }
}

/// Which path through the handler wrote the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationFlag {
    Created,
    Updated,
}

impl IntegrationFlag {
    pub fn for_update(is_update: bool) -> Self {
        if is_update {
            IntegrationFlag::Updated
        } else {
            IntegrationFlag::Created
        }
    }

    pub fn meta_key(&self) -> &'static str {
        match self {
            IntegrationFlag::Created => META_CREATED_BY_INTEGRATION,
            IntegrationFlag::Updated => META_UPDATED_BY_INTEGRATION,
        }
    }
}

/// Incoming parameter bag. Every field is optional at the wire level so the
/// handler can report missing or invalid values in its own order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostRequest {
    #[serde(default, deserialize_with = "params::optional_int")]
    #[schema(example = 42)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[serde(default)]
    #[schema(example = "<p>World</p>")]
    pub content: Option<String>,
    #[serde(default)]
    #[schema(example = "draft")]
    pub status: Option<String>,
    #[serde(default)]
    #[schema(example = "2026-01-01 09:00:00")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "params::optional_int")]
    #[schema(example = 1)]
    pub author: Option<i64>,
    #[serde(default, deserialize_with = "params::int_list")]
    pub category: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "params::string_list")]
    pub tag: Option<Vec<String>>,
    #[serde(default)]
    #[schema(example = "https://example.com/images/cover.jpg")]
    pub featured_image: Option<String>,
}

/// Normalized write model handed to the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub date: DateTime<Utc>,
    pub author_id: u64,
    pub categories: Vec<u64>,
    pub tags: Vec<String>,
    pub flag: IntegrationFlag,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    pub date: DateTime<Utc>,
    pub author_id: u64,
    pub categories: Vec<u64>,
    pub tags: Vec<String>,
    pub thumbnail_id: Option<u64>,
    pub meta: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Post {
    pub fn from_record(id: u64, record: PostRecord, now: DateTime<Utc>) -> Self {
        let mut meta = BTreeMap::new();
        meta.insert(record.flag.meta_key().to_string(), true);
        Self {
            id,
            slug: slugify(&record.title),
            title: record.title,
            content: record.content,
            status: record.status,
            date: record.date,
            author_id: record.author_id,
            categories: record.categories,
            tags: record.tags,
            thumbnail_id: None,
            meta,
            created_at: now,
            modified_at: now,
        }
    }

    /// Overwrites the editable fields; meta keys and the thumbnail survive.
    /// The slug follows the title until the post has been published.
    pub fn apply(&mut self, record: PostRecord, now: DateTime<Utc>) {
        self.meta.insert(record.flag.meta_key().to_string(), true);
        if self.status != PostStatus::Publish || self.slug.is_empty() {
            self.slug = slugify(&record.title);
        }
        self.title = record.title;
        self.content = record.content;
        self.status = record.status;
        self.date = record.date;
        self.author_id = record.author_id;
        self.categories = record.categories;
        self.tags = record.tags;
        self.modified_at = now;
    }

    pub fn has_flag(&self, flag: IntegrationFlag) -> bool {
        self.meta.get(flag.meta_key()).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResult {
    #[schema(example = 42)]
    pub post_id: u64,
    #[schema(example = "https://blog.example.com/hello/")]
    pub post_url: String,
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
