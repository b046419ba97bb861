//! Post storage: the `ContentStore` seam and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;

use crate::posting::models::{Post, PostRecord, PostStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {0} does not exist")]
    PostNotFound(u64),
    #[error("a post titled {0:?} already exists")]
    DuplicateTitle(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Post primitives the request handler depends on.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fails with `DuplicateTitle` when a post with the same title exists.
    async fn create(&self, record: PostRecord) -> Result<u64, StoreError>;
    async fn update(&self, id: u64, record: PostRecord) -> Result<u64, StoreError>;
    async fn get(&self, id: u64) -> Result<Option<Post>, StoreError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, StoreError>;
    async fn set_thumbnail(&self, post_id: u64, attachment_id: u64) -> Result<(), StoreError>;
    async fn permalink(&self, post_id: u64) -> Result<String, StoreError>;
    /// Id-based URL that needs no lookup.
    fn shortlink(&self, post_id: u64) -> String;
}

pub struct InMemoryContentStore {
    site_url: String,
    posts: RwLock<BTreeMap<u64, Post>>,
    next_id: AtomicU64,
}

impl InMemoryContentStore {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: crate::config::normalize_base_url(site_url),
            posts: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Inserts a post as-is, e.g. content that existed before this service.
    /// Later ids continue after the highest seeded id.
    pub fn seed(&self, post: Post) {
        self.next_id.fetch_max(post.id + 1, Ordering::SeqCst);
        self.posts.write().insert(post.id, post);
    }

    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }
}

/// First of `base`, `base-2`, `base-3`, ... not used by another post.
fn unique_slug(posts: &BTreeMap<u64, Post>, id: u64, base: &str) -> String {
    let taken = |slug: &str| posts.values().any(|post| post.id != id && post.slug == slug);
    if base.is_empty() || !taken(base) {
        return base.to_string();
    }
    (2u64..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_default()
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn create(&self, record: PostRecord) -> Result<u64, StoreError> {
        let mut posts = self.posts.write();
        if posts.values().any(|post| post.title == record.title) {
            return Err(StoreError::DuplicateTitle(record.title));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut post = Post::from_record(id, record, Utc::now());
        post.slug = unique_slug(&posts, id, &post.slug);
        posts.insert(id, post);
        log::debug!("Stored new post {}", id);
        Ok(id)
    }

    async fn update(&self, id: u64, record: PostRecord) -> Result<u64, StoreError> {
        let mut posts = self.posts.write();
        let mut post = posts.get(&id).cloned().ok_or(StoreError::PostNotFound(id))?;
        post.apply(record, Utc::now());
        post.slug = unique_slug(&posts, id, &post.slug);
        posts.insert(id, post);
        log::debug!("Updated post {}", id);
        Ok(id)
    }

    async fn get(&self, id: u64) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, StoreError> {
        Ok(self
            .posts
            .read()
            .values()
            .find(|post| post.title == title)
            .cloned())
    }

    async fn set_thumbnail(&self, post_id: u64, attachment_id: u64) -> Result<(), StoreError> {
        let mut posts = self.posts.write();
        let post = posts
            .get_mut(&post_id)
            .ok_or(StoreError::PostNotFound(post_id))?;
        post.thumbnail_id = Some(attachment_id);
        Ok(())
    }

    async fn permalink(&self, post_id: u64) -> Result<String, StoreError> {
        let posts = self.posts.read();
        let post = posts
            .get(&post_id)
            .ok_or(StoreError::PostNotFound(post_id))?;
        // Unpublished posts have no pretty URL yet.
        if post.status == PostStatus::Publish && !post.slug.is_empty() {
            Ok(format!("{}/{}/", self.site_url, post.slug))
        } else {
            Ok(self.shortlink(post.id))
        }
    }

    fn shortlink(&self, post_id: u64) -> String {
        format!("{}/?p={}", self.site_url, post_id)
    }
}
