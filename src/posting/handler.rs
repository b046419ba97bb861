//! Validation and orchestration for post create/update requests.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::db::{ContentStore, StoreError};
use crate::media::{ImageFetcher, MediaStore};

use super::error::PostError;
use super::models::{IntegrationFlag, PostRecord, PostRequest, PostResult, PostStatus};
use super::sanitize;

const NAIVE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

pub struct PostRequestHandler {
    content: Arc<dyn ContentStore>,
    media: Arc<dyn MediaStore>,
    images: Arc<dyn ImageFetcher>,
}

impl PostRequestHandler {
    pub fn new(
        content: Arc<dyn ContentStore>,
        media: Arc<dyn MediaStore>,
        images: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            content,
            media,
            images,
        }
    }

    /// Validates `request` and creates a post, or updates the post named by
    /// `request.id` when `is_update` is set.
    ///
    /// Checks run in a fixed order and the first failure is returned. Nothing
    /// is written before every check and the featured image download have
    /// succeeded. Attaching the thumbnail afterwards is best-effort.
    pub async fn handle(
        &self,
        request: PostRequest,
        is_update: bool,
    ) -> Result<PostResult, PostError> {
        let existing_id = if is_update {
            let id = request
                .id
                .filter(|id| *id > 0)
                .ok_or(PostError::MissingId)? as u64;
            if self.content.get(id).await?.is_none() {
                log::info!("Update rejected, post {} not found", id);
                return Err(PostError::NotFound);
            }
            Some(id)
        } else {
            None
        };

        let (title, content, status, author_id) = match (
            non_empty(&request.title).map(sanitize::plain_text),
            non_empty(&request.content),
            non_empty(&request.status),
            request.author.filter(|author| *author > 0),
        ) {
            (Some(title), Some(content), Some(status), Some(author))
                if !title.is_empty() =>
            {
                (title, content, status, author as u64)
            }
            _ => return Err(PostError::MissingParameters),
        };

        let status: PostStatus = status.parse()?;

        let date = non_empty(&request.date);
        let scheduled_for = match status {
            PostStatus::Future => {
                let raw = date.ok_or(PostError::MissingDate)?;
                Some(parse_post_date(raw)?)
            }
            PostStatus::Publish => {
                if let Some(raw) = date {
                    if parse_post_date(raw)? > Utc::now() {
                        return Err(PostError::InvalidDate);
                    }
                }
                None
            }
            PostStatus::Draft => None,
        };

        if !is_update && self.content.find_by_title(&title).await?.is_some() {
            log::info!("Create rejected, duplicate title {:?}", title);
            return Err(PostError::DuplicateTitle);
        }

        let attachment_id = match non_empty(&request.featured_image) {
            Some(url) => Some(self.attach_featured_image(url).await?),
            None => None,
        };

        let record = PostRecord {
            title,
            content: sanitize::post_html(content),
            status,
            date: scheduled_for.unwrap_or_else(Utc::now),
            author_id,
            categories: normalize_categories(request.category.unwrap_or_default()),
            tags: request
                .tag
                .unwrap_or_default()
                .iter()
                .map(|tag| sanitize::plain_text(tag))
                .filter(|tag| !tag.is_empty())
                .collect(),
            flag: IntegrationFlag::for_update(is_update),
        };

        let persisted = match existing_id {
            Some(id) => self.content.update(id, record).await,
            None => self.content.create(record).await,
        };
        let post_id = match persisted {
            Ok(id) => id,
            Err(StoreError::DuplicateTitle(title)) => {
                log::info!("Create rejected by store, duplicate title {:?}", title);
                return Err(PostError::DuplicateTitle);
            }
            Err(e) => {
                log::error!("Content store rejected post (update: {}): {}", is_update, e);
                return Err(PostError::PersistFailed { is_update });
            }
        };

        if let Some(attachment_id) = attachment_id {
            if let Err(e) = self.content.set_thumbnail(post_id, attachment_id).await {
                log::warn!(
                    "Failed to set attachment {} as thumbnail of post {}: {}",
                    attachment_id,
                    post_id,
                    e
                );
            }
        }

        // Already stored; fall back to the id URL.
        let post_url = match self.content.permalink(post_id).await {
            Ok(url) => url,
            Err(e) => {
                log::error!("Failed to resolve permalink of post {}: {}", post_id, e);
                self.content.shortlink(post_id)
            }
        };
        log::info!(
            "Post {} {} by integration ({})",
            post_id,
            if is_update { "updated" } else { "created" },
            status
        );

        Ok(PostResult { post_id, post_url })
    }

    async fn attach_featured_image(&self, url: &str) -> Result<u64, PostError> {
        let image = self.images.download(url).await.map_err(|e| {
            log::warn!("Featured image download failed for {}: {}", url, e);
            PostError::ImageDownloadFailed(e.to_string())
        })?;

        self.media.upload(&image.path).await.map_err(|e| {
            log::error!("Failed to register {} as attachment: {}", image.path.display(), e);
            PostError::AttachmentFailed(e.to_string())
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Positive ids only, first occurrence wins.
fn normalize_categories(ids: Vec<i64>) -> Vec<u64> {
    let mut categories: Vec<u64> = Vec::with_capacity(ids.len());
    for id in ids.into_iter().filter(|id| *id > 0).map(|id| id as u64) {
        if !categories.contains(&id) {
            categories.push(id);
        }
    }
    categories
}

/// Parses RFC 3339 or a naive `YYYY-MM-DD[ HH:MM[:SS]]` value. Naive values are UTC.
pub fn parse_post_date(raw: &str) -> Result<DateTime<Utc>, PostError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| PostError::InvalidDateFormat(raw.to_string()))
}
