//! Application state and the content store.
//!
//! - `posts` - the `ContentStore` seam and its in-memory implementation

mod posts;

pub use posts::{ContentStore, InMemoryContentStore, StoreError};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::media::{HttpImageFetcher, ImageFetcher, LocalMediaStore, MediaStore};
use crate::posting::handler::PostRequestHandler;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub content: Arc<dyn ContentStore>,
    pub media: Arc<dyn MediaStore>,
    pub post_handler: Arc<PostRequestHandler>,
}

impl AppState {
    pub fn new_with_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent(config.user_agent.clone())
            .build()?;

        let content: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new(&config.site_url));
        let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(&config.site_url));
        let images: Arc<dyn ImageFetcher> = Arc::new(
            HttpImageFetcher::new(http_client, config.upload_dir.clone())
                .with_max_bytes(config.max_image_bytes),
        );

        Ok(Self::new_with_services(config, content, media, images))
    }

    /// Wires the handler over caller-supplied collaborators.
    pub fn new_with_services(
        config: AppConfig,
        content: Arc<dyn ContentStore>,
        media: Arc<dyn MediaStore>,
        images: Arc<dyn ImageFetcher>,
    ) -> Self {
        let post_handler = Arc::new(PostRequestHandler::new(
            content.clone(),
            media.clone(),
            images,
        ));

        AppState {
            config,
            content,
            media,
            post_handler,
        }
    }
}
