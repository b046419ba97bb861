#![allow(dead_code)]

use std::sync::Arc;

use post_connector_server::db::{AppState, InMemoryContentStore};
use post_connector_server::media::{HttpImageFetcher, LocalMediaStore};
use post_connector_server::posting::models::PostRequest;
use post_connector_server::AppConfig;
use tempfile::TempDir;

pub const SITE_URL: &str = "https://blog.example.com";

/// App state over in-memory stores, downloading real HTTP into a temp dir.
pub struct TestApp {
    pub state: AppState,
    pub content: Arc<InMemoryContentStore>,
    pub media: Arc<LocalMediaStore>,
    pub upload_dir: TempDir,
}

pub fn setup_test_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
    let config = AppConfig {
        site_url: SITE_URL.to_string(),
        upload_dir: upload_dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let content = Arc::new(InMemoryContentStore::new(SITE_URL));
    let media = Arc::new(LocalMediaStore::new(SITE_URL));
    let fetcher = Arc::new(HttpImageFetcher::new(
        reqwest::Client::new(),
        upload_dir.path().to_path_buf(),
    ));

    let state = AppState::new_with_services(config, content.clone(), media.clone(), fetcher);

    TestApp {
        state,
        content,
        media,
        upload_dir,
    }
}

pub fn draft_request(title: &str) -> PostRequest {
    PostRequest {
        title: Some(title.to_string()),
        content: Some("<p>World</p>".to_string()),
        status: Some("draft".to_string()),
        author: Some(1),
        ..Default::default()
    }
}
