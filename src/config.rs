use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::media::DEFAULT_MAX_IMAGE_BYTES;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_API_NAMESPACE: &str = "/api/v1";
const DEFAULT_USER_AGENT: &str = "post-connector-server/0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL used to build permalinks and attachment URLs.
    pub site_url: String,
    /// Directory downloaded images are written to.
    pub upload_dir: PathBuf,
    pub api_namespace: String,
    pub allowed_origins: Vec<String>,
    pub user_agent: String,
    /// Featured images above this size are rejected.
    pub max_image_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            site_url: DEFAULT_SITE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            api_namespace: DEFAULT_API_NAMESPACE.to_string(),
            allowed_origins: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            Err(_) => defaults.port,
        };

        let max_image_bytes = match env::var("MAX_IMAGE_BYTES") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MAX_IMAGE_BYTES",
                    value,
                })?,
            Err(_) => defaults.max_image_bytes,
        };

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| {
            log::warn!("SITE_URL not set, using default {}", DEFAULT_SITE_URL);
            defaults.site_url.clone()
        });

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            site_url: normalize_base_url(&site_url),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            api_namespace: normalize_namespace(
                &env::var("API_NAMESPACE").unwrap_or(defaults.api_namespace),
            ),
            allowed_origins,
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            max_image_bytes,
        })
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn normalize_namespace(namespace: &str) -> String {
    let trimmed = namespace.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
