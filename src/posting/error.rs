use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::db::StoreError;
use crate::ApiResponse;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post ID is required for updating.")]
    MissingId,
    #[error("Post not found.")]
    NotFound,
    #[error("Missing required parameters.")]
    MissingParameters,
    #[error("Invalid post status.")]
    InvalidStatus,
    #[error("Date is required for future posts.")]
    MissingDate,
    #[error("Date for publish status must be a past date.")]
    InvalidDate,
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("A post with this title already exists.")]
    DuplicateTitle,
    #[error("{0}")]
    ImageDownloadFailed(String),
    #[error("Failed to register featured image: {0}")]
    AttachmentFailed(String),
    #[error("Failed to {} post.", persist_action(.is_update))]
    PersistFailed { is_update: bool },
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

fn persist_action(is_update: &bool) -> &'static str {
    if *is_update {
        "update"
    } else {
        "create"
    }
}

impl PostError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::AttachmentFailed(_)
            | PostError::PersistFailed { .. }
            | PostError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<PostError> for HttpResponse {
    fn from(error: PostError) -> Self {
        let status = error.status_code();
        HttpResponse::build(status).json(ApiResponse::error(status.as_u16(), &error.to_string()))
    }
}
