use actix_web::{web, HttpResponse, Responder};

use crate::db::AppState;
use crate::posting::models::PostRequest;
use crate::ApiResponse;

async fn submit(data: web::Data<AppState>, req: PostRequest, is_update: bool) -> HttpResponse {
    match data.post_handler.handle(req, is_update).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(result)),
        Err(e) => {
            log::debug!("Post request rejected: {}", e);
            e.into()
        }
    }
}

#[utoipa::path(
    tag = "Post Connector",
    post,
    path = "/posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post created", body = ApiResponse),
        (status = 400, description = "Validation failed or featured image could not be downloaded", body = ApiResponse),
        (status = 500, description = "Post could not be stored", body = ApiResponse)
    )
)]
pub async fn create_post(
    req: web::Json<PostRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    log::info!("Executing create_post handler");
    submit(data, req.into_inner(), false).await
}

#[utoipa::path(
    tag = "Post Connector",
    post,
    path = "/posts/update",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse),
        (status = 400, description = "Validation failed or featured image could not be downloaded", body = ApiResponse),
        (status = 404, description = "Post not found", body = ApiResponse),
        (status = 500, description = "Post could not be stored", body = ApiResponse)
    )
)]
pub async fn update_post(
    req: web::Json<PostRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    log::info!("Executing update_post handler");
    submit(data, req.into_inner(), true).await
}
