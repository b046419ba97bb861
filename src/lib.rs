use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{error, http::header, web, App, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};
use utoipa::openapi::server::Server;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod media;
pub mod posting;

pub use crate::config::AppConfig;
pub use crate::db::AppState;

use crate::posting::models::PostResult;

/// Envelope for every post endpoint response. `status` mirrors the HTTP code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    #[schema(example = 200)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PostResult>,
}

impl ApiResponse {
    pub fn success(data: PostResult) -> Self {
        Self {
            status: 200,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::posting::handlers::create_post,
        crate::posting::handlers::update_post
    ),
    components(
        schemas(
            posting::models::PostRequest,
            posting::models::PostResult,
            posting::models::PostStatus,
            ApiResponse,
        )
    ),
    tags(
        (name = "Post Connector", description = "Create and update posts from external publishers.")
    )
)]
pub struct ApiDoc;

/// OpenAPI document whose paths are served under `namespace`.
pub fn api_doc(namespace: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = if namespace.is_empty() { "/" } else { namespace };
    doc.servers = Some(vec![Server::new(base)]);
    doc
}

/// Turns body deserialization failures into the same envelope the handler uses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected malformed request body: {}", err);
        let response = HttpResponse::BadRequest().json(ApiResponse::error(
            400,
            &format!("Invalid request body: {}", err),
        ));
        error::InternalError::from_response(err, response).into()
    })
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let app_state = web::Data::new(AppState::new_with_config(config.clone())?);
    let routes = posting::routes::PostRoute::defaults();

    log::info!(
        "Starting server at http://{}:{}{}",
        config.host,
        config.port,
        config.api_namespace
    );

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let routes = routes.clone();
        let namespace = app_state.config.api_namespace.clone();

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .max_age(3600);
        for origin in &app_state.config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(app_state)
            .app_data(json_config())
            .configure(|cfg| posting::routes::configure(cfg, &namespace, &routes))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", api_doc(&namespace)),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
