//! Route metadata for the post endpoints.

use actix_web::http::Method;
use actix_web::web;

use super::handlers::{create_post, update_post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Create,
    Update,
}

/// One endpoint: where it lives, which methods it answers and what it does.
#[derive(Debug, Clone)]
pub struct PostRoute {
    pub path: String,
    pub methods: Vec<Method>,
    pub action: PostAction,
}

impl PostRoute {
    pub fn new(path: impl Into<String>, methods: Vec<Method>, action: PostAction) -> Self {
        Self {
            path: path.into(),
            methods,
            action,
        }
    }

    pub fn create() -> Self {
        Self::new("/posts", vec![Method::POST], PostAction::Create)
    }

    pub fn update() -> Self {
        Self::new("/posts/update", vec![Method::POST, Method::PUT], PostAction::Update)
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::create(), Self::update()]
    }
}

/// Registers `routes` under `namespace`, e.g. `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig, namespace: &str, routes: &[PostRoute]) {
    let mut scope = web::scope(namespace);
    for route in routes {
        let mut resource = web::resource(route.path.as_str());
        for method in &route.methods {
            let method_route = web::method(method.clone());
            resource = match route.action {
                PostAction::Create => resource.route(method_route.to(create_post)),
                PostAction::Update => resource.route(method_route.to(update_post)),
            };
        }
        log::debug!(
            "Registered {:?} at {}{} for {:?}",
            route.action,
            namespace,
            route.path,
            route.methods
        );
        scope = scope.service(resource);
    }
    cfg.service(scope);
}
