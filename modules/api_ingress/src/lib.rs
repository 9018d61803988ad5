//! HTTP ingress: merges module routers behind the shared middleware stack
//! and serves the health, OpenAPI and docs endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Build the top-level router.
///
/// `timeout` bounds every handler; `openapi` is served verbatim at `/openapi.json`.
pub fn build_router(
    config: &ApiIngressConfig,
    modules: Vec<Router>,
    openapi: utoipa::openapi::OpenApi,
    timeout: Duration,
) -> Router {
    tracing::debug!("Building ingress router for {} module(s)", modules.len());

    let mut router = Router::new()
        .route("/health", get(web::health_check))
        .route("/openapi.json", get(web::openapi_json));
    if config.enable_docs {
        router = router.route("/docs", get(web::serve_docs));
    }
    router = modules.into_iter().fold(router, |acc, m| acc.merge(m));
    router = router.layer(Extension(Arc::new(openapi)));

    // Each layer wraps everything added before it. Outermost to innermost:
    // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> Timeout -> CORS -> BodyLimit
    let x_request_id = request_id::header();

    router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));
    if config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router = router.layer(TimeoutLayer::new(timeout));
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}
