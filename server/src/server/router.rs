use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};

use super::api;
use crate::config::AppConfig;

/// Create the axum router with all routes.
pub fn create_router(config: &AppConfig) -> Router {
    Router::new()
        // --- Processing ---
        .route(
            "/process",
            post(api::process::process_upload).fallback(api::process::method_not_allowed),
        )
        // --- Middleware ---
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer())
}

/// CORS policy: any origin, `POST`/`OPTIONS`, `Content-Type` header.
///
/// `OPTIONS` requests are answered by the layer itself with an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
