use super::{
    handlers::{classify, health},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use crate::config::Config;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Room left for multipart boundaries and part headers on top of the image.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config)?;
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/", get(health::ready))
        .route("/health", get(health::health_check))
        .route("/api/classify-image", post(classify::classify_image))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state);

    Ok(router)
}

/// Only the configured browser origin may call the API, with GET/POST and a
/// `Content-Type` header.
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = config.allowed_origin.parse().map_err(|e| {
        anyhow::anyhow!("Invalid CORS origin {}: {}", config.allowed_origin, e)
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
