//! Risk API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → request log → handler

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the risk API router with a fresh context.
pub fn risk_api_router() -> Router {
    risk_api_router_with_ctx(ApiContext::new())
}

/// Build router from a pre-constructed `ApiContext`.
pub fn risk_api_router_with_ctx(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/risk", post(endpoints::risk::assess))
        .route("/ping", get(endpoints::ping::ping))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx);

    // Front ends are usually served from a different origin than the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::request_log::log_access))
        .layer(cors)
}
