//! Liveness endpoint used by front ends to wake the server.

use axum::extract::State;
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::api::types::ApiContext;
use crate::models::PingStatus;

/// `GET /api/ping`: server clock and uptime. Never cached.
pub async fn ping(State(ctx): State<ApiContext>) -> Response {
    let status = PingStatus {
        now: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime_seconds: ctx.uptime_seconds(),
    };

    let mut response = Json(status).into_response();
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
