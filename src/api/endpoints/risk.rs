//! Risk scoring endpoint.
//!
//! `POST /api/risk` validates the body with the same rules as the local
//! form and answers with the full assessment, or `400` with field errors.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::api::error::ApiError;
use crate::models::{RiskAssessment, RiskRequest};
use crate::scoring;
use crate::validation::validate_request;

/// `POST /api/risk`: score one submission.
pub async fn assess(
    payload: Result<Json<RiskRequest>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected risk request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let input = validate_request(&request)?;
    let assessment = scoring::assess(&input);

    tracing::info!(
        total = assessment.total,
        category = %assessment.category,
        "Risk assessed"
    );

    Ok(Json(assessment))
}
