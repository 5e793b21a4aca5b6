//! AI enhancement endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use notemark_core::{validate, EnhanceRequestBody, Error};
use notemark_inference::normalize;

use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub result: String,
}

/// `POST /api/ai/enhance`
///
/// Validates the body, dispatches one model call, and maps any failure
/// through the normalizer so the client only ever sees the four-kind
/// taxonomy. No retries; the user retries by resubmitting.
pub async fn enhance(
    State(state): State<AppState>,
    Json(body): Json<EnhanceRequestBody>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            return Err(ApiError::TooManyRequests);
        }
    }

    let request = validate(&body).map_err(|err| match err {
        Error::Validation(violations) => ApiError::Validation(violations),
        other => ApiError::Internal(other),
    })?;

    debug!(action = %request.action, text_len = request.text.len(), "Enhancement requested");

    match state.enhance.enhance(&request).await {
        Ok(result) => Ok(Json(EnhanceResponse {
            result: result.text,
        })),
        Err(err) => Err(ApiError::Enhance(normalize(&err))),
    }
}
