//! Session endpoints: code exchange, current user, sign-out.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use notemark_core::{Profile, Session};

use crate::{require_user, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub code: String,
}

/// `POST /api/auth/callback` — exchange a one-time authorization code for
/// a session token.
pub async fn callback(
    State(state): State<AppState>,
    Json(req): Json<CallbackRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.identity.exchange_authorization_code(&req.code).await?;
    Ok(Json(session))
}

/// `GET /api/auth/me` — the profile behind the bearer token.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(user))
}

/// `POST /api/auth/signout` — revoke the current session. Unknown tokens
/// are a no-op, so this always succeeds for well-formed requests.
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.identity.sign_out(token).await?;
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
