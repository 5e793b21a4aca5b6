//! notemark-api - HTTP API server for notemark.
//!
//! The router, shared state, and error mapping live here so integration
//! tests can drive the full HTTP surface with in-memory collaborators; the
//! binary in `main.rs` wires the PostgreSQL and Gemini implementations.

pub mod handlers;

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use governor::{Quota, RateLimiter};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use notemark_core::{
    CategoryRepository, EnhanceError, EventBus, IdentityProvider, NoteRepository, Profile,
    ValidationErrors, VersionRepository, WorkspaceRepository,
};
use notemark_inference::EnhanceService;

/// Maximum accepted request body size (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Global rate limiter type (direct quota, no keyed bucketing).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Build a global rate limiter; `None` disables limiting.
pub fn rate_limiter(per_minute: u32) -> Option<Arc<GlobalRateLimiter>> {
    let quota = NonZeroU32::new(per_minute)?;
    Some(Arc::new(RateLimiter::direct(Quota::per_minute(quota))))
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub workspaces: Arc<dyn WorkspaceRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub versions: Arc<dyn VersionRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub enhance: EnhanceService,
    /// Bus for the realtime note change feed (SSE consumers).
    pub event_bus: EventBus,
    /// Global rate limiter for the enhancement endpoint (None = disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ai/enhance", post(handlers::ai::enhance))
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route("/api/notes/count", get(handlers::notes::count_notes))
        .route("/api/notes/search", get(handlers::notes::search_notes))
        .route(
            "/api/notes/:id",
            get(handlers::notes::get_note)
                .patch(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .route(
            "/api/notes/:id/versions",
            get(handlers::notes::list_versions).post(handlers::notes::create_version),
        )
        .route(
            "/api/workspaces",
            get(handlers::workspaces::list_workspaces).post(handlers::workspaces::create_workspace),
        )
        .route(
            "/api/workspaces/:id/categories",
            get(handlers::workspaces::list_categories)
                .post(handlers::workspaces::create_category),
        )
        .route("/api/auth/callback", post(handlers::auth::callback))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/signout", post(handlers::auth::sign_out))
        .route("/api/events", get(handlers::events::subscribe))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::any())
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// AUTH EXTRACTION
// =============================================================================

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the request's bearer token to a user, or fail with 401.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<Profile, ApiError> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    state
        .identity
        .get_current_user(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// Per-field validation failure: 400 with structured details.
    Validation(ValidationErrors),
    /// Normalized enhancement failure: status comes from the normalizer.
    Enhance(EnhanceError),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    TooManyRequests,
    Internal(notemark_core::Error),
}

impl From<notemark_core::Error> for ApiError {
    fn from(err: notemark_core::Error) -> Self {
        match err {
            notemark_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            notemark_core::Error::NoteNotFound(_) | notemark_core::Error::WorkspaceNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            notemark_core::Error::Validation(violations) => ApiError::Validation(violations),
            notemark_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            notemark_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Validation Error",
                    "details": violations.0,
                }),
            ),
            ApiError::Enhance(err) => (
                StatusCode::from_u16(err.status_code)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                serde_json::json!({ "error": err.message }),
            ),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, serde_json::json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                serde_json::json!({ "error": "Too many requests" }),
            ),
            ApiError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": err.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
