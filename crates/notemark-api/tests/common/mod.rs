//! Shared fixtures for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use notemark_api::{app, AppState};
use notemark_core::{EventBus, Profile};
use notemark_db::test_support::{
    MemoryCategoryRepository, MemoryIdentityProvider, MemoryNoteRepository,
    MemoryVersionRepository, MemoryWorkspaceRepository,
};
use notemark_inference::{EnhanceService, MockGenerationBackend};

/// Token pre-registered for [`test_profile`].
pub const TEST_TOKEN: &str = "test-session-token";

pub fn test_profile() -> Profile {
    Profile {
        id: Uuid::from_u128(1),
        email: "tester@example.com".to_string(),
        display_name: Some("Tester".to_string()),
        avatar_url: None,
        created_at: Utc::now(),
    }
}

/// App state over in-memory collaborators and the given mock backend.
pub fn test_state(backend: MockGenerationBackend) -> AppState {
    AppState {
        notes: Arc::new(MemoryNoteRepository::new()),
        workspaces: Arc::new(MemoryWorkspaceRepository::new()),
        categories: Arc::new(MemoryCategoryRepository::new()),
        versions: Arc::new(MemoryVersionRepository::new()),
        identity: Arc::new(
            MemoryIdentityProvider::new()
                .with_user(TEST_TOKEN, test_profile())
                .with_code("valid-code", test_profile()),
        ),
        enhance: EnhanceService::new(Arc::new(backend)),
        event_bus: EventBus::default(),
        rate_limiter: None,
    }
}

pub fn test_app(backend: MockGenerationBackend) -> Router {
    app(test_state(backend))
}

/// One request against the router; returns status and parsed JSON body.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
