//! Workspace and category endpoints.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;

use notemark_core::{
    Category, CreateCategoryRequest, CreateWorkspaceRequest, Workspace,
};

use crate::{require_user, ApiError, AppState};

pub async fn list_workspaces(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Workspace>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let workspaces = state.workspaces.list_for_owner(user.id).await?;
    Ok(Json(workspaces))
}

pub async fn create_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<Json<Workspace>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let workspace = state.workspaces.create(user.id, req).await?;
    Ok(Json(workspace))
}

pub async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<Vec<Category>>, ApiError> {
    require_user(&state, &headers).await?;
    let categories = state.categories.list_for_workspace(workspace_id).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<Uuid>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    require_user(&state, &headers).await?;
    let category = state.categories.create(workspace_id, req).await?;
    Ok(Json(category))
}
