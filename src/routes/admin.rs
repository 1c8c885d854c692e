//! Admin project-management routes. Every handler requires a valid session
//! via the [`AuthUser`](crate::routes::auth::AuthUser) extractor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::project::{Project, ProjectDraft, ProjectPatch};
use crate::routes::auth::AuthUser;
use crate::routes::projects::{ProjectListResponse, source_label};
use crate::state::AppState;
use crate::store::StoreError;

pub(crate) fn store_error_response(err: StoreError) -> (StatusCode, String) {
    match err {
        StoreError::Invalid(invalid) => (StatusCode::BAD_REQUEST, invalid.to_string()),
        StoreError::NotFound => (StatusCode::NOT_FOUND, "project not found".to_owned()),
        StoreError::Unavailable(error) => (StatusCode::BAD_GATEWAY, error),
    }
}

/// `GET /api/admin/projects` — full listing for the admin table.
pub async fn list_projects(State(state): State<AppState>, _auth: AuthUser) -> Json<ProjectListResponse> {
    let outcome = state.store.list_projects().await;
    Json(ProjectListResponse {
        projects: outcome.data,
        source: source_label(outcome.used_fallback),
        error: outcome.error,
    })
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// `GET /api/admin/projects/count` — dashboard counter.
pub async fn count_projects(State(state): State<AppState>, _auth: AuthUser) -> Json<CountResponse> {
    let outcome = state.store.count_projects().await;
    Json(CountResponse { count: outcome.data })
}

/// `GET /api/admin/projects/:id` — fetch one project for the edit form.
pub async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Project>, StatusCode> {
    let outcome = state.store.get_project(&id).await;
    outcome.data.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/admin/projects` — create a project.
pub async fn create_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(draft): Json<ProjectDraft>,
) -> Result<(StatusCode, Json<Project>), (StatusCode, String)> {
    let outcome = state
        .store
        .create_project(draft)
        .await
        .map_err(store_error_response)?;
    Ok((StatusCode::CREATED, Json(outcome.data)))
}

/// `PATCH /api/admin/projects/:id` — update fields; `id` and `created_at`
/// stay as they were.
pub async fn update_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>, (StatusCode, String)> {
    let outcome = state
        .store
        .update_project(&id, patch)
        .await
        .map_err(store_error_response)?;
    Ok(Json(outcome.data))
}

/// `DELETE /api/admin/projects/:id` — remove a project.
pub async fn delete_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state
        .store
        .delete_project(&id)
        .await
        .map_err(store_error_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
