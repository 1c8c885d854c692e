//! Public project routes.
//!
//! Nothing here requires auth, and nothing here fails past the store
//! boundary: the worst case for the public page is fallback data with an
//! error string attached.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::project::Project;
use crate::state::AppState;
use crate::store::StoreStatus;

#[derive(Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    /// `"live"` when served from the hosted store, `"fallback"` otherwise.
    pub source: &'static str,
    pub error: Option<String>,
}

pub(crate) fn source_label(used_fallback: bool) -> &'static str {
    if used_fallback { "fallback" } else { "live" }
}

/// `GET /api/projects` — list all projects, newest first. Always 200.
pub async fn list_projects(State(state): State<AppState>) -> Json<ProjectListResponse> {
    let outcome = state.store.list_projects().await;
    Json(ProjectListResponse {
        projects: outcome.data,
        source: source_label(outcome.used_fallback),
        error: outcome.error,
    })
}

/// `GET /api/projects/:id` — fetch one project.
pub async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Project>, StatusCode> {
    let outcome = state.store.get_project(&id).await;
    outcome.data.map(Json).ok_or(StatusCode::NOT_FOUND)
}

#[derive(Serialize)]
pub struct StatusResponse {
    /// `"live"` or `"demo"`.
    pub mode: &'static str,
    #[serde(flatten)]
    pub store: StoreStatus,
}

/// `GET /api/status` — connection diagnostics for the status badge.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let store = state.store.ping().await;
    let mode = if store.configured { "live" } else { "demo" };
    Json(StatusResponse { mode, store })
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
