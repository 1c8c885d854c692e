//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! API routes and the static public website share a single Axum router.
//! The site is served as files at `/`; the JSON API lives under `/api`.

pub mod admin;
pub mod auth;
pub mod projects;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/status", get(projects::status))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/admin/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route("/api/admin/projects/count", get(admin::count_projects))
        .route(
            "/api/admin/projects/{id}",
            get(admin::get_project)
                .patch(admin::update_project)
                .delete(admin::delete_project),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application router: JSON API plus the public website at `/`.
pub fn app(state: AppState, website_dir: &Path) -> Router {
    let website_service = ServeDir::new(website_dir).append_index_html_on_directories(true);
    api_routes(state).fallback_service(website_service)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
