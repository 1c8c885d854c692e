use super::*;
use crate::config::DEFAULT_ADMIN_EMAIL;
use crate::project::InvalidProject;
use crate::services::session::SessionUser;
use crate::state::test_helpers::{dead_state, demo_state};

fn auth() -> AuthUser {
    AuthUser {
        user: SessionUser { email: DEFAULT_ADMIN_EMAIL.to_owned() },
        token: "test-token".to_owned(),
    }
}

fn draft(title: &str, description: &str, visit_url: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_owned(),
        description: description.to_owned(),
        image_url: String::new(),
        visit_url: visit_url.to_owned(),
    }
}

// =============================================================================
// store_error_response
// =============================================================================

#[test]
fn error_mapping_invalid_is_400_with_message() {
    let (status, message) = store_error_response(StoreError::Invalid(InvalidProject::MissingTitle));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "title is required");
}

#[test]
fn error_mapping_not_found_is_404() {
    let (status, _) = store_error_response(StoreError::NotFound);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn error_mapping_unavailable_is_502() {
    let (status, message) = store_error_response(StoreError::Unavailable("boom".to_owned()));
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(message, "boom");
}

// =============================================================================
// CRUD handlers (demo mode)
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_record() {
    let state = demo_state();
    let (status, response) = create_project(
        State(state.clone()),
        auth(),
        Json(draft("Prism Garden", "Generative plant art.", "https://example.com/prism")),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response.0.title, "Prism Garden");
    assert!(!response.0.id.is_empty());

    let listed = list_projects(State(state), auth()).await;
    assert_eq!(listed.0.projects[0].id, response.0.id);
}

#[tokio::test]
async fn create_rejects_missing_fields_with_400() {
    let result = create_project(
        State(demo_state()),
        auth(),
        Json(draft("", "desc", "https://example.com/x")),
    )
    .await;
    let (status, message) = result.err().unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "title is required");
}

#[tokio::test]
async fn update_keeps_id_and_created_at() {
    let state = demo_state();
    let before = get_project(State(state.clone()), auth(), Path("2".to_owned()))
        .await
        .unwrap();
    let patch = ProjectPatch { title: Some("Quantum Todo 2".to_owned()), ..ProjectPatch::default() };
    let updated = update_project(State(state), auth(), Path("2".to_owned()), Json(patch))
        .await
        .unwrap();
    assert_eq!(updated.0.id, before.0.id);
    assert_eq!(updated.0.created_at, before.0.created_at);
    assert_eq!(updated.0.title, "Quantum Todo 2");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let patch = ProjectPatch { title: Some("x".to_owned()), ..ProjectPatch::default() };
    let result = update_project(State(demo_state()), auth(), Path("ghost".to_owned()), Json(patch)).await;
    assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let state = demo_state();
    delete_project(State(state.clone()), auth(), Path("5".to_owned()))
        .await
        .unwrap();
    let result = get_project(State(state), auth(), Path("5".to_owned())).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
    let result = delete_project(State(demo_state()), auth(), Path("ghost".to_owned())).await;
    assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn count_matches_list_length() {
    let state = demo_state();
    let count = count_projects(State(state.clone()), auth()).await;
    let listed = list_projects(State(state), auth()).await;
    assert_eq!(count.0.count, listed.0.projects.len());
}

// =============================================================================
// Unreachable live store
// =============================================================================

#[tokio::test]
async fn create_against_dead_store_is_502() {
    let result = create_project(
        State(dead_state()),
        auth(),
        Json(draft("Doomed", "desc", "https://example.com/doomed")),
    )
    .await;
    assert_eq!(result.err().map(|(status, _)| status), Some(StatusCode::BAD_GATEWAY));
}
