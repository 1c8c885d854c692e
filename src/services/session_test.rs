use super::*;
use crate::config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use crate::state::test_helpers::demo_state;

// =============================================================================
// bytes_to_hex / generate_token
// =============================================================================

#[test]
fn bytes_to_hex_known_values() {
    assert_eq!(bytes_to_hex(&[]), "");
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// hash_password
// =============================================================================

#[test]
fn hash_password_is_deterministic() {
    assert_eq!(hash_password("admin123"), hash_password("admin123"));
}

#[test]
fn hash_password_differs_per_input() {
    assert_ne!(hash_password("admin123"), hash_password("admin124"));
}

#[test]
fn hash_password_is_sha256_hex() {
    let hash = hash_password("admin123");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Admin@Example.COM  ").as_deref(), Some("admin@example.com"));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert!(normalize_email("").is_none());
    assert!(normalize_email("no-at-sign").is_none());
    assert!(normalize_email("@example.com").is_none());
    assert!(normalize_email("user@").is_none());
    assert!(normalize_email("a@b@c").is_none());
}

// =============================================================================
// Demo-mode login / validate / logout
// =============================================================================

#[tokio::test]
async fn login_with_demo_credentials_mints_token() {
    let state = demo_state();
    let token = login(&state, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    assert_eq!(token.len(), 64);
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let state = demo_state();
    assert!(login(&state, "ADMIN@example.com", DEFAULT_ADMIN_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let state = demo_state();
    let err = login(&state, DEFAULT_ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let state = demo_state();
    let err = login(&state, "stranger@example.com", DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn validate_round_trip() {
    let state = demo_state();
    let token = login(&state, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    let user = validate(&state, &token).await.unwrap().unwrap();
    assert_eq!(user.email, DEFAULT_ADMIN_EMAIL);
}

#[tokio::test]
async fn validate_unknown_token_is_none() {
    let state = demo_state();
    assert!(validate(&state, "deadbeef").await.unwrap().is_none());
}

#[tokio::test]
async fn validate_empty_token_is_none() {
    let state = demo_state();
    assert!(validate(&state, "").await.unwrap().is_none());
}

#[tokio::test]
async fn validate_expired_session_is_none_and_purged() {
    let state = demo_state();
    let entry = LocalSession {
        user: SessionUser { email: DEFAULT_ADMIN_EMAIL.to_owned() },
        expires_at: OffsetDateTime::now_utc() - Duration::from_secs(1),
    };
    state.sessions.write().await.insert("stale".to_owned(), entry);

    assert!(validate(&state, "stale").await.unwrap().is_none());
    assert!(!state.sessions.read().await.contains_key("stale"));
}

#[tokio::test]
async fn logout_drops_session() {
    let state = demo_state();
    let token = login(&state, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap();
    logout(&state, &token).await;
    assert!(validate(&state, &token).await.unwrap().is_none());
}

#[tokio::test]
async fn logout_unknown_token_is_noop() {
    let state = demo_state();
    logout(&state, "never-issued").await;
}

// =============================================================================
// Hosted mode with unreachable backend
// =============================================================================

#[tokio::test]
async fn hosted_login_reports_unavailable_backend() {
    let state = crate::state::test_helpers::dead_state();
    let err = login(&state, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unavailable(_)));
}
