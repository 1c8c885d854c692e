//! Admin session and credential management.
//!
//! ARCHITECTURE
//! ============
//! Two backends behind one API. With the hosted store configured, credentials
//! live in `admin_users` and sessions in `sessions`, both reached under the
//! store timeout. Without it, the demo credential pair from the environment
//! is checked directly and sessions live in an in-memory map with the same
//! expiry rules. Callers cannot tell the modes apart.

use std::fmt::Write;
use std::time::Duration;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::state::AppState;
use crate::store::run_with_timeout;

pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("auth backend unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// SHA-256 hex digest of a password. Credentials are compared hash-to-hash
/// in both backends.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Lowercased, trimmed email. Returns `None` for anything not shaped like
/// an address.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Some(normalized),
        _ => None,
    }
}

/// Admin credential pair the demo backend validates against. In configured
/// mode the same pair is seeded into `admin_users` at startup.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: normalize_email(email).unwrap_or_else(|| email.trim().to_ascii_lowercase()),
            password_hash: hash_password(password),
        }
    }
}

/// User attached to a validated session.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    pub email: String,
}

/// In-memory session entry for demo mode.
#[derive(Debug, Clone)]
pub struct LocalSession {
    pub user: SessionUser,
    pub expires_at: OffsetDateTime,
}

fn session_expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + SESSION_TTL
}

// =============================================================================
// LOGIN / VALIDATE / LOGOUT
// =============================================================================

/// Verify a credential pair and mint a session token.
///
/// # Errors
///
/// `InvalidCredentials` on a bad pair, `Unavailable` when the configured
/// auth backend cannot answer within the store timeout.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<String, AuthError> {
    let Some(email) = normalize_email(email) else {
        return Err(AuthError::InvalidCredentials);
    };
    let password_hash = hash_password(password);

    if let Some(pool) = state.store.pool() {
        return login_hosted(state, pool, &email, &password_hash).await;
    }

    if email != state.admin.email || password_hash != state.admin.password_hash {
        return Err(AuthError::InvalidCredentials);
    }

    let token = generate_token();
    let entry = LocalSession { user: SessionUser { email }, expires_at: session_expiry() };
    state.sessions.write().await.insert(token.clone(), entry);
    Ok(token)
}

async fn login_hosted(state: &AppState, pool: &PgPool, email: &str, password_hash: &str) -> Result<String, AuthError> {
    let bound = state.store.timeout();

    let matched = run_with_timeout(
        "verify_credentials",
        bound,
        sqlx::query_scalar::<_, String>("SELECT email FROM admin_users WHERE email = $1 AND password_hash = $2")
            .bind(email)
            .bind(password_hash)
            .fetch_optional(pool),
    )
    .await
    .map_err(AuthError::Unavailable)?;

    if matched.is_none() {
        return Err(AuthError::InvalidCredentials);
    }

    let token = generate_token();
    run_with_timeout(
        "create_session",
        bound,
        sqlx::query("INSERT INTO sessions (token, email) VALUES ($1, $2)")
            .bind(&token)
            .bind(email)
            .execute(pool),
    )
    .await
    .map_err(AuthError::Unavailable)?;
    Ok(token)
}

/// Resolve a session token to its user. `None` for unknown or expired
/// tokens.
///
/// # Errors
///
/// `Unavailable` when the configured backend cannot answer.
pub async fn validate(state: &AppState, token: &str) -> Result<Option<SessionUser>, AuthError> {
    if token.is_empty() {
        return Ok(None);
    }

    if let Some(pool) = state.store.pool() {
        let email = run_with_timeout(
            "validate_session",
            state.store.timeout(),
            sqlx::query_scalar::<_, String>("SELECT email FROM sessions WHERE token = $1 AND expires_at > now()")
                .bind(token)
                .fetch_optional(pool),
        )
        .await
        .map_err(AuthError::Unavailable)?;
        return Ok(email.map(|email| SessionUser { email }));
    }

    let mut sessions = state.sessions.write().await;
    match sessions.get(token) {
        Some(entry) if entry.expires_at > OffsetDateTime::now_utc() => Ok(Some(entry.user.clone())),
        Some(_) => {
            sessions.remove(token);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Drop a session. Unknown tokens are a no-op.
pub async fn logout(state: &AppState, token: &str) {
    if let Some(pool) = state.store.pool() {
        let result = run_with_timeout(
            "delete_session",
            state.store.timeout(),
            sqlx::query("DELETE FROM sessions WHERE token = $1")
                .bind(token)
                .execute(pool),
        )
        .await;
        if let Err(error) = result {
            tracing::warn!(%error, "session delete failed");
        }
        return;
    }

    state.sessions.write().await.remove(token);
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
