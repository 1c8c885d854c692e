//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool, enforce schema
//! migrations, and seed the admin credential. A failed eager connection does
//! not kill the process: the caller downgrades to a lazy pool and lets the
//! per-operation guard handle an absent database.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::services::session::AdminCredentials;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

/// Build a pool without touching the network. Used when the eager connection
/// fails so the store stays configured and each call can retry under its
/// own timeout.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub fn lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect_lazy(database_url)
}

/// Upsert the admin credential so the configured deployment accepts the same
/// login as demo mode.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub async fn ensure_admin_user(pool: &PgPool, admin: &AdminCredentials) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO admin_users (email, password_hash) VALUES ($1, $2)
         ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash",
    )
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .execute(pool)
    .await?;
    Ok(())
}
