mod config;
mod db;
mod project;
mod routes;
mod services;
mod state;
mod store;

use crate::services::session::AdminCredentials;
use crate::store::Store;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");
    let admin = AdminCredentials::new(&config.admin_email, &config.admin_password);

    // Configuration guard: an absent DATABASE_URL selects demo mode; a
    // present one keeps the store configured even when the first connection
    // fails, so later calls can recover under their own timeout.
    let pool = match &config.database_url {
        Some(url) => match db::init_pool(url).await {
            Ok(pool) => {
                if let Err(error) = db::ensure_admin_user(&pool, &admin).await {
                    tracing::warn!(%error, "admin credential seed failed");
                }
                tracing::info!("hosted store connected");
                Some(pool)
            }
            Err(error) => {
                tracing::warn!(%error, "hosted store unreachable at startup — operations will fall back");
                Some(db::lazy_pool(url).expect("invalid DATABASE_URL"))
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set — running in demo mode with fallback data");
            None
        }
    };

    let store = Store::new(pool, config.store_timeout);
    let state = state::AppState::new(store, admin);

    let app = routes::app(state, &config.website_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "lightberry listening");
    axum::serve(listener, app).await.expect("server failed");
}
