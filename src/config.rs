//! Runtime configuration parsed from environment variables.
//!
//! Missing `DATABASE_URL` is not an error: the site runs in demo mode
//! against the local fallback data.

use std::path::PathBuf;
use std::time::Duration;

use crate::store::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_WEBSITE_DIR: &str = "website";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid STORE_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Hosted-store connection string. `None` selects demo mode.
    pub database_url: Option<String>,
    /// Upper-bound wait for any single hosted-store operation.
    pub store_timeout: Duration,
    pub admin_email: String,
    pub admin_password: String,
    /// Directory the public site is served from.
    pub website_dir: PathBuf,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: absent or blank selects demo mode
    /// - `STORE_TIMEOUT_SECS`: default 5
    /// - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: default demo pair
    /// - `WEBSITE_DIR`: default `website/`
    ///
    /// # Errors
    ///
    /// Returns an error when `PORT` or `STORE_TIMEOUT_SECS` are present but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        let timeout_secs = match std::env::var("STORE_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let admin_email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_owned());
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_owned());

        let website_dir = std::env::var("WEBSITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_WEBSITE_DIR));

        Ok(Self {
            port,
            database_url,
            store_timeout: Duration::from_secs(timeout_secs),
            admin_email,
            admin_password,
            website_dir,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
