//! Application settings loading.
//!
//! Settings come from an optional `picto-ims.toml` file with environment
//! variables taking precedence, so a bare deployment can run on env vars
//! alone. The `.env` file (if any) is loaded by `main` before this runs.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "picto-ims.toml";

/// Fallback JWT secret; good enough for local development only.
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Largest accepted retention window (100 years). Values beyond this
/// would overflow `chrono::Duration::days` when computing the cutoff.
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Complete application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address the API server binds to
    pub bind_addr: String,
    /// SeaORM connection URL
    pub database_url: String,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
    /// Initial requisition-archive retention window in days
    pub retention_days: i64,
    /// Bootstrap admin username, created when the users table is empty
    pub admin_username: String,
    /// Bootstrap admin email
    pub admin_email: String,
    /// Bootstrap admin password; when unset, no admin is seeded
    pub admin_password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_url: "sqlite://data/picto_ims.sqlite?mode=rwc".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 8,
            retention_days: 365,
            admin_username: "admin".to_string(),
            admin_email: "admin@localhost".to_string(),
            admin_password: None,
        }
    }
}

impl Settings {
    /// Token lifetime as a `chrono::Duration`.
    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }

    /// The initial retention policy derived from these settings.
    #[must_use]
    pub const fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            days: self.retention_days,
        }
    }
}

/// How long archived requisitions are kept before they may be purged.
/// Held in a [`crate::state::StateCell`] so it can be adjusted at runtime
/// through the maintenance endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    /// Retention window in days
    pub days: i64,
}

impl RetentionPolicy {
    /// The purge cutoff implied by this policy at time `now`: anything
    /// archived before the cutoff is eligible for deletion. `days` must be
    /// within `1..=MAX_RETENTION_DAYS`, which the settings loader and the
    /// maintenance endpoint both enforce before a policy is accepted.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days)
    }
}

/// Loads settings from a TOML file (when present) and applies environment
/// overrides on top.
///
/// # Errors
/// Returns a `Config` error if the file exists but cannot be read or
/// parsed, or if an override has the wrong shape.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let mut settings = if path.as_ref().exists() {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("Failed to read settings file: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse {SETTINGS_FILE}: {e}"),
        })?
    } else {
        Settings::default()
    };

    apply_env_overrides(&mut settings)?;

    if !(1..=MAX_RETENTION_DAYS).contains(&settings.retention_days) {
        return Err(Error::Config {
            message: format!(
                "retention_days must be between 1 and {MAX_RETENTION_DAYS}, got {}",
                settings.retention_days
            ),
        });
    }
    if settings.jwt_secret == DEV_JWT_SECRET {
        warn!("Running with the development JWT secret; set PICTOIMS_JWT_SECRET");
    }
    Ok(settings)
}

/// Loads settings from the default location.
///
/// # Errors
/// See [`load_settings`].
pub fn load_default_settings() -> Result<Settings> {
    load_settings(SETTINGS_FILE)
}

fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    if let Ok(addr) = std::env::var("PICTOIMS_BIND_ADDR") {
        settings.bind_addr = addr;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }
    if let Ok(secret) = std::env::var("PICTOIMS_JWT_SECRET") {
        settings.jwt_secret = secret;
    }
    if let Ok(hours) = std::env::var("PICTOIMS_TOKEN_TTL_HOURS") {
        settings.token_ttl_hours = hours.parse().map_err(|_| Error::Config {
            message: format!("PICTOIMS_TOKEN_TTL_HOURS must be an integer, got '{hours}'"),
        })?;
    }
    if let Ok(days) = std::env::var("PICTOIMS_RETENTION_DAYS") {
        settings.retention_days = days.parse().map_err(|_| Error::Config {
            message: format!("PICTOIMS_RETENTION_DAYS must be an integer, got '{days}'"),
        })?;
    }
    if let Ok(username) = std::env::var("PICTOIMS_ADMIN_USERNAME") {
        settings.admin_username = username;
    }
    if let Ok(email) = std::env::var("PICTOIMS_ADMIN_EMAIL") {
        settings.admin_email = email;
    }
    if let Ok(password) = std::env::var("PICTOIMS_ADMIN_PASSWORD") {
        settings.admin_password = Some(password);
    }
    Ok(())
}
