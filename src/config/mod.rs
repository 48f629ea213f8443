/// Database connection, table creation, and admin bootstrap
pub mod database;

/// Application settings from `picto-ims.toml` and environment variables
pub mod settings;

pub use settings::{MAX_RETENTION_DAYS, RetentionPolicy, Settings};
