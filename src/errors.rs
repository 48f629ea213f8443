//! Unified error types and result handling for `PictoIMS`.
//!
//! A single error enum covers the whole crate; the API layer maps each
//! variant onto an HTTP status code and a `{message, detail}` JSON body.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem, detected at startup.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// Request input failed validation before reaching persistence.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the invalid input
        message: String,
    },

    /// A uniqueness constraint would be violated (duplicate username/email).
    #[error("Conflict: {message}")]
    Conflict {
        /// Which field conflicted and with what
        message: String,
    },

    /// Credential or token verification failed.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Generic reason; never reveals which credential was wrong
        message: String,
    },

    /// Underlying `SeaORM`/`SQLx` failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Argon2 hashing or verification failed for a reason other than a
    /// simple mismatch (mismatches are reported as `Unauthorized`).
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// JWT encoding/decoding failed.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// I/O error (config file reads, socket binding).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation error with an owned message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a conflict error with an owned message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
