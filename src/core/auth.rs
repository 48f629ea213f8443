//! Authentication - password hashing and bearer-token handling.
//!
//! Passwords are hashed with Argon2id and a random salt; the salt and
//! parameters travel inside the PHC hash string. Successful logins are
//! issued a signed, time-limited HS256 JWT carrying the user id, username,
//! and role as claims. There is no refresh flow and no revocation list: a
//! token is valid until it expires.

use crate::{
    core::user as user_service,
    entities::user,
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Claims carried by an issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    /// Username at time of issue
    pub username: String,
    /// Role at time of issue
    pub role: String,
    /// Expiry as a Unix timestamp (seconds)
    pub exp: i64,
}

/// Hashes a password with Argon2id and a freshly generated salt.
///
/// # Errors
/// Returns `PasswordHash` if the hasher fails (effectively never for
/// well-formed parameters).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Verifies a password against a stored PHC hash string.
///
/// # Errors
/// Returns `Unauthorized` on mismatch and `PasswordHash` if the stored
/// hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| Error::Unauthorized {
            message: "Invalid username or password".to_string(),
        })
}

/// Issues a signed HS256 token for a user, valid for `ttl` from now.
///
/// # Errors
/// Returns `Token` if encoding fails.
pub fn issue_token(user: &user::Model, secret: &str, ttl: chrono::Duration) -> Result<String> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        exp: (chrono::Utc::now() + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(Into::into)
}

/// Validates a token's signature and expiry and returns its claims.
///
/// # Errors
/// Returns `Token` for a tampered, malformed, or expired token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Verifies a username/password pair and, on success, returns a bearer
/// token together with the authenticated user.
///
/// Unknown usernames and wrong passwords produce the same `Unauthorized`
/// error so the endpoint cannot be used to probe for accounts.
///
/// # Errors
/// Returns `Unauthorized` on bad credentials, or a database/token error.
pub async fn login(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    secret: &str,
    ttl: chrono::Duration,
) -> Result<(String, user::Model)> {
    let Some(user) = user_service::get_user_by_username(db, username).await? else {
        warn!(username, "Login attempt for unknown username");
        return Err(Error::Unauthorized {
            message: "Invalid username or password".to_string(),
        });
    };

    verify_password(password, &user.password_hash).inspect_err(|_| {
        warn!(username, "Login attempt with wrong password");
    })?;

    let token = issue_token(&user, secret, ttl)?;
    info!(username, user_id = user.id, "Login succeeded");
    Ok((token, user))
}
