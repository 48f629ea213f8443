//! User business logic - Handles account management.
//!
//! Users are the one entity without an archive: deletion is permanent.
//! Creation enforces the role allow-list, case-insensitive username/email
//! uniqueness, and a minimum password length; passwords are Argon2id-hashed
//! before anything touches the database. Updates are partial and only
//! re-validate uniqueness for fields that actually changed.

use crate::{
    core::auth,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, QueryOrder, Set,
    prelude::*,
    sea_query::{Expr, Func},
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Roles a user may hold. Anything else is rejected at validation time.
pub const ALLOWED_ROLES: [&str; 3] = ["Admin", "Manager", "User"];

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Fields for creating a user. The password arrives in the clear and is
/// hashed before storage; it is never persisted or echoed back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Raw password (hashed with Argon2id before storage)
    pub password: String,
    /// One of [`ALLOWED_ROLES`]
    pub role: String,
    /// Display name
    pub full_name: String,
    /// Optional contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial update for a user; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    /// New login name
    #[serde(default)]
    pub username: Option<String>,
    /// New contact email
    #[serde(default)]
    pub email: Option<String>,
    /// New raw password (re-hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
    /// New role
    #[serde(default)]
    pub role: Option<String>,
    /// New display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// New phone number (Some("") clears it)
    #[serde(default)]
    pub phone: Option<String>,
}

fn validate_role(role: &str) -> Result<()> {
    if ALLOWED_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "Role must be one of {ALLOWED_ROLES:?}, got '{role}'"
        )))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Case-insensitive existence check on a username, optionally excluding a
/// row (the row being updated).
async fn username_taken<C>(db: &C, username: &str, exclude_id: Option<i64>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut query = User::find().filter(
        Expr::expr(Func::lower(Expr::col(user::Column::Username))).eq(username.to_lowercase()),
    );
    if let Some(id) = exclude_id {
        query = query.filter(user::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

/// Case-insensitive existence check on an email, optionally excluding a row.
async fn email_taken<C>(db: &C, email: &str, exclude_id: Option<i64>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut query = User::find()
        .filter(Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(email.to_lowercase()));
    if let Some(id) = exclude_id {
        query = query.filter(user::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

/// Retrieves all users, ordered alphabetically by username.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by username, case-insensitively. Used by login.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Username))).eq(username.to_lowercase()),
        )
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new user account.
///
/// Field presence, role allow-list, and password length are checked before
/// any database access; uniqueness is checked before the insert. The
/// password is hashed with Argon2id (random salt) before storage.
///
/// # Errors
/// Returns `Validation` for malformed input, `Conflict` for a duplicate
/// username or email, or a database/hashing error.
pub async fn create_user(db: &DatabaseConnection, input: CreateUserInput) -> Result<user::Model> {
    let username = input.username.trim();
    let email = input.email.trim();

    if username.is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(Error::validation("A valid email address is required"));
    }
    if input.full_name.trim().is_empty() {
        return Err(Error::validation("Full name cannot be empty"));
    }
    validate_role(&input.role)?;
    validate_password(&input.password)?;

    if username_taken(db, username, None).await? {
        warn!(username, "Rejected duplicate username");
        return Err(Error::conflict(format!(
            "Username '{username}' is already taken"
        )));
    }
    if email_taken(db, email, None).await? {
        warn!(email, "Rejected duplicate email");
        return Err(Error::conflict(format!("Email '{email}' is already taken")));
    }

    let now = chrono::Utc::now();
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password(&input.password)?),
        role: Set(input.role),
        full_name: Set(input.full_name.trim().to_string()),
        phone: Set(input.phone),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(user_id = result.id, username = %result.username, "Created user");
    Ok(result)
}

/// Applies a partial update to a user.
///
/// Uniqueness is re-validated only for a username/email that actually
/// changed (case-insensitive comparison against the stored value). Returns
/// `Ok(None)` without mutating anything when the user does not exist.
///
/// # Errors
/// Returns `Validation`, `Conflict`, or a database/hashing error.
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    input: UpdateUserInput,
) -> Result<Option<user::Model>> {
    let Some(existing) = User::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    if let Some(role) = input.role.as_deref() {
        validate_role(role)?;
    }
    if let Some(password) = input.password.as_deref() {
        validate_password(password)?;
    }

    let mut model: user::ActiveModel = existing.clone().into();

    if let Some(username) = input.username.as_deref().map(str::trim) {
        if username.is_empty() {
            return Err(Error::validation("Username cannot be empty"));
        }
        if !username.eq_ignore_ascii_case(&existing.username)
            && username_taken(db, username, Some(user_id)).await?
        {
            return Err(Error::conflict(format!(
                "Username '{username}' is already taken"
            )));
        }
        model.username = Set(username.to_string());
    }

    if let Some(email) = input.email.as_deref().map(str::trim) {
        if email.is_empty() || !email.contains('@') {
            return Err(Error::validation("A valid email address is required"));
        }
        if !email.eq_ignore_ascii_case(&existing.email)
            && email_taken(db, email, Some(user_id)).await?
        {
            return Err(Error::conflict(format!("Email '{email}' is already taken")));
        }
        model.email = Set(email.to_string());
    }

    if let Some(password) = input.password.as_deref() {
        model.password_hash = Set(auth::hash_password(password)?);
    }
    if let Some(role) = input.role {
        model.role = Set(role);
    }
    if let Some(full_name) = input.full_name {
        if full_name.trim().is_empty() {
            return Err(Error::validation("Full name cannot be empty"));
        }
        model.full_name = Set(full_name.trim().to_string());
    }
    if let Some(phone) = input.phone {
        model.phone = Set(if phone.is_empty() { None } else { Some(phone) });
    }
    model.updated_at = Set(chrono::Utc::now());

    let updated = model.update(db).await?;
    info!(user_id, "Updated user");
    Ok(Some(updated))
}

/// Permanently deletes a user (users have no archive).
/// Returns `Ok(false)` when no user has this id.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<bool> {
    let result = User::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected > 0 {
        info!(user_id, "Deleted user");
        Ok(true)
    } else {
        warn!(user_id, "No user to delete");
        Ok(false)
    }
}

/// Deletes several users by id, returning how many rows were removed.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(db, user_ids))]
pub async fn delete_users(db: &DatabaseConnection, user_ids: &[i64]) -> Result<u64> {
    if user_ids.is_empty() {
        return Ok(0);
    }
    let result = User::delete_many()
        .filter(user::Column::Id.is_in(user_ids.iter().copied()))
        .exec(db)
        .await?;
    info!(count = result.rows_affected, "Bulk-deleted users");
    Ok(result.rows_affected)
}
