//! User entity - Represents application accounts.
//!
//! Each user has a unique username and email, an Argon2id password hash,
//! and a role drawn from a fixed allow-list (Admin/Manager/User). The hash
//! column is never serialized onto the API surface.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique case-insensitively
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email, unique case-insensitively
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id password hash with embedded salt. Hidden from API output.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role: `"Admin"`, `"Manager"`, or `"User"`
    pub role: String,
    /// Display name
    pub full_name: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the account was last modified
    pub updated_at: DateTimeUtc,
}

/// Users have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
