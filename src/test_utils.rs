//! Shared test utilities for `PictoIMS`.
//!
//! This module provides common helper functions for setting up test
//! databases and building inputs with sensible defaults.

use crate::{
    core::{inventory::ItemInput, requisition::FormInput, user::CreateUserInput},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds an item input with sensible defaults.
///
/// # Defaults
/// * `category`: "general"
/// * `quantity`: 5
/// * `unit`: "pcs"
/// * `location`: "Main store"
/// * `status`: "available"
/// * `stock_threshold`: 10
pub fn test_item_input(name: &str) -> ItemInput {
    ItemInput {
        name: name.to_string(),
        category: "general".to_string(),
        quantity: 5,
        unit: "pcs".to_string(),
        location: "Main store".to_string(),
        status: "available".to_string(),
        stock_threshold: 10,
    }
}

/// Builds a requisition form input with empty workflow stages.
///
/// # Defaults
/// * `purpose`: "Office supplies"
/// * `status`: "pending"
/// * `date_requested`: now (filled on create)
pub fn test_form_input(requester: &str, department: &str) -> FormInput {
    FormInput {
        requester: requester.to_string(),
        department: department.to_string(),
        purpose: "Office supplies".to_string(),
        status: "pending".to_string(),
        date_requested: None,
        checked_by_name: None,
        checked_by_position: None,
        checked_date: None,
        approved_by_name: None,
        approved_by_position: None,
        approved_date: None,
        issued_by_name: None,
        issued_by_position: None,
        issued_date: None,
        received_by_name: None,
        received_by_position: None,
        received_date: None,
    }
}

/// Builds a user-creation input with sensible defaults.
///
/// # Defaults
/// * `email`: `{username}@example.com`
/// * `password`: "correct-horse"
/// * `role`: "User"
pub fn test_user_input(username: &str) -> CreateUserInput {
    CreateUserInput {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "correct-horse".to_string(),
        role: "User".to_string(),
        full_name: format!("{username} Example"),
        phone: None,
    }
}
