//! Database connection and schema management.
//!
//! Tables are created from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the
//! Rust structs without hand-written SQL. On a fresh database the
//! bootstrap admin account is seeded so the API is reachable at all
//! (every other endpoint requires a bearer token).

use crate::config::Settings;
use crate::core::user::{self, CreateUserInput};
use crate::entities::{
    InventoryArchive, InventoryItem, RequisitionArchive, RequisitionForm, User,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema,
};
use tracing::{info, warn};

/// Connects to the database named by the settings.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Statements are issued
/// with `IF NOT EXISTS`, so rerunning on an existing database is harmless.
///
/// # Errors
/// Returns an error if any DDL statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(InventoryItem),
        schema.create_table_from_entity(InventoryArchive),
        schema.create_table_from_entity(RequisitionForm),
        schema.create_table_from_entity(RequisitionArchive),
    ];

    for mut statement in statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    Ok(())
}

/// Seeds the bootstrap admin account when the users table is empty and a
/// bootstrap password is configured. Does nothing otherwise.
///
/// # Errors
/// Returns an error if the count query or the insert fails.
pub async fn seed_admin_user(db: &DatabaseConnection, settings: &Settings) -> Result<()> {
    if User::find().count(db).await? > 0 {
        return Ok(());
    }

    let Some(password) = settings.admin_password.clone() else {
        warn!("Users table is empty and no bootstrap admin password is configured");
        return Ok(());
    };

    let admin = user::create_user(
        db,
        CreateUserInput {
            username: settings.admin_username.clone(),
            email: settings.admin_email.clone(),
            password,
            role: "Admin".to_string(),
            full_name: "Administrator".to_string(),
            phone: None,
        },
    )
    .await?;
    info!(username = %admin.username, "Seeded bootstrap admin user");
    Ok(())
}
