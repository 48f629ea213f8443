//! Inventory item entity - Represents an active asset in stock.
//!
//! Items live in this table until they are archived; archiving moves the
//! row into `inventory_archive` inside a single database transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable item name (e.g., "Laptop", "Projector")
    pub name: String,
    /// Category for organization (e.g., "electronics", "furniture")
    pub category: String,
    /// Quantity currently on hand
    pub quantity: i64,
    /// Unit of measure (e.g., "pcs", "box")
    pub unit: String,
    /// Physical storage location
    pub location: String,
    /// Free-form status (e.g., "available", "in repair")
    pub status: String,
    /// Quantity at or below which the item counts as low stock
    pub stock_threshold: i64,
    /// When the item was created
    pub created_at: DateTimeUtc,
    /// When the item was last modified
    pub updated_at: DateTimeUtc,
}

/// Active items have no relations; their archive counterpart is a copy,
/// not a foreign-key link, because the two rows never coexist.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
