//! Inventory archive entity - Soft-deleted inventory items.
//!
//! Rows are field-for-field copies of the active item at the moment of
//! archiving, plus metadata recording why, by whom, and when. `item_id`
//! holds the original active-table id; the archive row has its own key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Archived inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_archive")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the archive row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id the item had in the active table
    pub item_id: i64,
    /// Item name at time of archiving
    pub name: String,
    /// Category at time of archiving
    pub category: String,
    /// Quantity at time of archiving
    pub quantity: i64,
    /// Unit of measure at time of archiving
    pub unit: String,
    /// Location at time of archiving
    pub location: String,
    /// Status at time of archiving
    pub status: String,
    /// Stock threshold at time of archiving
    pub stock_threshold: i64,
    /// Why the item was archived (e.g., "damaged", "obsolete")
    pub archived_reason: String,
    /// Username of the actor who archived the item
    pub archived_by: String,
    /// When the item was archived
    pub archived_at: DateTimeUtc,
}

/// Archive rows stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
