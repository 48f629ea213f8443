//! Inventory business logic - Handles all inventory item operations.
//!
//! Provides functions for creating, retrieving, updating, and archiving
//! inventory items. Archiving is the soft-delete path: the row is copied
//! into the archive table and removed from the active table inside one
//! database transaction, so either both happen or neither does. Hard
//! deletion only ever applies to archive rows.

use crate::{
    entities::{InventoryArchive, InventoryItem, inventory_archive, inventory_item},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{Condition, DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Mutable fields of an inventory item, used by both create and update.
/// Updates are a full overwrite of these fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    /// Item name
    pub name: String,
    /// Category for organization
    pub category: String,
    /// Quantity on hand
    pub quantity: i64,
    /// Unit of measure
    pub unit: String,
    /// Storage location
    pub location: String,
    /// Free-form status
    pub status: String,
    /// Low-stock threshold
    pub stock_threshold: i64,
}

impl ItemInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Item name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(Error::validation("Quantity cannot be negative"));
        }
        if self.stock_threshold < 0 {
            return Err(Error::validation("Stock threshold cannot be negative"));
        }
        Ok(())
    }
}

/// Optional filters for listing the inventory archive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveFilter {
    /// Case-insensitive substring match on name or category
    pub keyword: Option<String>,
    /// Lower bound (inclusive) on `archived_at`
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (inclusive) on `archived_at`
    pub to: Option<DateTime<Utc>>,
}

/// Retrieves all active inventory items, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .order_by_asc(inventory_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an item by its unique ID, returning None if it is absent
/// (including when it has been archived).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new inventory item, performing input validation.
///
/// The name is trimmed; quantity and threshold must be non-negative.
/// Creation and update timestamps are set to now.
///
/// # Errors
/// Returns an error if validation fails or the insert fails.
pub async fn create_item(
    db: &DatabaseConnection,
    input: ItemInput,
) -> Result<inventory_item::Model> {
    input.validate()?;

    let now = chrono::Utc::now();
    let item = inventory_item::ActiveModel {
        name: Set(input.name.trim().to_string()),
        category: Set(input.category),
        quantity: Set(input.quantity),
        unit: Set(input.unit),
        location: Set(input.location),
        status: Set(input.status),
        stock_threshold: Set(input.stock_threshold),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    info!(item_id = result.id, name = %result.name, "Created inventory item");
    Ok(result)
}

/// Overwrites all mutable fields of an existing item.
///
/// Returns `Ok(None)` without mutating anything when the item does not
/// exist; the API layer turns that into a 404.
///
/// # Errors
/// Returns an error if validation fails or the update fails.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    input: ItemInput,
) -> Result<Option<inventory_item::Model>> {
    input.validate()?;

    let Some(existing) = InventoryItem::find_by_id(item_id).one(db).await? else {
        return Ok(None);
    };

    let mut item: inventory_item::ActiveModel = existing.into();
    item.name = Set(input.name.trim().to_string());
    item.category = Set(input.category);
    item.quantity = Set(input.quantity);
    item.unit = Set(input.unit);
    item.location = Set(input.location);
    item.status = Set(input.status);
    item.stock_threshold = Set(input.stock_threshold);
    item.updated_at = Set(chrono::Utc::now());

    let updated = item.update(db).await?;
    info!(item_id, "Updated inventory item");
    Ok(Some(updated))
}

/// Copies an item's fields into an archive row inside an open transaction
/// and deletes the active row. Shared by the single and bulk archive paths.
async fn archive_item_in_txn(
    txn: &DatabaseTransaction,
    item: inventory_item::Model,
    reason: &str,
    actor: &str,
    archived_at: DateTime<Utc>,
) -> Result<inventory_archive::Model> {
    let archive = inventory_archive::ActiveModel {
        item_id: Set(item.id),
        name: Set(item.name.clone()),
        category: Set(item.category.clone()),
        quantity: Set(item.quantity),
        unit: Set(item.unit.clone()),
        location: Set(item.location.clone()),
        status: Set(item.status.clone()),
        stock_threshold: Set(item.stock_threshold),
        archived_reason: Set(reason.to_string()),
        archived_by: Set(actor.to_string()),
        archived_at: Set(archived_at),
        ..Default::default()
    };

    let archived = archive.insert(txn).await?;
    item.delete(txn).await?;
    Ok(archived)
}

/// Archives (soft-deletes) a single item: copy to the archive table with
/// reason/actor metadata, delete the original, commit as one unit.
///
/// Returns `Ok(false)` when no active item has this id. If the archive
/// insert fails the transaction rolls back and the active row is retained.
///
/// # Errors
/// Returns an error if the reason is empty or the transaction fails.
#[instrument(skip(db))]
pub async fn archive_item(
    db: &DatabaseConnection,
    item_id: i64,
    reason: &str,
    actor: &str,
) -> Result<bool> {
    if reason.trim().is_empty() {
        return Err(Error::validation("Archive reason cannot be empty"));
    }

    let txn = db.begin().await?;

    let Some(item) = InventoryItem::find_by_id(item_id).one(&txn).await? else {
        warn!(item_id, "No active inventory item to archive");
        return Ok(false);
    };

    archive_item_in_txn(&txn, item, reason.trim(), actor, chrono::Utc::now()).await?;
    txn.commit().await?;

    info!(item_id, reason, actor, "Archived inventory item");
    Ok(true)
}

/// Archives several items as one transaction, returning how many active
/// rows were actually moved. Ids with no active row are skipped rather
/// than failing the whole batch.
///
/// # Errors
/// Returns an error if the reason is empty or the transaction fails.
#[instrument(skip(db, item_ids))]
pub async fn archive_items(
    db: &DatabaseConnection,
    item_ids: &[i64],
    reason: &str,
    actor: &str,
) -> Result<u64> {
    if reason.trim().is_empty() {
        return Err(Error::validation("Archive reason cannot be empty"));
    }

    let txn = db.begin().await?;
    let archived_at = chrono::Utc::now();
    let mut count = 0u64;

    for &item_id in item_ids {
        let Some(item) = InventoryItem::find_by_id(item_id).one(&txn).await? else {
            warn!(item_id, "Skipping bulk archive of missing inventory item");
            continue;
        };
        archive_item_in_txn(&txn, item, reason.trim(), actor, archived_at).await?;
        count += 1;
    }

    txn.commit().await?;
    info!(count, reason, actor, "Bulk-archived inventory items");
    Ok(count)
}

/// Lists archived items, newest first, optionally filtered by keyword
/// (substring of name or category) and/or an `archived_at` date range.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_archive(
    db: &DatabaseConnection,
    filter: &ArchiveFilter,
) -> Result<Vec<inventory_archive::Model>> {
    let mut query = InventoryArchive::find();

    if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        let keyword = keyword.trim();
        query = query.filter(
            Condition::any()
                .add(inventory_archive::Column::Name.contains(keyword))
                .add(inventory_archive::Column::Category.contains(keyword)),
        );
    }
    if let Some(from) = filter.from {
        query = query.filter(inventory_archive::Column::ArchivedAt.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(inventory_archive::Column::ArchivedAt.lte(to));
    }

    query
        .order_by_desc(inventory_archive::Column::ArchivedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Permanently deletes an archive row. There is no recovery path.
///
/// Returns `Ok(false)` when no archive row has this id.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(db))]
pub async fn delete_archive_entry(db: &DatabaseConnection, archive_id: i64) -> Result<bool> {
    let result = InventoryArchive::delete_by_id(archive_id).exec(db).await?;
    if result.rows_affected > 0 {
        info!(archive_id, "Permanently deleted inventory archive entry");
        Ok(true)
    } else {
        warn!(archive_id, "No inventory archive entry to delete");
        Ok(false)
    }
}
