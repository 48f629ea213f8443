//! Requisition business logic - Handles all requisition form operations.
//!
//! Requisition forms follow the same CRUD/archive shape as inventory items
//! but are keyed by a generated string id. The four workflow stages
//! (checked, approved, issued, received) are stored as optional
//! name/position/date triples; filling them in order is a convention the
//! system deliberately does not enforce. The archive additionally supports
//! a retention purge that drops rows older than a cutoff.

use crate::{
    entities::{RequisitionArchive, RequisitionForm, requisition_archive, requisition_form},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

fn default_status() -> String {
    "pending".to_string()
}

/// Mutable fields of a requisition form, used by both create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    /// Name of the person requesting
    pub requester: String,
    /// Requesting department
    pub department: String,
    /// What the requisition is for
    pub purpose: String,
    /// Free-form status; defaults to `"pending"`
    #[serde(default = "default_status")]
    pub status: String,
    /// When the requisition was lodged; defaults to now on create
    #[serde(default)]
    pub date_requested: Option<DateTime<Utc>>,
    /// Checked-stage name
    #[serde(default)]
    pub checked_by_name: Option<String>,
    /// Checked-stage position
    #[serde(default)]
    pub checked_by_position: Option<String>,
    /// Checked-stage date
    #[serde(default)]
    pub checked_date: Option<DateTime<Utc>>,
    /// Approved-stage name
    #[serde(default)]
    pub approved_by_name: Option<String>,
    /// Approved-stage position
    #[serde(default)]
    pub approved_by_position: Option<String>,
    /// Approved-stage date
    #[serde(default)]
    pub approved_date: Option<DateTime<Utc>>,
    /// Issued-stage name
    #[serde(default)]
    pub issued_by_name: Option<String>,
    /// Issued-stage position
    #[serde(default)]
    pub issued_by_position: Option<String>,
    /// Issued-stage date
    #[serde(default)]
    pub issued_date: Option<DateTime<Utc>>,
    /// Received-stage name
    #[serde(default)]
    pub received_by_name: Option<String>,
    /// Received-stage position
    #[serde(default)]
    pub received_by_position: Option<String>,
    /// Received-stage date
    #[serde(default)]
    pub received_date: Option<DateTime<Utc>>,
}

impl FormInput {
    fn validate(&self) -> Result<()> {
        if self.requester.trim().is_empty() {
            return Err(Error::validation("Requester cannot be empty"));
        }
        if self.department.trim().is_empty() {
            return Err(Error::validation("Department cannot be empty"));
        }
        if self.purpose.trim().is_empty() {
            return Err(Error::validation("Purpose cannot be empty"));
        }
        Ok(())
    }
}

/// Optional filters for searching active requisition forms.
/// All supplied filters are combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFilter {
    /// Exact match on department
    pub department: Option<String>,
    /// Exact match on requester
    pub requester: Option<String>,
    /// Exact match on status
    pub status: Option<String>,
    /// Lower bound (inclusive) on `date_requested`
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (inclusive) on `date_requested`
    pub to: Option<DateTime<Utc>>,
}

/// Generates a requisition id: `REQ-YYYYMMDD-xxxxxxxx` (UTC date plus the
/// first eight hex digits of a v4 UUID).
fn generate_form_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("REQ-{}-{}", now.format("%Y%m%d"), &suffix[..8])
}

/// Retrieves active requisition forms matching the given filters, newest
/// request first. An empty filter lists everything.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn search_forms(
    db: &DatabaseConnection,
    filter: &FormFilter,
) -> Result<Vec<requisition_form::Model>> {
    let mut query = RequisitionForm::find();

    if let Some(department) = filter.department.as_deref() {
        query = query.filter(requisition_form::Column::Department.eq(department));
    }
    if let Some(requester) = filter.requester.as_deref() {
        query = query.filter(requisition_form::Column::Requester.eq(requester));
    }
    if let Some(status) = filter.status.as_deref() {
        query = query.filter(requisition_form::Column::Status.eq(status));
    }
    if let Some(from) = filter.from {
        query = query.filter(requisition_form::Column::DateRequested.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(requisition_form::Column::DateRequested.lte(to));
    }

    query
        .order_by_desc(requisition_form::Column::DateRequested)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a form by its string id, returning None when absent or archived.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_form(
    db: &DatabaseConnection,
    form_id: &str,
) -> Result<Option<requisition_form::Model>> {
    RequisitionForm::find_by_id(form_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new requisition form with a generated id.
///
/// # Errors
/// Returns an error if validation fails or the insert fails.
pub async fn create_form(
    db: &DatabaseConnection,
    input: FormInput,
) -> Result<requisition_form::Model> {
    input.validate()?;

    let now = chrono::Utc::now();
    let form = requisition_form::ActiveModel {
        id: Set(generate_form_id(now)),
        requester: Set(input.requester.trim().to_string()),
        department: Set(input.department.trim().to_string()),
        purpose: Set(input.purpose),
        status: Set(input.status),
        date_requested: Set(input.date_requested.unwrap_or(now)),
        checked_by_name: Set(input.checked_by_name),
        checked_by_position: Set(input.checked_by_position),
        checked_date: Set(input.checked_date),
        approved_by_name: Set(input.approved_by_name),
        approved_by_position: Set(input.approved_by_position),
        approved_date: Set(input.approved_date),
        issued_by_name: Set(input.issued_by_name),
        issued_by_position: Set(input.issued_by_position),
        issued_date: Set(input.issued_date),
        received_by_name: Set(input.received_by_name),
        received_by_position: Set(input.received_by_position),
        received_date: Set(input.received_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let result = form.insert(db).await?;
    info!(form_id = %result.id, requester = %result.requester, "Created requisition form");
    Ok(result)
}

/// Overwrites all mutable fields of an existing form, including the
/// workflow stages. Returns `Ok(None)` without mutating anything when the
/// form does not exist.
///
/// # Errors
/// Returns an error if validation fails or the update fails.
pub async fn update_form(
    db: &DatabaseConnection,
    form_id: &str,
    input: FormInput,
) -> Result<Option<requisition_form::Model>> {
    input.validate()?;

    let Some(existing) = RequisitionForm::find_by_id(form_id).one(db).await? else {
        return Ok(None);
    };

    let date_requested = input.date_requested.unwrap_or(existing.date_requested);
    let mut form: requisition_form::ActiveModel = existing.into();
    form.requester = Set(input.requester.trim().to_string());
    form.department = Set(input.department.trim().to_string());
    form.purpose = Set(input.purpose);
    form.status = Set(input.status);
    form.date_requested = Set(date_requested);
    form.checked_by_name = Set(input.checked_by_name);
    form.checked_by_position = Set(input.checked_by_position);
    form.checked_date = Set(input.checked_date);
    form.approved_by_name = Set(input.approved_by_name);
    form.approved_by_position = Set(input.approved_by_position);
    form.approved_date = Set(input.approved_date);
    form.issued_by_name = Set(input.issued_by_name);
    form.issued_by_position = Set(input.issued_by_position);
    form.issued_date = Set(input.issued_date);
    form.received_by_name = Set(input.received_by_name);
    form.received_by_position = Set(input.received_by_position);
    form.received_date = Set(input.received_date);
    form.updated_at = Set(chrono::Utc::now());

    let updated = form.update(db).await?;
    info!(form_id, "Updated requisition form");
    Ok(Some(updated))
}

/// Copies a form into the archive table inside an open transaction and
/// deletes the active row. Shared by the single and bulk archive paths.
async fn archive_form_in_txn(
    txn: &DatabaseTransaction,
    form: requisition_form::Model,
    reason: &str,
    actor: &str,
    archived_at: DateTime<Utc>,
) -> Result<requisition_archive::Model> {
    let archive = requisition_archive::ActiveModel {
        id: Set(form.id.clone()),
        requester: Set(form.requester.clone()),
        department: Set(form.department.clone()),
        purpose: Set(form.purpose.clone()),
        status: Set(form.status.clone()),
        date_requested: Set(form.date_requested),
        checked_by_name: Set(form.checked_by_name.clone()),
        checked_by_position: Set(form.checked_by_position.clone()),
        checked_date: Set(form.checked_date),
        approved_by_name: Set(form.approved_by_name.clone()),
        approved_by_position: Set(form.approved_by_position.clone()),
        approved_date: Set(form.approved_date),
        issued_by_name: Set(form.issued_by_name.clone()),
        issued_by_position: Set(form.issued_by_position.clone()),
        issued_date: Set(form.issued_date),
        received_by_name: Set(form.received_by_name.clone()),
        received_by_position: Set(form.received_by_position.clone()),
        received_date: Set(form.received_date),
        archived_reason: Set(reason.to_string()),
        archived_by: Set(actor.to_string()),
        archived_at: Set(archived_at),
    };

    let archived = archive.insert(txn).await?;
    form.delete(txn).await?;
    Ok(archived)
}

/// Archives (soft-deletes) a single form as one transaction.
/// Returns `Ok(false)` when no active form has this id.
///
/// # Errors
/// Returns an error if the reason is empty or the transaction fails.
#[instrument(skip(db))]
pub async fn archive_form(
    db: &DatabaseConnection,
    form_id: &str,
    reason: &str,
    actor: &str,
) -> Result<bool> {
    if reason.trim().is_empty() {
        return Err(Error::validation("Archive reason cannot be empty"));
    }

    let txn = db.begin().await?;

    let Some(form) = RequisitionForm::find_by_id(form_id).one(&txn).await? else {
        warn!(form_id, "No active requisition form to archive");
        return Ok(false);
    };

    archive_form_in_txn(&txn, form, reason.trim(), actor, chrono::Utc::now()).await?;
    txn.commit().await?;

    info!(form_id, reason, actor, "Archived requisition form");
    Ok(true)
}

/// Archives several forms as one transaction, returning the number of
/// active rows actually moved. Missing ids are skipped.
///
/// # Errors
/// Returns an error if the reason is empty or the transaction fails.
#[instrument(skip(db, form_ids))]
pub async fn archive_forms(
    db: &DatabaseConnection,
    form_ids: &[String],
    reason: &str,
    actor: &str,
) -> Result<u64> {
    if reason.trim().is_empty() {
        return Err(Error::validation("Archive reason cannot be empty"));
    }

    let txn = db.begin().await?;
    let archived_at = chrono::Utc::now();
    let mut count = 0u64;

    for form_id in form_ids {
        let Some(form) = RequisitionForm::find_by_id(form_id).one(&txn).await? else {
            warn!(form_id, "Skipping bulk archive of missing requisition form");
            continue;
        };
        archive_form_in_txn(&txn, form, reason.trim(), actor, archived_at).await?;
        count += 1;
    }

    txn.commit().await?;
    info!(count, reason, actor, "Bulk-archived requisition forms");
    Ok(count)
}

/// Lists archived requisition forms, newest archive first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_archive(db: &DatabaseConnection) -> Result<Vec<requisition_archive::Model>> {
    RequisitionArchive::find()
        .order_by_desc(requisition_archive::Column::ArchivedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Permanently deletes an archived form. There is no recovery path.
/// Returns `Ok(false)` when no archive row has this id.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(db))]
pub async fn delete_archive_entry(db: &DatabaseConnection, form_id: &str) -> Result<bool> {
    let result = RequisitionArchive::delete_by_id(form_id).exec(db).await?;
    if result.rows_affected > 0 {
        info!(form_id, "Permanently deleted requisition archive entry");
        Ok(true)
    } else {
        warn!(form_id, "No requisition archive entry to delete");
        Ok(false)
    }
}

/// Maintenance operation: deletes archive rows whose `archived_at` is
/// strictly older than the cutoff. Returns the number of purged rows.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(db))]
pub async fn purge_expired_archives(db: &DatabaseConnection, cutoff: DateTime<Utc>) -> Result<u64> {
    let result = RequisitionArchive::delete_many()
        .filter(requisition_archive::Column::ArchivedAt.lt(cutoff))
        .exec(db)
        .await?;
    info!(
        purged = result.rows_affected,
        %cutoff,
        "Purged expired requisition archives"
    );
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_form_generates_id() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_form(&db, test_form_input("Alice", "IT")).await?;
        assert!(created.id.starts_with("REQ-"));
        assert_eq!(created.status, "pending");

        let found = get_form(&db, &created.id).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_form_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_form(&db, test_form_input("", "IT")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_form(&db, test_form_input("Alice", " ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        assert!(search_forms(&db, &FormFilter::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() -> Result<()> {
        let db = setup_test_db().await?;

        let a = create_form(&db, test_form_input("Alice", "IT")).await?;
        let b = create_form(&db, test_form_input("Bob", "IT")).await?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_forms_filters() -> Result<()> {
        let db = setup_test_db().await?;

        create_form(&db, test_form_input("Alice", "IT")).await?;
        create_form(&db, test_form_input("Bob", "Finance")).await?;
        let mut issued = test_form_input("Carol", "IT");
        issued.status = "issued".to_string();
        create_form(&db, issued).await?;

        let filter = FormFilter {
            department: Some("IT".to_string()),
            ..Default::default()
        };
        assert_eq!(search_forms(&db, &filter).await?.len(), 2);

        let filter = FormFilter {
            department: Some("IT".to_string()),
            status: Some("issued".to_string()),
            ..Default::default()
        };
        let hits = search_forms(&db, &filter).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].requester, "Carol");

        let filter = FormFilter {
            requester: Some("Bob".to_string()),
            ..Default::default()
        };
        assert_eq!(search_forms(&db, &filter).await?.len(), 1);

        let filter = FormFilter {
            from: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
            ..Default::default()
        };
        assert!(search_forms(&db, &filter).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_form_overwrites_workflow_stages() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_form(&db, test_form_input("Alice", "IT")).await?;

        let mut input = test_form_input("Alice", "IT");
        input.status = "checked".to_string();
        input.checked_by_name = Some("Dana".to_string());
        input.checked_by_position = Some("Storekeeper".to_string());
        input.checked_date = Some(chrono::Utc::now());

        let updated = update_form(&db, &created.id, input).await?.unwrap();
        assert_eq!(updated.status, "checked");
        assert_eq!(updated.checked_by_name.as_deref(), Some("Dana"));
        assert!(updated.approved_by_name.is_none());
        assert_eq!(updated.date_requested, created.date_requested);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_form_returns_none() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_form(&db, "REQ-00000000-deadbeef", test_form_input("A", "B")).await?;
        assert!(result.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_archive_form_moves_row() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_form(&db, test_form_input("Alice", "IT")).await?;

        assert!(archive_form(&db, &created.id, "fulfilled", "admin").await?);

        assert!(get_form(&db, &created.id).await?.is_none());
        let archive = list_archive(&db).await?;
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].id, created.id);
        assert_eq!(archive[0].archived_reason, "fulfilled");
        assert_eq!(archive[0].archived_by, "admin");
        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_archive_returns_count() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_form(&db, test_form_input("Alice", "IT")).await?;
        let b = create_form(&db, test_form_input("Bob", "Finance")).await?;

        let ids = vec![a.id.clone(), "REQ-00000000-missing0".to_string(), b.id];
        let count = archive_forms(&db, &ids, "quarter end", "admin").await?;
        assert_eq!(count, 2);
        assert!(search_forms(&db, &FormFilter::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_archive_copy_keeps_active_row() -> Result<()> {
        let db = setup_test_db().await?;
        let form = create_form(&db, test_form_input("Alice", "IT")).await?;

        // Occupy the archive slot for this id so the copy step must fail
        let blocker = requisition_archive::ActiveModel {
            id: Set(form.id.clone()),
            requester: Set("stale".to_string()),
            department: Set("stale".to_string()),
            purpose: Set("stale".to_string()),
            status: Set("stale".to_string()),
            date_requested: Set(chrono::Utc::now()),
            archived_reason: Set("stale".to_string()),
            archived_by: Set("system".to_string()),
            archived_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        blocker.insert(&db).await?;

        let result = archive_form(&db, &form.id, "fulfilled", "admin").await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        // The transaction rolled back: the active row was not deleted
        assert!(get_form(&db, &form.id).await?.is_some());
        assert_eq!(list_archive(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_archive_entry_permanent() -> Result<()> {
        let db = setup_test_db().await?;
        let form = create_form(&db, test_form_input("Alice", "IT")).await?;
        archive_form(&db, &form.id, "fulfilled", "admin").await?;

        assert!(delete_archive_entry(&db, &form.id).await?);
        assert!(list_archive(&db).await?.is_empty());
        assert!(!delete_archive_entry(&db, &form.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_purge_honors_cutoff() -> Result<()> {
        let db = setup_test_db().await?;
        let old = create_form(&db, test_form_input("Alice", "IT")).await?;
        archive_form(&db, &old.id, "fulfilled", "admin").await?;

        // Cutoff before the archive timestamp purges nothing
        let cutoff = chrono::Utc::now() - chrono::Duration::days(30);
        assert_eq!(purge_expired_archives(&db, cutoff).await?, 0);
        assert_eq!(list_archive(&db).await?.len(), 1);

        // Cutoff after it purges the row
        let cutoff = chrono::Utc::now() + chrono::Duration::seconds(1);
        assert_eq!(purge_expired_archives(&db, cutoff).await?, 1);
        assert!(list_archive(&db).await?.is_empty());
        Ok(())
    }
}
