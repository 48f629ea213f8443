//! Combined archive listing.
//!
//! Inventory and requisition archive rows can be shown in one list; the
//! two shapes are distinguished by an explicit `kind` tag on each record
//! rather than by sniffing which fields happen to be present.

use crate::api::{
    AppState,
    auth::AuthUser,
    error::{ApiError, Json},
};
use crate::core::{
    inventory::{self, ArchiveFilter},
    requisition,
};
use crate::entities::{inventory_archive, requisition_archive};
use axum::extract::State;
use serde::Serialize;

/// One row of the combined archive listing, tagged by origin.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArchiveRecord {
    /// An archived inventory item
    Inventory(inventory_archive::Model),
    /// An archived requisition form
    Requisition(requisition_archive::Model),
}

impl ArchiveRecord {
    fn archived_at(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            Self::Inventory(row) => row.archived_at,
            Self::Requisition(row) => row.archived_at,
        }
    }
}

/// GET `/api/archive` - both archives interleaved, newest first.
pub async fn list_combined(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ArchiveRecord>>, ApiError> {
    let items = inventory::list_archive(&state.db, &ArchiveFilter::default()).await?;
    let forms = requisition::list_archive(&state.db).await?;

    let mut records: Vec<ArchiveRecord> = items
        .into_iter()
        .map(ArchiveRecord::Inventory)
        .chain(forms.into_iter().map(ArchiveRecord::Requisition))
        .collect();
    records.sort_by_key(|r| std::cmp::Reverse(r.archived_at()));

    Ok(Json(records))
}
