//! Inventory handlers - HTTP glue over `core::inventory`.

use crate::api::{
    AppState,
    auth::AuthUser,
    error::{ApiError, Json, MessageBody},
};
use crate::core::inventory::{self, ArchiveFilter, ItemInput};
use crate::entities::{inventory_archive, inventory_item};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Body for the soft-delete (archive) of a single item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRequest {
    /// Why the item is being archived
    pub reason: String,
}

/// Body for the bulk archive operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkArchiveRequest {
    /// Active item ids to archive
    pub ids: Vec<i64>,
    /// Shared archive reason
    pub reason: String,
}

/// GET `/api/inventory`
pub async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<inventory_item::Model>>, ApiError> {
    Ok(Json(inventory::list_items(&state.db).await?))
}

/// GET `/api/inventory/{id}`
pub async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<inventory_item::Model>, ApiError> {
    inventory::get_item(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("inventory item", id))
}

/// POST `/api/inventory`
pub async fn create_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<inventory_item::Model>), ApiError> {
    let created = inventory::create_item(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT `/api/inventory/{id}` - full overwrite of mutable fields.
pub async fn update_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<inventory_item::Model>, ApiError> {
    inventory::update_item(&state.db, id, input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("inventory item", id))
}

/// DELETE `/api/inventory/{id}` - soft delete: move the row to the archive.
/// The acting username is taken from the bearer token.
pub async fn archive_item(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<ArchiveRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let archived =
        inventory::archive_item(&state.db, id, &request.reason, &claims.username).await?;
    if archived {
        Ok(Json(MessageBody::new(
            "Inventory item archived",
            format!("Item {id} moved to archive"),
        )))
    } else {
        Err(ApiError::not_found("inventory item", id))
    }
}

/// POST `/api/inventory/bulk-archive`
pub async fn bulk_archive(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<BulkArchiveRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let count =
        inventory::archive_items(&state.db, &request.ids, &request.reason, &claims.username)
            .await?;
    Ok(Json(MessageBody::new(
        "Inventory items archived",
        format!("{count} of {} items moved to archive", request.ids.len()),
    )))
}

/// GET `/api/inventory/archive` - list/search the archive.
pub async fn list_archive(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<ArchiveFilter>,
) -> Result<Json<Vec<inventory_archive::Model>>, ApiError> {
    Ok(Json(inventory::list_archive(&state.db, &filter).await?))
}

/// DELETE `/api/inventory/archive/{id}` - permanent removal.
pub async fn delete_archive_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if inventory::delete_archive_entry(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("inventory archive entry", id))
    }
}
