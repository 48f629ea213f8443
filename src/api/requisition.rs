//! Requisition handlers - HTTP glue over `core::requisition`.

use crate::api::{
    AppState,
    auth::AuthUser,
    error::{ApiError, Json, MessageBody},
};
use crate::core::requisition::{self, FormFilter, FormInput};
use crate::entities::{requisition_archive, requisition_form};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body for the soft-delete (archive) of a single form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRequest {
    /// Why the form is being archived
    pub reason: String,
}

/// Body for the bulk archive operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkArchiveRequest {
    /// Active form ids to archive
    pub ids: Vec<String>,
    /// Shared archive reason
    pub reason: String,
}

/// Body for the retention purge. Without an explicit cutoff the current
/// retention policy decides what is expired.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    /// Purge everything archived before this instant
    #[serde(default)]
    pub cutoff: Option<DateTime<Utc>>,
}

/// GET `/api/Requisition` - list active forms, with optional filters.
pub async fn search_forms(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<FormFilter>,
) -> Result<Json<Vec<requisition_form::Model>>, ApiError> {
    Ok(Json(requisition::search_forms(&state.db, &filter).await?))
}

/// GET `/api/Requisition/{id}`
pub async fn get_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<requisition_form::Model>, ApiError> {
    requisition::get_form(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("requisition form", id))
}

/// POST `/api/Requisition`
pub async fn create_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<FormInput>,
) -> Result<(StatusCode, Json<requisition_form::Model>), ApiError> {
    let created = requisition::create_form(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT `/api/Requisition/{id}` - full overwrite of mutable fields.
pub async fn update_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<FormInput>,
) -> Result<Json<requisition_form::Model>, ApiError> {
    requisition::update_form(&state.db, &id, input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("requisition form", id))
}

/// DELETE `/api/Requisition/{id}` - archive on delete.
pub async fn archive_form(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ArchiveRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let archived =
        requisition::archive_form(&state.db, &id, &request.reason, &claims.username).await?;
    if archived {
        Ok(Json(MessageBody::new(
            "Requisition form archived",
            format!("Form {id} moved to archive"),
        )))
    } else {
        Err(ApiError::not_found("requisition form", id))
    }
}

/// POST `/api/Requisition/bulk-archive`
pub async fn bulk_archive(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<BulkArchiveRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let count =
        requisition::archive_forms(&state.db, &request.ids, &request.reason, &claims.username)
            .await?;
    Ok(Json(MessageBody::new(
        "Requisition forms archived",
        format!("{count} of {} forms moved to archive", request.ids.len()),
    )))
}

/// GET `/api/Requisition/archive`
pub async fn list_archive(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<requisition_archive::Model>>, ApiError> {
    Ok(Json(requisition::list_archive(&state.db).await?))
}

/// DELETE `/api/Requisition/archive/{id}` - permanent removal.
pub async fn delete_archive_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if requisition::delete_archive_entry(&state.db, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("requisition archive entry", id))
    }
}

/// POST `/api/Requisition/archive/purge` - maintenance: drop archive rows
/// older than the cutoff (explicit, or derived from the retention policy).
pub async fn purge_archive(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<PurgeRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let cutoff = request
        .cutoff
        .unwrap_or_else(|| state.retention.get().cutoff(chrono::Utc::now()));
    let purged = requisition::purge_expired_archives(&state.db, cutoff).await?;
    Ok(Json(MessageBody::new(
        "Requisition archive purged",
        format!("{purged} expired rows removed (cutoff {cutoff})"),
    )))
}
