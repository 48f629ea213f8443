//! User management handlers - HTTP glue over `core::user`.

use crate::api::{
    AppState,
    auth::AuthUser,
    error::{ApiError, Json, MessageBody},
};
use crate::core::user::{self, CreateUserInput, UpdateUserInput};
use crate::entities::user as user_entity;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Body for the bulk delete operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    /// User ids to delete
    pub ids: Vec<i64>,
}

/// GET `/api/users`
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<user_entity::Model>>, ApiError> {
    Ok(Json(user::list_users(&state.db).await?))
}

/// GET `/api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<user_entity::Model>, ApiError> {
    user::get_user(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user", id))
}

/// POST `/api/users`
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<user_entity::Model>), ApiError> {
    let created = user::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT `/api/users/{id}` - partial update.
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<user_entity::Model>, ApiError> {
    user::update_user(&state.db, id, input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user", id))
}

/// DELETE `/api/users/{id}` - permanent (users have no archive).
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if user::delete_user(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("user", id))
    }
}

/// POST `/api/users/bulk-delete`
pub async fn bulk_delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let count = user::delete_users(&state.db, &request.ids).await?;
    Ok(Json(MessageBody::new(
        "Users deleted",
        format!("{count} of {} users removed", request.ids.len()),
    )))
}
