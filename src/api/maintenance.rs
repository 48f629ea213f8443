//! Maintenance handlers - runtime-adjustable retention policy.
//!
//! The retention policy lives in the application's state cell; this module
//! is its single writer. Updates notify any subscribers immediately.

use crate::api::{
    AppState,
    auth::AuthUser,
    error::{ApiError, Json},
};
use crate::config::{MAX_RETENTION_DAYS, RetentionPolicy};
use axum::extract::State;

/// GET `/api/maintenance/retention`
pub async fn get_retention(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<RetentionPolicy> {
    Json(state.retention.get())
}

/// PUT `/api/maintenance/retention`
pub async fn put_retention(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(policy): Json<RetentionPolicy>,
) -> Result<Json<RetentionPolicy>, ApiError> {
    if !(1..=MAX_RETENTION_DAYS).contains(&policy.days) {
        return Err(ApiError::bad_request(format!(
            "Retention must be between 1 and {MAX_RETENTION_DAYS} days"
        )));
    }
    state.retention.set(policy);
    Ok(Json(policy))
}
