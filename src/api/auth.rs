//! Login endpoint and the bearer-token request extractor.

use crate::api::{
    AppState,
    error::{ApiError, Json},
};
use crate::core::auth::{self, Claims};
use crate::entities::user;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts},
};
use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username (matched case-insensitively)
    pub username: String,
    /// Raw password
    pub password: String,
}

/// Successful login response: token plus the authenticated user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
    /// The authenticated user (password hash omitted)
    pub user: user::Model,
}

/// POST `/api/auth/login` - verify credentials and issue a token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, user) = auth::login(
        &state.db,
        &request.username,
        &request.password,
        &state.settings.jwt_secret,
        state.settings.token_ttl(),
    )
    .await?;
    Ok(Json(LoginResponse { token, user }))
}

/// Extractor asserting a valid bearer token; rejects with 401 otherwise.
/// Carries the token's claims so handlers know who is acting.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Authorization header must be a bearer token"))?;

        let claims = auth::decode_token(token, &state.settings.jwt_secret)?;
        Ok(Self(claims))
    }
}
