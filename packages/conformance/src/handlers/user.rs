//! `/user/*` handlers.

use aiot_api::{LoginRequest, ResetPasswordRequest, TokenResponse, UserProfile};
use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::{auth::Caller, error::AppError};

/// `POST /user/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.backend.login(&req.email, &req.password)?;
    tracing::debug!(email = %req.email, "issued token");
    Ok(Json(TokenResponse { token }))
}

/// `GET /user/verify`: the extractor does all the work.
pub async fn verify(Caller(_email): Caller) -> Json<Value> {
    Json(json!({}))
}

/// `POST /user/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Caller(email): Caller,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .backend
        .reset_password(&email, &req.new_password, &req.old_password)?;
    Ok(Json(json!({})))
}

/// `GET /user/profile`
pub async fn profile(
    State(state): State<AppState>,
    Caller(email): Caller,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.backend.profile(&email)?))
}
