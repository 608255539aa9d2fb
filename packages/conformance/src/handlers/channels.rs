//! `/channel*` handlers.

use aiot_api::{Channel, ChannelRequest, ChannelsPage, ListQuery, ThingsPage};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::{auth::Caller, error::AppError};

/// `POST /channel`: 201 with the stored channel.
pub async fn create(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Json(req): Json<ChannelRequest>,
) -> Result<(StatusCode, Json<Channel>), AppError> {
    let channel = state.backend.create_channel(&owner, req)?;
    Ok((StatusCode::CREATED, Json(channel)))
}

/// `GET /channel/list`
pub async fn list(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Query(query): Query<ListQuery>,
) -> Json<ChannelsPage> {
    Json(state.backend.channels(&owner, &query))
}

/// `GET /channel/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<Channel>, AppError> {
    Ok(Json(state.backend.channel(&owner, &id)?))
}

/// `PUT /channel/{id}`
pub async fn update(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(req): Json<ChannelRequest>,
) -> Result<Json<Value>, AppError> {
    state.backend.update_channel(&owner, &id, req)?;
    Ok(Json(json!({})))
}

/// `DELETE /channel/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_channel(&owner, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /channel/{id}/things`
pub async fn things(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ThingsPage>, AppError> {
    Ok(Json(state.backend.things_of_channel(&owner, &id, &query)?))
}
