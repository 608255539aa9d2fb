//! `/thing*` handlers and the connection endpoints.

use aiot_api::{ChannelsPage, ConnectRequest, ListQuery, Thing, ThingRequest, ThingsPage};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::{auth::Caller, error::AppError};

/// `POST /thing`: 201 with the stored thing.
pub async fn create(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Json(req): Json<ThingRequest>,
) -> Result<(StatusCode, Json<Thing>), AppError> {
    let thing = state.backend.create_thing(&owner, req)?;
    tracing::debug!(id = %thing.id, "thing created");
    Ok((StatusCode::CREATED, Json(thing)))
}

/// `GET /thing/list`
pub async fn list(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Query(query): Query<ListQuery>,
) -> Json<ThingsPage> {
    Json(state.backend.things(&owner, &query))
}

/// `GET /thing/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<Thing>, AppError> {
    Ok(Json(state.backend.thing(&owner, &id)?))
}

/// `PUT /thing/{id}`
pub async fn update(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(req): Json<ThingRequest>,
) -> Result<Json<Value>, AppError> {
    state.backend.update_thing(&owner, &id, req)?;
    Ok(Json(json!({})))
}

/// `DELETE /thing/{id}`: 204, or 404 when there is nothing to delete.
pub async fn delete(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_thing(&owner, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /thing/{id}/channels`
pub async fn channels(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ChannelsPage>, AppError> {
    Ok(Json(state.backend.channels_of_thing(&owner, &id, &query)?))
}

/// `POST /connect`: shared by both families.
pub async fn connect(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<Value>, AppError> {
    state.backend.connect(&owner, &req)?;
    tracing::debug!(pairs = req.channel_ids.len(), "connected");
    Ok(Json(json!({})))
}

/// `DELETE /thing/{thingId}/channel/{channelId}`
pub async fn disconnect(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path((thing_id, channel_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    state.backend.disconnect(&owner, &channel_id, &thing_id)?;
    Ok(Json(json!({})))
}
