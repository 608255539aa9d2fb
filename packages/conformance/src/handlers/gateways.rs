//! `/gateway*` handlers.

use aiot_api::{
    ActiveDeviceCount, CreateGatewayRequest, GatewayRecord, GatewayStatusResponse,
    GatewaysResponse, UpdateGatewayRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::{auth::Caller, error::AppError};

/// `POST /gateway`: 201 with the stored record.
pub async fn create(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Json(req): Json<CreateGatewayRequest>,
) -> Result<(StatusCode, Json<GatewayRecord>), AppError> {
    let record = state.backend.create_gateway(&owner, req)?;
    tracing::debug!(id = %record.id, thing = %record.thing.id, "gateway created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /gateway/list`
pub async fn list(State(state): State<AppState>, Caller(owner): Caller) -> Json<GatewaysResponse> {
    Json(GatewaysResponse {
        gateways: state.backend.gateways(&owner),
    })
}

/// `GET /gateway/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<GatewayRecord>, AppError> {
    Ok(Json(state.backend.gateway(&owner, &id)?))
}

/// `PUT /gateway/{id}`
pub async fn update(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(req): Json<UpdateGatewayRequest>,
) -> Result<Json<Value>, AppError> {
    state.backend.update_gateway(&owner, &id, req)?;
    Ok(Json(json!({})))
}

/// `DELETE /gateway/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.backend.delete_gateway(&owner, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /gateway/status`
pub async fn status(
    State(state): State<AppState>,
    Caller(owner): Caller,
) -> Json<GatewayStatusResponse> {
    Json(GatewayStatusResponse {
        statuses: state.backend.gateway_statuses(&owner),
    })
}

/// `GET /gateway/{id}/active-devices`
pub async fn active_devices(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<ActiveDeviceCount>, AppError> {
    let count = state.backend.active_devices(&owner, &id)?;
    Ok(Json(ActiveDeviceCount { count }))
}
