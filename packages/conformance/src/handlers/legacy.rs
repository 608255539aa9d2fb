//! Legacy family: `/users`, `/tokens`, `/things`, `/channels` and the bulk
//! creation endpoints. Errors are plain text ([`RawError`]).

use aiot_api::{
    ChannelRequest, ChannelsPage, ChannelsResponse, ListQuery, LoginRequest, Metadata,
    NamedEntity, ThingRequest, ThingsPage, ThingsResponse, TokenResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::{
    auth::Caller,
    backend::BackendError,
    error::{AppError, RawError},
};

/// `POST /users`: 201 with an empty body.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<StatusCode, RawError> {
    state.backend.register_user(&req.email, &req.password)?;
    tracing::debug!(email = %req.email, "user registered");
    Ok(StatusCode::CREATED)
}

/// `POST /tokens`: 201 `{token}`; 403 for a bad email/password pair.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), RawError> {
    let token = state.backend.login(&req.email, &req.password)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// `POST /things/bulk`
pub async fn create_things(
    State(state): State<AppState>,
    caller: Result<Caller, AppError>,
    Json(names): Json<Vec<NamedEntity>>,
) -> Result<(StatusCode, Json<ThingsResponse>), RawError> {
    let Caller(owner) = caller?;
    let things = names
        .into_iter()
        .map(|n| {
            state.backend.create_thing(
                &owner,
                ThingRequest {
                    name: n.name,
                    metadata: Metadata::new(),
                },
            )
        })
        .collect::<Result<Vec<_>, BackendError>>()?;
    Ok((StatusCode::CREATED, Json(ThingsResponse { things })))
}

/// `GET /things?limit&offset`
pub async fn things(
    State(state): State<AppState>,
    caller: Result<Caller, AppError>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ThingsPage>, RawError> {
    let Caller(owner) = caller?;
    Ok(Json(state.backend.things(&owner, &query)))
}

/// `DELETE /things/{id}`: 204.
pub async fn delete_thing(
    State(state): State<AppState>,
    caller: Result<Caller, AppError>,
    Path(id): Path<String>,
) -> Result<StatusCode, RawError> {
    let Caller(owner) = caller?;
    state.backend.delete_thing(&owner, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /channels/bulk`
pub async fn create_channels(
    State(state): State<AppState>,
    caller: Result<Caller, AppError>,
    Json(names): Json<Vec<NamedEntity>>,
) -> Result<(StatusCode, Json<ChannelsResponse>), RawError> {
    let Caller(owner) = caller?;
    let channels = names
        .into_iter()
        .map(|n| {
            state.backend.create_channel(
                &owner,
                ChannelRequest {
                    name: n.name,
                    metadata: Metadata::new(),
                },
            )
        })
        .collect::<Result<Vec<_>, BackendError>>()?;
    Ok((StatusCode::CREATED, Json(ChannelsResponse { channels })))
}

/// `GET /channels?limit&offset`
pub async fn channels(
    State(state): State<AppState>,
    caller: Result<Caller, AppError>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ChannelsPage>, RawError> {
    let Caller(owner) = caller?;
    Ok(Json(state.backend.channels(&owner, &query)))
}
