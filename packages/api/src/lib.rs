//! Request and response types for the AIoT platform HTTP gateway.
//!
//! This crate encodes the gateway's JSON contract as Rust types. Field names
//! on the wire differ from the Rust names in several places (`desc`,
//! `fullName`, `thingId`, ...); the serde attributes here are the single
//! source of truth for that mapping.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | POST | `/user/login` | [`LoginRequest`] → [`TokenResponse`] |
//! | GET | `/user/verify` | → `200` |
//! | POST | `/user/reset-password` | [`ResetPasswordRequest`] → `200` |
//! | GET | `/user/profile` | → [`UserProfile`] |
//! | POST | `/thing` | [`ThingRequest`] → [`Thing`] |
//! | GET | `/thing/list` | [`ListQuery`] → [`ThingsPage`] |
//! | GET/PUT/DELETE | `/thing/{id}` | → [`Thing`] / [`ThingRequest`] / `200` |
//! | GET | `/thing/{id}/channels` | [`ListQuery`] → [`ChannelsPage`] |
//! | DELETE | `/thing/{thingId}/channel/{channelId}` | → `200` |
//! | POST | `/channel` | [`ChannelRequest`] → [`Channel`] |
//! | GET | `/channel/list` | [`ListQuery`] → [`ChannelsPage`] |
//! | GET/PUT/DELETE | `/channel/{id}` | → [`Channel`] / [`ChannelRequest`] / `200` |
//! | GET | `/channel/{id}/things` | [`ListQuery`] → [`ThingsPage`] |
//! | POST | `/connect` | [`ConnectRequest`] → `200` |
//! | POST | `/gateway` | [`CreateGatewayRequest`] → `200` |
//! | GET | `/gateway/list` | → [`GatewaysResponse`] |
//! | GET/PUT/DELETE | `/gateway/{id}` | → [`GatewayRecord`] / [`UpdateGatewayRequest`] / `200` |
//! | GET | `/gateway/status` | → [`GatewayStatusResponse`] |
//! | GET | `/gateway/{id}/active-devices` | → [`ActiveDeviceCount`] |
//!
//! The legacy family (`/users`, `/tokens`, `/things`, `/channels`,
//! `/things/bulk`, `/channels/bulk`) reuses [`LoginRequest`],
//! [`TokenResponse`], [`NamedEntity`], [`ThingsPage`] and [`ChannelsPage`].

pub mod channel;
pub mod connection;
pub mod error;
pub mod gateway;
pub mod query;
pub mod thing;
pub mod user;

pub use channel::{Channel, ChannelRequest, ChannelsPage, ChannelsResponse};
pub use connection::ConnectRequest;
pub use error::ErrorResponse;
pub use gateway::{
    decode_metadata, encode_metadata, ActiveDeviceCount, CreateGatewayRequest, Gateway,
    GatewayRecord, GatewayStatus, GatewayStatusResponse, GatewayThing, GatewaysResponse,
    MetadataError, UpdateGatewayRequest,
};
pub use query::{Direction, ListQuery, Order};
pub use thing::{Metadata, NamedEntity, Thing, ThingRequest, ThingsPage, ThingsResponse};
pub use user::{LoginRequest, ResetPasswordRequest, TokenResponse, UserProfile};
