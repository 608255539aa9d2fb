//! Channel (pub/sub topic) types: `/channel`, `/channel/list`,
//! `/channel/{id}` and the legacy `/channels` endpoints.

use serde::{Deserialize, Serialize};

use crate::thing::{null_as_default, Metadata};

/// A pub/sub topic things publish to and subscribe from.
///
/// Same shape as [`crate::Thing`] but a separate resource with its own
/// lifecycle; a channel may be connected to any number of things.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Channel {
    pub id: String,

    #[serde(default)]
    pub key: String,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// Request body for `POST /channel` and `PUT /channel/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelRequest {
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// One page of channels plus the total number of matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelsPage {
    #[serde(default)]
    pub channels: Vec<Channel>,

    #[serde(default)]
    pub total: u64,
}

/// Response body for legacy `POST /channels/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelsResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,
}
