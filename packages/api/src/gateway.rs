//! Gateway types: `/gateway`, `/gateway/list`, `/gateway/{id}`,
//! `/gateway/status` and `/gateway/{id}/active-devices`.
//!
//! A gateway always wraps exactly one underlying thing. On the wire the
//! thing is nested under `thing` and, unlike everywhere else in the API, its
//! `metadata` is a JSON document encoded *as a string*. [`GatewayRecord`] is
//! that wire shape; [`Gateway`] is the flattened form handed to callers.

use serde::{Deserialize, Serialize};

use crate::thing::{null_as_default, Metadata, Thing};

/// The embedded thing metadata string could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid embedded thing metadata: {0}")]
pub struct MetadataError(#[from] serde_json::Error);

impl MetadataError {
    pub fn into_inner(self) -> serde_json::Error {
        self.0
    }
}

/// The underlying thing as embedded in a gateway record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GatewayThing {
    pub id: String,

    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub name: String,

    /// JSON-encoded metadata map, e.g. `"{\"site\":\"north\"}"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: String,

    #[serde(default)]
    pub owner: String,
}

impl GatewayThing {
    /// Embed `thing`, encoding its metadata map as a JSON string.
    pub fn from_thing(thing: &Thing, owner: impl Into<String>) -> Self {
        Self {
            id: thing.id.clone(),
            key: thing.key.clone(),
            name: thing.name.clone(),
            metadata: encode_metadata(&thing.metadata),
            owner: owner.into(),
        }
    }
}

/// A gateway exactly as the gateway service encodes it.
///
/// # Example
///
/// ```json
/// {
///   "id": "0192f6a4-0000-7000-a000-000000000001",
///   "name": "demo-1",
///   "desc": "demo-1",
///   "owner": "operator@example.com",
///   "thing": {
///     "id": "0192f6a4-0000-7000-a000-000000000002",
///     "key": "0192f6a4-0000-7000-a000-000000000003",
///     "name": "demo-1",
///     "metadata": "{\"meta-1\":\"meta-1\"}",
///     "owner": "operator@example.com"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GatewayRecord {
    pub id: String,

    pub name: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub thing: GatewayThing,
}

/// A gateway with its underlying thing flattened and decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Gateway {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub underlay_thing: Thing,
    pub underlay_thing_owner: String,
}

impl TryFrom<GatewayRecord> for Gateway {
    type Error = MetadataError;

    fn try_from(record: GatewayRecord) -> Result<Self, Self::Error> {
        let metadata = decode_metadata(&record.thing.metadata)?;
        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            owner: record.owner,
            underlay_thing: Thing {
                id: record.thing.id,
                key: record.thing.key,
                name: record.thing.name,
                metadata,
            },
            underlay_thing_owner: record.thing.owner,
        })
    }
}

/// Parse an embedded metadata string. An empty string or `null` means no
/// metadata.
pub fn decode_metadata(raw: &str) -> Result<Metadata, MetadataError> {
    if raw.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let metadata: Option<Metadata> = serde_json::from_str(raw)?;
    Ok(metadata.unwrap_or_default())
}

/// Encode a metadata map the way gateway records embed it.
pub fn encode_metadata(metadata: &Metadata) -> String {
    // A map of strings always serialises.
    serde_json::to_string(metadata).unwrap_or_else(|_| "{}".into())
}

/// Request body for `POST /gateway`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateGatewayRequest {
    pub name: String,

    #[serde(rename = "desc")]
    pub description: String,

    /// Identifier of an existing thing that will back the gateway.
    #[serde(rename = "thingId")]
    pub thing_id: String,
}

/// Request body for `PUT /gateway/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateGatewayRequest {
    pub name: String,

    #[serde(rename = "desc")]
    pub description: String,
}

/// Response body for `GET /gateway/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GatewaysResponse {
    #[serde(default)]
    pub gateways: Vec<GatewayRecord>,
}

/// Reported connectivity of one gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayStatus {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Status label as reported by the platform (e.g. `"online"`).
    pub status: String,
}

/// Response body for `GET /gateway/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GatewayStatusResponse {
    #[serde(default)]
    pub statuses: Vec<GatewayStatus>,
}

/// Response body for `GET /gateway/{id}/active-devices`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActiveDeviceCount {
    pub count: u64,
}
