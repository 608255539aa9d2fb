//! Thing (device) types: `/thing`, `/thing/list`, `/thing/{id}` and the
//! legacy `/things` endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Free-form string annotations attached to things and channels.
pub type Metadata = BTreeMap<String, String>;

/// Read an explicit `null` as the field's default.
///
/// Services that serialise an unset map write `"metadata": null`, which
/// `#[serde(default)]` alone does not cover.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A device registered on the platform.
///
/// `id` and `key` are assigned by the gateway when the thing is created and
/// never change afterwards. The client treats both as opaque strings.
///
/// # Example
///
/// ```json
/// {
///   "id": "0192f6a4-7d1e-7c3e-a0b4-1d2e3f4a5b6c",
///   "key": "0192f6a4-7d1e-7c3e-a0b4-1d2e3f4a5b6d",
///   "name": "greenhouse-sensor",
///   "metadata": { "site": "north" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Thing {
    pub id: String,

    /// Access key the device uses to authenticate against the message broker.
    #[serde(default)]
    pub key: String,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// Request body for `POST /thing` and `PUT /thing/{id}`.
///
/// An update replaces both mutable fields; send the existing metadata to keep
/// it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThingRequest {
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// A bare `{ "name": ... }` element of a legacy bulk-creation body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedEntity {
    pub name: String,
}

/// One page of things plus the total number of things the query matches.
///
/// `total` is independent of the page size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThingsPage {
    #[serde(default)]
    pub things: Vec<Thing>,

    #[serde(default)]
    pub total: u64,
}

/// Response body for legacy `POST /things/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThingsResponse {
    #[serde(default)]
    pub things: Vec<Thing>,
}
