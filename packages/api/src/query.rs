//! Sorting and pagination parameters shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Sort key for thing and channel listings.
///
/// Serialises as a lowercase string (e.g. `"name"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Sort by display name.
    #[default]
    Name,
    /// Sort by access key.
    Key,
    /// Sort by identifier.
    Id,
}

impl Order {
    /// The wire value used in the `order` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Name => "name",
            Order::Key => "key",
            Order::Id => "id",
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Order {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Order::Name),
            "key" => Ok(Order::Key),
            "id" => Ok(Order::Id),
            _ => Err(format!(
                "unknown order {:?}; expected one of: name, key, id",
                s
            )),
        }
    }
}

/// Sort direction. Serialises as `"asc"` or `"desc"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    /// The wire value used in the `dir` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(format!("unknown direction {:?}; expected asc or desc", s)),
        }
    }
}

/// Query parameters accepted by the list endpoints.
///
/// All fields are optional on the wire; servers apply their own defaults.
/// `disconnected` is only meaningful on `/thing/{id}/channels` and
/// `/channel/{id}/things`, where `true` flips the listing to resources that
/// are *not* connected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnected: Option<bool>,
}
