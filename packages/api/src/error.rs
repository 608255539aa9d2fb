//! Standard error response body of the current endpoint family.

use serde::{Deserialize, Serialize};

/// The JSON body returned by the gateway for every non-success status.
///
/// ```json
/// { "errorCode": "THING_NOT_FOUND", "errorMessage": "thing does not exist" }
/// ```
///
/// Legacy endpoints do not use this envelope; their error bodies are plain
/// bytes and are surfaced verbatim by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code.
    #[serde(default)]
    pub error_code: String,

    /// Human-readable description of the problem.
    #[serde(default)]
    pub error_message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: code.into(),
            error_message: message.into(),
        }
    }
}

/// Error codes emitted by the gateway that callers commonly branch on.
pub mod codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
}
