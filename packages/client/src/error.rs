//! Operation-tagged error type returned by every client call.
//!
//! An [`Error`] records which public operation failed (`"CreateThing"`,
//! `"ListThingsByUser"`, ...) and an [`ErrorKind`] describing why. Callers
//! branch on the kind; the display form reads `"<op>: <cause>"`.

use reqwest::StatusCode;

/// The cause of a failed operation.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Connecting, sending, or reading the response failed.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request body could not be encoded. No request was sent.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body did not have the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The gateway answered 401 or 403.
    #[error("missing or invalid credentials provided")]
    Unauthorized,

    /// The login endpoint rejected the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The gateway reported an application error in its JSON envelope.
    #[error("[status] {status} [code] {code} [message] {message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
    },

    /// A legacy endpoint failed; its body is kept verbatim.
    #[error("status code {status}: {body}")]
    RemoteRaw { status: u16, body: String },

    /// The arguments were rejected locally. No request was sent.
    #[error("invalid argument: {0}")]
    Validation(String),
}

/// An error produced by a client operation.
#[derive(Debug, thiserror::Error)]
#[error("{op}: {kind}")]
pub struct Error {
    op: &'static str,
    #[source]
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(op: &'static str, kind: ErrorKind) -> Self {
        Self { op, kind }
    }

    /// Name of the public operation that failed.
    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// HTTP status reported by the gateway, when the failure came from it.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.kind {
            ErrorKind::Remote { status, .. } | ErrorKind::RemoteRaw { status, .. } => {
                StatusCode::from_u16(*status).ok()
            }
            ErrorKind::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// `true` for the "missing or invalid credentials" sentinel.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized)
    }

    /// `true` for the "invalid email or password" sentinel.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidCredentials)
    }

    /// `true` when the gateway answered 404, e.g. deleting an absent resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
