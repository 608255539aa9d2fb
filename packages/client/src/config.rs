//! Client configuration, passed explicitly at construction time.

use std::time::Duration;

/// How the bearer token is placed in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`.
    #[default]
    Bearer,
    /// `Authorization: <token>`, as expected by older gateway deployments.
    Bare,
}

impl AuthScheme {
    /// Render the header value for `token`.
    pub fn header_value(&self, token: &str) -> String {
        match self {
            AuthScheme::Bearer => format!("Bearer {token}"),
            AuthScheme::Bare => token.to_string(),
        }
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "bare" => Ok(AuthScheme::Bare),
            _ => Err(ConfigError::InvalidAuthScheme(s.to_string())),
        }
    }
}

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("AIOT_GATEWAY_ADDR is not set")]
    MissingGatewayAddr,

    #[error("unknown auth scheme {0:?}; expected bearer or bare")]
    InvalidAuthScheme(String),

    #[error("AIOT_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Runtime configuration for a [`crate::Client`].
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `AIOT_GATEWAY_ADDR` | (required) | Base address, e.g. `https://iot.example.com/api` |
/// | `AIOT_AUTH_SCHEME` | `bearer` | `bearer` or `bare` |
/// | `AIOT_TIMEOUT_SECS` | (none) | Per-request timeout |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway base address. Every endpoint path is appended to it, so any
    /// deployment prefix belongs here.
    pub gateway_addr: String,

    pub auth_scheme: AuthScheme,

    /// Per-request timeout. `None` leaves the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Configuration with default scheme and no timeout.
    pub fn new(gateway_addr: impl Into<String>) -> Self {
        Self {
            gateway_addr: gateway_addr.into().trim_end_matches('/').to_string(),
            auth_scheme: AuthScheme::default(),
            timeout: None,
        }
    }

    pub fn with_auth_scheme(self, auth_scheme: AuthScheme) -> Self {
        Self {
            auth_scheme,
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Populate config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Populate config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("AIOT_GATEWAY_ADDR")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingGatewayAddr)?;

        let mut config = Self::new(addr);

        if let Some(scheme) = lookup("AIOT_AUTH_SCHEME") {
            config.auth_scheme = scheme.parse()?;
        }

        if let Some(secs) = lookup("AIOT_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
