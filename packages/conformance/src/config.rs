//! Mock gateway configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for a mock gateway.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `AIOT_MOCK_BIND` | `127.0.0.1:8080` | TCP socket address to listen on |
/// | `AIOT_MOCK_USERS` | (none) | Comma-separated `email:password` accounts to seed |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Socket address the server binds to. [`crate::spawn_gateway`] ignores
    /// this and always picks an ephemeral loopback port.
    pub bind_addr: SocketAddr,

    /// Accounts that exist before the first request.
    pub users: Vec<(String, String)>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            users: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GatewayConfigError {
    #[error("AIOT_MOCK_BIND must be a socket address (e.g. 127.0.0.1:8080), got {0:?}")]
    InvalidBind(String),

    #[error("AIOT_MOCK_USERS entries must look like email:password, got {0:?}")]
    InvalidUser(String),
}

impl GatewayConfig {
    /// Seed one account.
    pub fn with_user(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.push((email.into(), password.into()));
        self
    }

    /// Populate config from the process environment.
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("AIOT_MOCK_BIND") {
            config.bind_addr = raw
                .parse()
                .map_err(|_| GatewayConfigError::InvalidBind(raw.clone()))?;
        }

        if let Some(raw) = lookup("AIOT_MOCK_USERS") {
            for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                match entry.split_once(':') {
                    Some((email, password)) if !email.is_empty() && !password.is_empty() => {
                        config.users.push((email.to_string(), password.to_string()));
                    }
                    _ => return Err(GatewayConfigError::InvalidUser(entry.to_string())),
                }
            }
        }

        Ok(config)
    }
}
