//! The client handle bound to one gateway address.

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::ops::legacy::Legacy;
use crate::transport::{Call, Endpoint, Transport};

/// A handle to one AIoT gateway.
///
/// The handle is immutable and cheap to clone (`reqwest::Client` wraps an
/// `Arc`), so one instance can be shared across tasks. It holds no session:
/// the caller obtains a token with [`Client::authenticate`] and passes it to
/// every subsequent call.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Transport,
}

impl Client {
    /// Client for `gateway_addr` with default settings.
    pub fn new(gateway_addr: impl Into<String>) -> Self {
        Self::with_http_client(ClientConfig::new(gateway_addr), reqwest::Client::new())
    }

    /// Build the HTTP client from `config` (applying its timeout).
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::new("NewClient", ErrorKind::Transport(e)))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a pre-configured `reqwest::Client`. `config.timeout` is ignored;
    /// configure it on `http` instead.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let transport = Transport::new(http, &config.gateway_addr, config.auth_scheme);
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gateway base address every path is appended to.
    pub fn gateway_addr(&self) -> &str {
        &self.config.gateway_addr
    }

    /// Operations of the legacy endpoint family.
    pub fn legacy(&self) -> Legacy<'_> {
        Legacy::new(self)
    }

    pub(crate) fn call(&self, endpoint: Endpoint) -> Call<'_> {
        self.transport.call(endpoint)
    }
}
