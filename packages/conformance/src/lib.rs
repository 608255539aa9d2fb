//! In-process mock of the AIoT platform HTTP gateway.
//!
//! Provides [`spawn_gateway`], which binds a `TcpListener` on an ephemeral
//! port, serves every current- and legacy-family endpoint from a
//! [`MemoryBackend`], and returns both the base URL and the backend so tests
//! can seed data or count requests without going through HTTP.
//!
//! The same router also runs standalone as the `aiot-mock-gateway` binary.

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

pub use backend::{BackendError, MemoryBackend};
pub use config::{GatewayConfig, GatewayConfigError};
pub use router::build_router;

/// Create a backend holding the accounts listed in `config`.
pub fn seeded_backend(config: &GatewayConfig) -> Result<Arc<MemoryBackend>, BackendError> {
    let backend = Arc::new(MemoryBackend::new());
    for (email, password) in &config.users {
        backend.register_user(email, password)?;
    }
    Ok(backend)
}

/// Start an ephemeral in-process gateway and return `(base_url, backend)`.
///
/// The gateway runs in a background `tokio` task bound to an OS-assigned
/// port on `127.0.0.1`; `config.bind_addr` is not used.
///
/// # Panics
///
/// Panics if the listener cannot be bound or a seeded account is rejected.
pub async fn spawn_gateway(config: GatewayConfig) -> (String, Arc<MemoryBackend>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let base_url = format!("http://{addr}");

    let backend = seeded_backend(&config).expect("seed accounts");
    let router = build_router(Arc::clone(&backend));

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock gateway error");
    });

    (base_url, backend)
}
