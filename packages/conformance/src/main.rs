//! `aiot-mock-gateway`: standalone in-memory AIoT gateway.
//!
//! ```sh
//! AIOT_MOCK_USERS=operator@example.com:secret aiot-mock-gateway
//! ```
//!
//! See [`aiot_conformance::GatewayConfig::from_env`] for the variables read.

use std::process;
use std::sync::Arc;

use aiot_conformance::{build_router, seeded_backend, GatewayConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aiot_conformance=info,tower_http=debug".into()),
        )
        .init();

    let config = GatewayConfig::from_env().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(2);
    });

    let backend = seeded_backend(&config).unwrap_or_else(|e| {
        eprintln!("error: cannot seed accounts: {e}");
        process::exit(2);
    });
    tracing::info!(accounts = config.users.len(), "storage: in-memory");

    let app = build_router(Arc::clone(&backend));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app).await.expect("server error");
}
