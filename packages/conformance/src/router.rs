//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    backend::MemoryBackend,
    handlers::{channels, gateways, legacy, things, user, AppState},
};

async fn count_requests(backend: Arc<MemoryBackend>, req: Request, next: Next) -> Response {
    backend.record_request();
    next.run(req).await
}

/// Build the complete mock gateway router over `backend`.
pub fn build_router(backend: Arc<MemoryBackend>) -> Router {
    let counter = Arc::clone(&backend);
    let state = AppState { backend };

    Router::new()
        // User
        .route("/user/login", post(user::login))
        .route("/user/verify", get(user::verify))
        .route("/user/reset-password", post(user::reset_password))
        .route("/user/profile", get(user::profile))
        // Things
        .route("/thing", post(things::create))
        .route("/thing/list", get(things::list))
        .route(
            "/thing/{id}",
            get(things::get_by_id)
                .put(things::update)
                .delete(things::delete),
        )
        .route("/thing/{id}/channels", get(things::channels))
        .route(
            "/thing/{thing_id}/channel/{channel_id}",
            delete(things::disconnect),
        )
        .route("/connect", post(things::connect))
        // Channels
        .route("/channel", post(channels::create))
        .route("/channel/list", get(channels::list))
        .route(
            "/channel/{id}",
            get(channels::get_by_id)
                .put(channels::update)
                .delete(channels::delete),
        )
        .route("/channel/{id}/things", get(channels::things))
        // Gateways
        .route("/gateway", post(gateways::create))
        .route("/gateway/list", get(gateways::list))
        .route("/gateway/status", get(gateways::status))
        .route(
            "/gateway/{id}",
            get(gateways::get_by_id)
                .put(gateways::update)
                .delete(gateways::delete),
        )
        .route("/gateway/{id}/active-devices", get(gateways::active_devices))
        // Legacy family
        .route("/users", post(legacy::create_user))
        .route("/tokens", post(legacy::issue_token))
        .route("/things", get(legacy::things))
        .route("/things/bulk", post(legacy::create_things))
        .route("/things/{id}", delete(legacy::delete_thing))
        .route("/channels", get(legacy::channels))
        .route("/channels/bulk", post(legacy::create_channels))
        .with_state(state)
        .layer(axum::middleware::from_fn(move |req, next| {
            count_requests(Arc::clone(&counter), req, next)
        }))
        .layer(TraceLayer::new_for_http())
}
