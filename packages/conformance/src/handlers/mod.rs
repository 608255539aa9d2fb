//! HTTP request handlers for every mock gateway endpoint.
//!
//! Each submodule covers one resource family. Handlers are plain async
//! functions that take Axum extractors and return
//! `Result<impl IntoResponse, AppError>` (or [`crate::error::RawError`] for
//! the legacy family).

pub mod channels;
pub mod gateways;
pub mod legacy;
pub mod things;
pub mod user;

use std::sync::Arc;

use crate::backend::MemoryBackend;

/// Shared application state threaded through all handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<MemoryBackend>,
}
