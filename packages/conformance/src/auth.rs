//! Token authentication for the mock gateway.
//!
//! Both `Authorization` shapes the client can send are accepted:
//! `Bearer <token>` and the bare `<token>`.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, handlers::AppState};

/// Strip an optional `Bearer ` prefix from an `Authorization` value.
pub fn token_from_header(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    }
}

/// Extractor that requires a token issued by this gateway.
///
/// Yields the email of the account the token belongs to; rejects with 401
/// when the header is missing, empty or unknown.
pub struct Caller(pub String);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let app_state = AppState::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        async move {
            let header = header.ok_or_else(|| {
                AppError::Unauthorized("missing or invalid credentials provided".into())
            })?;
            let token = token_from_header(&header);
            if token.is_empty() {
                return Err(AppError::Unauthorized(
                    "missing or invalid credentials provided".into(),
                ));
            }
            app_state
                .backend
                .session(token)
                .map(Caller)
                .ok_or_else(|| AppError::Unauthorized("unknown token".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_header_shapes_yield_the_token() {
        assert_eq!(token_from_header("Bearer abc"), "abc");
        assert_eq!(token_from_header("bearer  abc "), "abc");
        assert_eq!(token_from_header("abc"), "abc");
        assert_eq!(token_from_header(""), "");
    }
}
