//! The request/response envelope every operation funnels through.
//!
//! An operation describes itself as an [`Endpoint`] (name, method, path,
//! accepted statuses, error-body format) and builds a [`Call`] on top of
//! it. [`Call::fetch`] and [`Call::send`] perform exactly one round trip:
//!
//! 1. encode the JSON body, before touching the network;
//! 2. send it with `Content-Type: application/json` and, when a token is
//!    given, an `Authorization` header in the configured scheme;
//! 3. hand the body of an accepted status to the decoder, or turn anything
//!    else into an [`ErrorKind`] tagged with the endpoint's operation name.
//!
//! There is no retry and no redirect-following beyond what `reqwest` does.

use aiot_api::{ErrorResponse, ListQuery};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AuthScheme;
use crate::error::{Error, ErrorKind, Result};

/// Statuses accepted by queries and most mutations.
pub(crate) const OK: &[u16] = &[200];
/// Statuses accepted by creation endpoints.
pub(crate) const OK_OR_CREATED: &[u16] = &[200, 201];
/// Statuses accepted by deletion endpoints.
pub(crate) const OK_OR_NO_CONTENT: &[u16] = &[200, 204];
pub(crate) const CREATED: &[u16] = &[201];
pub(crate) const NO_CONTENT: &[u16] = &[204];

/// How the gateway encodes the body of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorFormat {
    /// `{"errorCode": ..., "errorMessage": ...}`.
    Envelope,
    /// Arbitrary bytes, kept verbatim.
    Raw,
}

/// Which sentinel a 401/403 maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Denied {
    Credentials,
    Login,
    /// Only 403 means bad email/password; 401 stays [`ErrorKind::Unauthorized`].
    LoginForbidden,
}

/// Static description of one remote operation.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    pub op: &'static str,
    pub method: Method,
    pub path: String,
    pub success: &'static [u16],
    pub errors: ErrorFormat,
    pub denied: Denied,
}

impl Endpoint {
    fn new(op: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            op,
            method,
            path: path.into(),
            success: OK,
            errors: ErrorFormat::Envelope,
            denied: Denied::Credentials,
        }
    }

    pub fn get(op: &'static str, path: impl Into<String>) -> Self {
        Self::new(op, Method::GET, path)
    }

    pub fn post(op: &'static str, path: impl Into<String>) -> Self {
        Self::new(op, Method::POST, path)
    }

    pub fn put(op: &'static str, path: impl Into<String>) -> Self {
        Self::new(op, Method::PUT, path)
    }

    pub fn delete(op: &'static str, path: impl Into<String>) -> Self {
        Self::new(op, Method::DELETE, path)
    }

    pub fn accepting(self, success: &'static [u16]) -> Self {
        Self { success, ..self }
    }

    /// Legacy endpoints return raw error bodies.
    pub fn raw_errors(self) -> Self {
        Self {
            errors: ErrorFormat::Raw,
            ..self
        }
    }

    /// Map 401/403 to [`ErrorKind::InvalidCredentials`].
    pub fn login(self) -> Self {
        Self {
            denied: Denied::Login,
            ..self
        }
    }

    /// Map only 403 to [`ErrorKind::InvalidCredentials`].
    pub fn login_on_forbidden(self) -> Self {
        Self {
            denied: Denied::LoginForbidden,
            ..self
        }
    }

    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(self.op, kind)
    }

    /// Classify a response whose status is not in `success`.
    fn rejection(&self, status: StatusCode, body: &[u8]) -> ErrorKind {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return match self.denied {
                Denied::Login => ErrorKind::InvalidCredentials,
                Denied::LoginForbidden if status == StatusCode::FORBIDDEN => {
                    ErrorKind::InvalidCredentials
                }
                Denied::Credentials | Denied::LoginForbidden => ErrorKind::Unauthorized,
            };
        }

        let status = status.as_u16();
        match self.errors {
            ErrorFormat::Envelope => match serde_json::from_slice::<ErrorResponse>(body) {
                Ok(e) => ErrorKind::Remote {
                    status,
                    code: e.error_code,
                    message: e.error_message,
                },
                // Proxies in front of the gateway answer with HTML or plain text.
                Err(_) => ErrorKind::Remote {
                    status,
                    code: String::new(),
                    message: String::from_utf8_lossy(body).into_owned(),
                },
            },
            ErrorFormat::Raw => ErrorKind::RemoteRaw {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}

/// Shared HTTP plumbing owned by a [`crate::Client`].
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base: String,
    auth: AuthScheme,
}

impl Transport {
    pub fn new(http: reqwest::Client, base: &str, auth: AuthScheme) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn call(&self, endpoint: Endpoint) -> Call<'_> {
        Call {
            transport: self,
            endpoint,
            token: None,
            query: None,
            body: None,
        }
    }
}

/// One request being assembled against an [`Endpoint`].
pub(crate) struct Call<'a> {
    transport: &'a Transport,
    endpoint: Endpoint,
    token: Option<&'a str>,
    query: Option<ListQuery>,
    body: Option<std::result::Result<Vec<u8>, serde_json::Error>>,
}

impl<'a> Call<'a> {
    /// Attach a bearer token. An empty token sends no `Authorization` header.
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    pub fn query(mut self, query: ListQuery) -> Self {
        self.query = Some(query);
        self
    }

    /// Encode `body` as the JSON payload. Encoding failures surface from
    /// [`Call::fetch`] / [`Call::send`] without any request being made.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_vec(body));
        self
    }

    /// Perform the round trip and decode the accepted body as `R`.
    pub async fn fetch<R: DeserializeOwned>(self) -> Result<R> {
        let endpoint = self.endpoint.clone();
        let bytes = self.execute().await?;
        serde_json::from_slice(&bytes).map_err(|e| endpoint.error(ErrorKind::Decode(e)))
    }

    /// Perform the round trip and discard the accepted body.
    pub async fn send(self) -> Result<()> {
        self.execute().await.map(|_| ())
    }

    async fn execute(self) -> Result<Vec<u8>> {
        let Call {
            transport,
            endpoint,
            token,
            query,
            body,
        } = self;
        let op = endpoint.op;

        let body = body
            .transpose()
            .map_err(|e| endpoint.error(ErrorKind::Encode(e)))?;

        let url = transport.url(&endpoint.path);
        let mut request = transport
            .http
            .request(endpoint.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(query) = &query {
            request = request.query(query);
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, transport.auth.header_value(token));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!(op, method = %endpoint.method, %url, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| endpoint.error(ErrorKind::Transport(e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| endpoint.error(ErrorKind::Transport(e)))?;
        debug!(op, status = status.as_u16(), len = bytes.len(), "received response");

        if endpoint.success.contains(&status.as_u16()) {
            return Ok(bytes.to_vec());
        }

        warn!(op, status = status.as_u16(), "gateway rejected request");
        Err(endpoint.error(endpoint.rejection(status, &bytes)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use crate::options::PageOptions;

    /// Spawn a loopback axum server and return its base URL.
    async fn spawn_mock_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Echoes the headers, query and body it received.
    async fn echo(
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
        body: String,
    ) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "authorization": header("authorization"),
            "content_type": header("content-type"),
            "query": query,
            "body": body,
        }))
    }

    fn transport(base: &str, auth: AuthScheme) -> Transport {
        Transport::new(reqwest::Client::new(), base, auth)
    }

    #[tokio::test]
    async fn sends_bearer_token_json_body_and_query() {
        let base = spawn_mock_server(Router::new().route("/echo", post(echo))).await;
        let t = transport(&base, AuthScheme::Bearer);

        let seen: Value = t
            .call(Endpoint::post("Echo", "/echo"))
            .token("tok-1")
            .query(PageOptions::default().with_limit(5).to_query())
            .json(&json!({ "name": "demo-1" }))
            .fetch()
            .await
            .unwrap();

        assert_eq!(seen["authorization"], "Bearer tok-1");
        assert_eq!(seen["content_type"], "application/json");
        assert_eq!(seen["query"]["limit"], "5");
        assert_eq!(seen["query"]["offset"], "0");
        assert_eq!(seen["query"]["order"], "name");
        assert_eq!(seen["query"]["dir"], "desc");
        assert!(seen["query"].get("disconnected").is_none());
        assert_eq!(seen["body"], r#"{"name":"demo-1"}"#);
    }

    #[tokio::test]
    async fn bare_scheme_and_empty_token() {
        let base = spawn_mock_server(Router::new().route("/echo", get(echo))).await;

        let bare: Value = transport(&base, AuthScheme::Bare)
            .call(Endpoint::get("Echo", "/echo"))
            .token("tok-1")
            .fetch()
            .await
            .unwrap();
        assert_eq!(bare["authorization"], "tok-1");
        assert_eq!(bare["body"], "");

        let anonymous: Value = transport(&base, AuthScheme::Bearer)
            .call(Endpoint::get("Echo", "/echo"))
            .token("")
            .fetch()
            .await
            .unwrap();
        assert!(anonymous["authorization"].is_null());
    }

    #[tokio::test]
    async fn unauthorized_and_forbidden_map_to_sentinels() {
        let app = Router::new()
            .route(
                "/401",
                get(|| async { AxumStatus::UNAUTHORIZED })
                    .post(|| async { AxumStatus::UNAUTHORIZED }),
            )
            .route(
                "/403",
                get(|| async { AxumStatus::FORBIDDEN }).post(|| async { AxumStatus::FORBIDDEN }),
            );
        let base = spawn_mock_server(app).await;
        let t = transport(&base, AuthScheme::Bearer);

        let err = t.call(Endpoint::get("ThingProfile", "/401")).send().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.op(), "ThingProfile");

        let err = t.call(Endpoint::get("ThingProfile", "/403")).send().await.unwrap_err();
        assert!(err.is_unauthorized());

        let err = t
            .call(Endpoint::post("Authenticate", "/401").login())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert_eq!(err.op(), "Authenticate");

        let err = t
            .call(Endpoint::post("Authenticate", "/403").login())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert!(!err.is_unauthorized());
    }

    #[tokio::test]
    async fn envelope_errors_are_decoded() {
        async fn conflict() -> (AxumStatus, Json<Value>) {
            (
                AxumStatus::CONFLICT,
                Json(json!({ "errorCode": "CONFLICT", "errorMessage": "name taken" })),
            )
        }
        let base = spawn_mock_server(Router::new().route("/thing", post(conflict))).await;

        let err = transport(&base, AuthScheme::Bearer)
            .call(Endpoint::post("CreateThing", "/thing").accepting(OK_OR_CREATED))
            .send()
            .await
            .unwrap_err();

        match err.kind() {
            ErrorKind::Remote {
                status,
                code,
                message,
            } => {
                assert_eq!(*status, 409);
                assert_eq!(code, "CONFLICT");
                assert_eq!(message, "name taken");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn raw_errors_keep_body_verbatim() {
        let app = Router::new().route(
            "/things/bulk",
            post(|| async { (AxumStatus::BAD_REQUEST, "malformed entity") }),
        );
        let base = spawn_mock_server(app).await;

        let err = transport(&base, AuthScheme::Bare)
            .call(
                Endpoint::post("CreateThings", "/things/bulk")
                    .accepting(CREATED)
                    .raw_errors(),
            )
            .send()
            .await
            .unwrap_err();

        assert!(matches!(
            err.kind(),
            ErrorKind::RemoteRaw { status: 400, body } if body == "malformed entity"
        ));
        assert_eq!(err.to_string(), "CreateThings: status code 400: malformed entity");
    }

    #[tokio::test]
    async fn status_outside_success_set_is_rejected() {
        // 201 is a failure for an endpoint that only accepts 200.
        let app = Router::new().route("/gateway", post(|| async { AxumStatus::CREATED }));
        let base = spawn_mock_server(app).await;

        let err = transport(&base, AuthScheme::Bearer)
            .call(Endpoint::post("CreateGateway", "/gateway"))
            .send()
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn unexpected_shape_is_a_decode_error() {
        let app = Router::new().route("/user/profile", get(|| async { "not json" }));
        let base = spawn_mock_server(app).await;

        let err = transport(&base, AuthScheme::Bearer)
            .call(Endpoint::get("GetUserProfile", "/user/profile"))
            .fetch::<aiot_api::UserProfile>()
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Decode(_)));
        assert_eq!(err.op(), "GetUserProfile");
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport(&format!("http://{addr}"), AuthScheme::Bearer)
            .call(Endpoint::get("VerifyToken", "/user/verify"))
            .token("tok")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Transport(_)));
        assert_eq!(err.op(), "VerifyToken");
    }

    #[tokio::test]
    async fn encode_failure_happens_before_the_request() {
        struct Unencodable;
        impl Serialize for Unencodable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("refusing to encode"))
            }
        }

        // Nothing listens here; an Encode error proves no connection was tried.
        let err = transport("http://127.0.0.1:9", AuthScheme::Bearer)
            .call(Endpoint::post("CreateThing", "/thing"))
            .json(&Unencodable)
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Encode(_)));
    }
}
