//! The legacy endpoint family: `/users`, `/tokens`, bulk creation under
//! `/things/bulk` and `/channels/bulk`, and flat `/things` + `/channels`
//! listings.
//!
//! These endpoints answer creation with 201 and deletion with 204, and their
//! error bodies are not JSON envelopes; failures carry the body verbatim as
//! [`crate::ErrorKind::RemoteRaw`].

use aiot_api::{
    ChannelsPage, ChannelsResponse, ListQuery, LoginRequest, NamedEntity, ThingsPage,
    ThingsResponse, TokenResponse,
};

use super::connections::connect_request;
use super::Page;
use crate::error::Result;
use crate::paths;
use crate::transport::{Endpoint, CREATED, NO_CONTENT};
use crate::{Channel, Client, Thing};

/// Borrowed view of a [`Client`] exposing the legacy operations.
///
/// Obtained from [`Client::legacy`]; shares the client's address, HTTP pool
/// and authorization scheme.
#[derive(Debug, Clone, Copy)]
pub struct Legacy<'a> {
    client: &'a Client,
}

fn named(names: &[String]) -> Vec<NamedEntity> {
    names
        .iter()
        .map(|name| NamedEntity { name: name.clone() })
        .collect()
}

fn window(limit: u64, offset: u64) -> ListQuery {
    ListQuery {
        limit: Some(limit),
        offset: Some(offset),
        ..ListQuery::default()
    }
}

impl<'a> Legacy<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// `POST /users`: register a user account.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client
            .call(
                Endpoint::post("CreateUser", paths::LEGACY_USERS)
                    .accepting(CREATED)
                    .raw_errors(),
            )
            .json(&body)
            .send()
            .await
    }

    /// `POST /tokens`: issue a token for an existing user.
    ///
    /// A 403 is reported as [`crate::ErrorKind::InvalidCredentials`]; a 401 stays
    /// [`crate::ErrorKind::Unauthorized`].
    pub async fn token(&self, email: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: TokenResponse = self
            .client
            .call(
                Endpoint::post("Token", paths::LEGACY_TOKENS)
                    .accepting(CREATED)
                    .raw_errors()
                    .login_on_forbidden(),
            )
            .json(&body)
            .fetch()
            .await?;
        Ok(resp.token)
    }

    /// `POST /things/bulk`: create one thing per name.
    pub async fn create_things(&self, token: &str, names: &[String]) -> Result<Vec<Thing>> {
        let resp: ThingsResponse = self
            .client
            .call(
                Endpoint::post("CreateThings", paths::LEGACY_THINGS_BULK)
                    .accepting(CREATED)
                    .raw_errors(),
            )
            .token(token)
            .json(&named(names))
            .fetch()
            .await?;
        Ok(resp.things)
    }

    /// `GET /things?limit&offset`.
    pub async fn things(&self, token: &str, limit: u64, offset: u64) -> Result<Page<Thing>> {
        let page: ThingsPage = self
            .client
            .call(Endpoint::get("GetThings", paths::LEGACY_THINGS).raw_errors())
            .token(token)
            .query(window(limit, offset))
            .fetch()
            .await?;
        Ok(page.into())
    }

    /// `POST /channels/bulk`: create one channel per name.
    pub async fn create_channels(&self, token: &str, names: &[String]) -> Result<Vec<Channel>> {
        let resp: ChannelsResponse = self
            .client
            .call(
                Endpoint::post("CreateChannels", paths::LEGACY_CHANNELS_BULK)
                    .accepting(CREATED)
                    .raw_errors(),
            )
            .token(token)
            .json(&named(names))
            .fetch()
            .await?;
        Ok(resp.channels)
    }

    /// `GET /channels?limit&offset`.
    pub async fn channels(&self, token: &str, limit: u64, offset: u64) -> Result<Page<Channel>> {
        let page: ChannelsPage = self
            .client
            .call(Endpoint::get("GetChannels", paths::LEGACY_CHANNELS).raw_errors())
            .token(token)
            .query(window(limit, offset))
            .fetch()
            .await?;
        Ok(page.into())
    }

    /// `POST /connect`, pairing ids by position as [`Client::connect`] does.
    pub async fn connect(
        &self,
        token: &str,
        channel_ids: &[String],
        thing_ids: &[String],
    ) -> Result<()> {
        let endpoint = Endpoint::post("Connect", paths::CONNECT).raw_errors();
        let body = connect_request(&endpoint, channel_ids, thing_ids)?;
        self.client.call(endpoint).token(token).json(&body).send().await
    }

    /// `DELETE /things/{id}`.
    pub async fn delete_thing(&self, token: &str, thing_id: &str) -> Result<()> {
        self.client
            .call(
                Endpoint::delete("DeleteThing", paths::legacy_thing(thing_id))
                    .accepting(NO_CONTENT)
                    .raw_errors(),
            )
            .token(token)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    use axum::{
        http::StatusCode,
        routing::{delete, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_mock_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn bulk_body_is_array_of_names() {
        let body = named(&["a".to_string(), "b".to_string()]);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"[{"name":"a"},{"name":"b"}]"#
        );
    }

    #[tokio::test]
    async fn token_requires_created_and_token_field() {
        let app = Router::new().route(
            "/tokens",
            post(|| async { (StatusCode::CREATED, Json(json!({ "other": "x" }))) }),
        );
        let client = Client::new(spawn_mock_server(app).await);

        let err = client.legacy().token("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.op(), "Token");
        assert!(matches!(err.kind(), ErrorKind::Decode(_)));
    }

    #[tokio::test]
    async fn forbidden_token_request_is_invalid_credentials() {
        let app = Router::new().route("/tokens", post(|| async { StatusCode::FORBIDDEN }));
        let client = Client::new(spawn_mock_server(app).await);

        let err = client.legacy().token("a@b.c", "wrong").await.unwrap_err();
        assert!(err.is_invalid_credentials());
    }

    #[tokio::test]
    async fn unauthorized_token_request_is_not_a_credentials_error() {
        let app = Router::new().route("/tokens", post(|| async { StatusCode::UNAUTHORIZED }));
        let client = Client::new(spawn_mock_server(app).await);

        let err = client.legacy().token("a@b.c", "pw").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!err.is_invalid_credentials());
    }

    #[tokio::test]
    async fn bulk_create_sends_names_and_reads_things() {
        async fn bulk(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
            let things: Vec<Value> = body
                .as_array()
                .unwrap()
                .iter()
                .enumerate()
                .map(|(i, e)| json!({ "id": format!("t-{i}"), "key": "k", "name": e["name"] }))
                .collect();
            (StatusCode::CREATED, Json(json!({ "things": things })))
        }
        let client = Client::new(spawn_mock_server(Router::new().route("/things/bulk", post(bulk))).await);

        let things = client
            .legacy()
            .create_things("tok", &["x".into(), "y".into()])
            .await
            .unwrap();
        assert_eq!(things.len(), 2);
        assert_eq!(things[1].name, "y");
        assert_eq!(things[1].id, "t-1");
    }

    #[tokio::test]
    async fn delete_requires_no_content() {
        let app = Router::new()
            .route("/things/gone", delete(|| async { StatusCode::NO_CONTENT }))
            .route("/things/ok", delete(|| async { StatusCode::OK }));
        let client = Client::new(spawn_mock_server(app).await);

        client.legacy().delete_thing("tok", "gone").await.unwrap();
        let err = client.legacy().delete_thing("tok", "ok").await.unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::RemoteRaw { status: 200, .. }));
    }
}
