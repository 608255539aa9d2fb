//! End-to-end tests of `aiot-client` against the mock gateway.
//!
//! Each test spawns an ephemeral in-process gateway (real TCP, real HTTP) via
//! [`aiot_conformance::spawn_gateway`] and drives it exclusively through the
//! typed client, so every assertion covers request construction, the wire
//! contract and error normalization together.
//!
//! # Coverage
//!
//! | Test | Area |
//! |------|------|
//! | `authenticate_then_verify_token` | login, token check |
//! | `bad_credentials_are_rejected` | login sentinel |
//! | `empty_token_fails_verification` | credentials sentinel |
//! | `profile_and_password_reset` | user profile, password change |
//! | `bare_authorization_scheme_is_accepted` | `AuthScheme::Bare` |
//! | `created_thing_is_listed` | create + list things |
//! | `list_options_page_and_sort` | offset/limit/order/dir |
//! | `update_thing_replaces_name_keeps_metadata` | update + profile |
//! | `delete_thing_is_not_idempotent` | delete, 404 on repeat |
//! | `channel_lifecycle` | channel CRUD |
//! | `connect_and_disconnect_are_inverse` | connections, `disconnected` filter |
//! | `connect_pairs_ids_by_position` | pairwise connect |
//! | `mismatched_connect_sends_nothing` | local validation |
//! | `connect_to_unknown_channel_is_remote_error` | remote 404 envelope |
//! | `gateway_lifecycle` | gateway CRUD, flattened thing |
//! | `gateway_status_and_active_devices` | status listing, device count |
//! | `gateway_needs_existing_thing` | remote 404 envelope |
//! | `other_accounts_cannot_see_resources` | ownership |
//! | `legacy_family_round_trip` | `/users`, `/tokens`, bulk, flat lists |
//! | `legacy_errors_keep_raw_body` | raw error bodies |
//! | `legacy_token_with_bad_credentials` | legacy login sentinel |

use std::time::Duration;

use aiot_client::{
    AuthScheme, Client, ClientConfig, CreateChannelInput, CreateGatewayInput, CreateThingInput,
    Direction, ErrorKind, ListChannelsByThingOptions, ListThingsByChannelOptions,
    ListThingsByUserOptions, Metadata, Order, PageOptions, UpdateChannelInput,
    UpdateGatewayInput, UpdateThingInput,
};
use aiot_conformance::{spawn_gateway, GatewayConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EMAIL: &str = "operator@example.com";
const PASSWORD: &str = "correct horse";

fn make_client(base: &str) -> Client {
    Client::from_config(ClientConfig::new(base).with_timeout(Duration::from_secs(5))).unwrap()
}

/// Spawn a gateway with one seeded account and return a client plus token.
async fn logged_in() -> (Client, String, std::sync::Arc<aiot_conformance::MemoryBackend>) {
    let (base, backend) = spawn_gateway(GatewayConfig::default().with_user(EMAIL, PASSWORD)).await;
    let client = make_client(&base);
    let token = client.authenticate(EMAIL, PASSWORD).await.unwrap();
    (client, token, backend)
}

fn metadata(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ids<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter().map(|s| s.as_ref().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authenticate_then_verify_token() {
    let (client, token, _) = logged_in().await;
    assert!(!token.is_empty());
    assert!(client.verify_token(&token).await.unwrap());
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let (base, _) = spawn_gateway(GatewayConfig::default().with_user(EMAIL, PASSWORD)).await;
    let client = make_client(&base);

    let err = client.authenticate(EMAIL, "wrong").await.unwrap_err();
    assert!(err.is_invalid_credentials());
    assert_eq!(err.op(), "Authenticate");
    assert_eq!(err.to_string(), "Authenticate: invalid email or password");

    let err = client.authenticate("nobody@example.com", PASSWORD).await.unwrap_err();
    assert!(err.is_invalid_credentials());
}

#[tokio::test]
async fn empty_token_fails_verification() {
    let (client, _, _) = logged_in().await;

    let err = client.verify_token("").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.op(), "VerifyToken");

    let err = client.verify_token("not-a-token").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn profile_and_password_reset() {
    let (client, token, _) = logged_in().await;

    let profile = client.user_profile(&token).await.unwrap();
    assert_eq!(profile.email, EMAIL);

    let err = client
        .reset_password(&token, "new-secret", "not the old one")
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Remote { status: 400, .. }));

    client
        .reset_password(&token, "new-secret", PASSWORD)
        .await
        .unwrap();
    assert!(client.authenticate(EMAIL, PASSWORD).await.unwrap_err().is_invalid_credentials());
    client.authenticate(EMAIL, "new-secret").await.unwrap();
}

#[tokio::test]
async fn bare_authorization_scheme_is_accepted() {
    let (base, _) = spawn_gateway(GatewayConfig::default().with_user(EMAIL, PASSWORD)).await;
    let client = Client::from_config(ClientConfig::new(&base).with_auth_scheme(AuthScheme::Bare))
        .unwrap();

    let token = client.authenticate(EMAIL, PASSWORD).await.unwrap();
    assert!(client.verify_token(&token).await.unwrap());
}

// ---------------------------------------------------------------------------
// Things
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_thing_is_listed() {
    let (client, token, _) = logged_in().await;
    let meta = metadata(&[("meta-1", "meta-1"), ("meta-2", "meta-2")]);

    let created = client
        .create_thing(&token, CreateThingInput::new("demo-1").with_metadata(meta.clone()))
        .await
        .unwrap();

    let page = client
        .list_things_by_user(&token, &ListThingsByUserOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);

    let thing = &page.items[0];
    assert_eq!(thing.name, "demo-1");
    assert_eq!(thing.metadata, meta);
    assert!(!thing.id.is_empty());
    assert!(!thing.key.is_empty());
    assert_eq!(thing, &created);
}

#[tokio::test]
async fn list_options_page_and_sort() {
    let (client, token, _) = logged_in().await;
    for name in ["alpha", "charlie", "bravo"] {
        client
            .create_thing(&token, CreateThingInput::new(name))
            .await
            .unwrap();
    }

    // Defaults: name, descending.
    let page = client
        .list_things_by_user(&token, &PageOptions::default())
        .await
        .unwrap();
    let names: Vec<_> = page.items.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["charlie", "bravo", "alpha"]);

    let opts = PageOptions::default()
        .with_direction(Direction::Asc)
        .with_order(Order::Name)
        .with_offset(1)
        .with_limit(1);
    let page = client.list_things_by_user(&token, &opts).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "bravo");
    assert_eq!(page.total, 3, "total is independent of the page size");
}

#[tokio::test]
async fn update_thing_replaces_name_keeps_metadata() {
    let (client, token, _) = logged_in().await;
    let meta = metadata(&[("meta-1", "meta-1")]);
    let thing = client
        .create_thing(&token, CreateThingInput::new("demo-1").with_metadata(meta.clone()))
        .await
        .unwrap();

    client
        .update_thing(
            &token,
            UpdateThingInput {
                id: thing.id.clone(),
                name: "demo-2".into(),
                metadata: meta.clone(),
            },
        )
        .await
        .unwrap();

    let profile = client.thing_profile(&token, &thing.id).await.unwrap();
    assert_eq!(profile.name, "demo-2");
    assert_eq!(profile.metadata, meta);
    assert_eq!(profile.key, thing.key);
}

#[tokio::test]
async fn delete_thing_is_not_idempotent() {
    let (client, token, _) = logged_in().await;
    let thing = client
        .create_thing(&token, CreateThingInput::new("demo-1"))
        .await
        .unwrap();

    client.delete_thing(&token, &thing.id).await.unwrap();
    let page = client
        .list_things_by_user(&token, &PageOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.is_empty());

    let err = client.delete_thing(&token, &thing.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.op(), "DeleteThing");
    match err.kind() {
        ErrorKind::Remote { status, code, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(code, "NOT_FOUND");
        }
        other => panic!("unexpected kind: {other:?}"),
    }

    let err = client.thing_profile(&token, &thing.id).await.unwrap_err();
    assert!(err.is_not_found());
}

// ---------------------------------------------------------------------------
// Channels and connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn channel_lifecycle() {
    let (client, token, _) = logged_in().await;

    let channel = client
        .create_channel(&token, CreateChannelInput::new("telemetry").with_entry("qos", "1"))
        .await
        .unwrap();
    assert!(!channel.id.is_empty());

    client
        .update_channel(
            &token,
            UpdateChannelInput {
                id: channel.id.clone(),
                name: "telemetry-v2".into(),
                metadata: channel.metadata.clone(),
            },
        )
        .await
        .unwrap();
    let fetched = client.channel_profile(&token, &channel.id).await.unwrap();
    assert_eq!(fetched.name, "telemetry-v2");
    assert_eq!(fetched.metadata["qos"], "1");

    let page = client
        .list_channels_by_user(&token, &PageOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    client.delete_channel(&token, &channel.id).await.unwrap();
    assert!(client
        .delete_channel(&token, &channel.id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn connect_and_disconnect_are_inverse() {
    let (client, token, _) = logged_in().await;
    let thing = client
        .create_thing(&token, CreateThingInput::new("sensor"))
        .await
        .unwrap();
    let channel = client
        .create_channel(&token, CreateChannelInput::new("telemetry"))
        .await
        .unwrap();

    let connected = ListChannelsByThingOptions::default();
    let disconnected = ListChannelsByThingOptions::default().with_disconnected(true);

    let before = client
        .list_channels_by_thing(&token, &thing.id, &connected)
        .await
        .unwrap();
    assert_eq!(before.total, 0);

    client
        .connect(&token, &ids(&[&channel.id]), &ids(&[&thing.id]))
        .await
        .unwrap();

    let linked = client
        .list_channels_by_thing(&token, &thing.id, &connected)
        .await
        .unwrap();
    assert_eq!(linked.items.len(), 1);
    assert_eq!(linked.items[0].id, channel.id);
    let unlinked = client
        .list_channels_by_thing(&token, &thing.id, &disconnected)
        .await
        .unwrap();
    assert_eq!(unlinked.total, 0);

    let things = client
        .list_things_by_channel(&token, &channel.id, &ListThingsByChannelOptions::default())
        .await
        .unwrap();
    assert_eq!(things.items[0].id, thing.id);

    client
        .disconnect(&token, &channel.id, &thing.id)
        .await
        .unwrap();

    let after = client
        .list_channels_by_thing(&token, &thing.id, &connected)
        .await
        .unwrap();
    assert_eq!(after.total, 0);
    let unlinked = client
        .list_channels_by_thing(&token, &thing.id, &disconnected)
        .await
        .unwrap();
    assert_eq!(unlinked.items[0].id, channel.id);

    let err = client
        .disconnect(&token, &channel.id, &thing.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.op(), "Disconnect");
}

#[tokio::test]
async fn connect_pairs_ids_by_position() {
    let (client, token, _) = logged_in().await;
    let t1 = client.create_thing(&token, CreateThingInput::new("t1")).await.unwrap();
    let t2 = client.create_thing(&token, CreateThingInput::new("t2")).await.unwrap();
    let c1 = client.create_channel(&token, CreateChannelInput::new("c1")).await.unwrap();
    let c2 = client.create_channel(&token, CreateChannelInput::new("c2")).await.unwrap();

    client
        .connect(&token, &ids(&[&c1.id, &c2.id]), &ids(&[&t1.id, &t2.id]))
        .await
        .unwrap();

    let of_t1 = client
        .list_channels_by_thing(&token, &t1.id, &ListChannelsByThingOptions::default())
        .await
        .unwrap();
    assert_eq!(of_t1.total, 1, "t1 is paired with c1 only");
    assert_eq!(of_t1.items[0].id, c1.id);

    let of_c2 = client
        .list_things_by_channel(&token, &c2.id, &ListThingsByChannelOptions::default())
        .await
        .unwrap();
    assert_eq!(of_c2.total, 1);
    assert_eq!(of_c2.items[0].id, t2.id);
}

#[tokio::test]
async fn mismatched_connect_sends_nothing() {
    let (client, token, backend) = logged_in().await;
    let before = backend.request_count();

    let err = client
        .connect(&token, &ids(&["c-1", "c-2"]), &ids(&["t-1"]))
        .await
        .unwrap_err();
    assert_eq!(err.op(), "Connect");
    assert!(matches!(err.kind(), ErrorKind::Validation(_)));
    assert_eq!(backend.request_count(), before, "no request reached the gateway");
}

#[tokio::test]
async fn connect_to_unknown_channel_is_remote_error() {
    let (client, token, _) = logged_in().await;
    let thing = client
        .create_thing(&token, CreateThingInput::new("sensor"))
        .await
        .unwrap();

    let err = client
        .connect(&token, &ids(&["missing"]), &ids(&[&thing.id]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.op(), "Connect");
}

// ---------------------------------------------------------------------------
// Gateways
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gateway_lifecycle() {
    let (client, token, _) = logged_in().await;
    let meta = metadata(&[("meta-1", "meta-1"), ("meta-2", "meta-2")]);
    let thing = client
        .create_thing(&token, CreateThingInput::new("demo-1").with_metadata(meta.clone()))
        .await
        .unwrap();

    client
        .create_gateway(
            &token,
            CreateGatewayInput {
                name: "demo-1".into(),
                description: "demo-1".into(),
                thing_id: thing.id.clone(),
            },
        )
        .await
        .unwrap();

    let gateways = client.list_gateways(&token).await.unwrap();
    assert_eq!(gateways.len(), 1);
    let gw = &gateways[0];
    assert_eq!(gw.name, "demo-1");
    assert_eq!(gw.description, "demo-1");
    assert_eq!(gw.owner, EMAIL);
    assert_eq!(gw.underlay_thing.id, thing.id);
    assert_eq!(gw.underlay_thing.name, "demo-1");
    assert_eq!(gw.underlay_thing.metadata, meta);
    assert_eq!(gw.underlay_thing_owner, EMAIL);

    client
        .update_gateway(
            &token,
            UpdateGatewayInput {
                id: gw.id.clone(),
                name: "demo-2".into(),
                description: "renamed".into(),
            },
        )
        .await
        .unwrap();
    let profile = client.gateway_profile(&token, &gw.id).await.unwrap();
    assert_eq!(profile.name, "demo-2");
    assert_eq!(profile.description, "renamed");
    assert_eq!(profile.underlay_thing, gw.underlay_thing);

    client.delete_gateway(&token, &gw.id).await.unwrap();
    assert!(client.list_gateways(&token).await.unwrap().is_empty());
    let err = client.gateway_profile(&token, &gw.id).await.unwrap_err();
    assert!(err.is_not_found());

    // The underlying thing outlives its gateway.
    client.thing_profile(&token, &thing.id).await.unwrap();
}

#[tokio::test]
async fn gateway_status_and_active_devices() {
    let (client, token, backend) = logged_in().await;
    let thing = client
        .create_thing(&token, CreateThingInput::new("edge"))
        .await
        .unwrap();
    client
        .create_gateway(
            &token,
            CreateGatewayInput {
                name: "edge".into(),
                description: String::new(),
                thing_id: thing.id,
            },
        )
        .await
        .unwrap();
    let gw = client.list_gateways(&token).await.unwrap().remove(0);

    assert_eq!(client.gateway_active_device_count(&token, &gw.id).await.unwrap(), 0);
    let statuses = client.gateway_statuses(&token).await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].id, gw.id);
    assert_eq!(statuses[0].status, "offline");

    backend.set_gateway_activity(&gw.id, "online", 4).unwrap();
    assert_eq!(client.gateway_active_device_count(&token, &gw.id).await.unwrap(), 4);
    assert_eq!(client.gateway_statuses(&token).await.unwrap()[0].status, "online");
}

#[tokio::test]
async fn gateway_needs_existing_thing() {
    let (client, token, _) = logged_in().await;
    let err = client
        .create_gateway(
            &token,
            CreateGatewayInput {
                name: "orphan".into(),
                description: String::new(),
                thing_id: "missing".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.op(), "CreateGateway");
}

#[tokio::test]
async fn other_accounts_cannot_see_resources() {
    let (base, _) = spawn_gateway(
        GatewayConfig::default()
            .with_user(EMAIL, PASSWORD)
            .with_user("guest@example.com", "guest"),
    )
    .await;
    let client = make_client(&base);
    let owner = client.authenticate(EMAIL, PASSWORD).await.unwrap();
    let guest = client.authenticate("guest@example.com", "guest").await.unwrap();

    let thing = client
        .create_thing(&owner, CreateThingInput::new("private"))
        .await
        .unwrap();

    assert!(client.thing_profile(&guest, &thing.id).await.unwrap_err().is_not_found());
    let page = client
        .list_things_by_user(&guest, &PageOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

// ---------------------------------------------------------------------------
// Legacy family
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_family_round_trip() {
    let (base, _) = spawn_gateway(GatewayConfig::default()).await;
    let client = make_client(&base);
    let legacy = client.legacy();

    legacy.create_user(EMAIL, PASSWORD).await.unwrap();
    let token = legacy.token(EMAIL, PASSWORD).await.unwrap();
    // Tokens from either family are interchangeable.
    assert!(client.verify_token(&token).await.unwrap());

    let things = legacy
        .create_things(&token, &ids(&["a", "b", "c"]))
        .await
        .unwrap();
    assert_eq!(things.len(), 3);
    let channels = legacy.create_channels(&token, &ids(&["ch"])).await.unwrap();
    assert_eq!(channels.len(), 1);

    let page = legacy.things(&token, 2, 0).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 3);
    let page = legacy.channels(&token, 10, 0).await.unwrap();
    assert_eq!(page.items[0].name, "ch");

    legacy
        .connect(&token, &ids(&[&channels[0].id]), &ids(&[&things[0].id]))
        .await
        .unwrap();
    let linked = client
        .list_things_by_channel(&token, &channels[0].id, &ListThingsByChannelOptions::default())
        .await
        .unwrap();
    assert_eq!(linked.items[0].id, things[0].id);

    legacy.delete_thing(&token, &things[0].id).await.unwrap();
    assert_eq!(legacy.things(&token, 10, 0).await.unwrap().total, 2);
}

#[tokio::test]
async fn legacy_errors_keep_raw_body() {
    let (base, _) = spawn_gateway(GatewayConfig::default().with_user(EMAIL, PASSWORD)).await;
    let client = make_client(&base);
    let legacy = client.legacy();

    let err = legacy.create_user(EMAIL, "again").await.unwrap_err();
    assert_eq!(err.op(), "CreateUser");
    match err.kind() {
        ErrorKind::RemoteRaw { status, body } => {
            assert_eq!(*status, 409);
            assert_eq!(body, &format!("user {EMAIL} already exists"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }

    let token = legacy.token(EMAIL, PASSWORD).await.unwrap();
    let err = legacy.delete_thing(&token, "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err.kind(), ErrorKind::RemoteRaw { body, .. } if body == "thing not found"));

    let err = legacy.things("not-a-token", 10, 0).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn legacy_token_with_bad_credentials() {
    let (base, _) = spawn_gateway(GatewayConfig::default().with_user(EMAIL, PASSWORD)).await;
    let client = make_client(&base);

    let err = client.legacy().token(EMAIL, "wrong").await.unwrap_err();
    assert!(err.is_invalid_credentials());
    assert_eq!(err.op(), "Token");
}
