//! Typed async client for the AIoT platform HTTP gateway.
//!
//! The gateway manages three kinds of resources: **things** (devices),
//! **channels** (pub/sub topics) and **gateways** (aggregation points that
//! wrap one thing), plus the connections between things and channels.
//! Every operation on [`Client`] performs exactly one HTTP round trip and
//! returns either the decoded result or an [`Error`] tagged with the
//! operation's name.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`ClientConfig`] and the `Authorization` header scheme |
//! | [`error`] | [`Error`] / [`ErrorKind`] |
//! | [`options`] | Pagination and filter options for list endpoints |
//! | [`input`] | Argument structs for create/update operations |
//! | `ops` | One `impl Client` block per resource family |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use aiot_client::{Client, CreateThingInput, ListThingsByUserOptions};
//!
//! # async fn run() -> Result<(), aiot_client::Error> {
//! let client = Client::new("https://iot.example.com/api");
//! let token = client.authenticate("operator@example.com", "secret").await?;
//!
//! client
//!     .create_thing(&token, CreateThingInput::new("greenhouse-sensor"))
//!     .await?;
//!
//! let page = client
//!     .list_things_by_user(&token, &ListThingsByUserOptions::default())
//!     .await?;
//! println!("{} of {} things", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod error;
pub mod input;
mod ops;
pub mod options;
mod paths;
mod transport;

pub use aiot_api::{
    Channel, Direction, Gateway, GatewayStatus, ListQuery, Metadata, Order, Thing, UserProfile,
};
pub use client::Client;
pub use config::{AuthScheme, ClientConfig, ConfigError};
pub use error::{Error, ErrorKind, Result};
pub use input::{
    CreateChannelInput, CreateGatewayInput, CreateThingInput, UpdateChannelInput,
    UpdateGatewayInput, UpdateThingInput,
};
pub use ops::legacy::Legacy;
pub use ops::Page;
pub use options::{
    ConnectionOptions, ListChannelsByThingOptions, ListChannelsByUserOptions,
    ListThingsByChannelOptions, ListThingsByUserOptions, PageOptions,
};
