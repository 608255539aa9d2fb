//! Resource operations, one `impl Client` block per resource family.
//!
//! Each operation names itself (the tag carried by its errors), picks an
//! endpoint path and accepted statuses, and lets the transport do the rest.

pub mod channels;
pub mod connections;
pub mod gateways;
pub mod legacy;
pub mod things;
pub mod user;

use aiot_api::{Channel, ChannelsPage, Thing, ThingsPage};
use serde::Serialize;

/// One page of a list endpoint.
///
/// `total` counts every match on the gateway, independent of the page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<ThingsPage> for Page<Thing> {
    fn from(page: ThingsPage) -> Self {
        Self {
            items: page.things,
            total: page.total,
        }
    }
}

impl From<ChannelsPage> for Page<Channel> {
    fn from(page: ChannelsPage) -> Self {
        Self {
            items: page.channels,
            total: page.total,
        }
    }
}
