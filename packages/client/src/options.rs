//! Query options for the paginated list endpoints.
//!
//! Options are plain values: every `with_*` setter consumes the value and
//! returns an updated copy, so a base configuration can be reused freely.
//!
//! ```
//! use aiot_client::{Direction, ListChannelsByThingOptions, Order, PageOptions};
//!
//! let page = PageOptions::default().with_limit(50).with_order(Order::Id);
//! let second = page.with_offset(50).with_direction(Direction::Asc);
//! assert_eq!(page.offset(), 0);
//! assert_eq!(second.offset(), 50);
//!
//! let unconnected = ListChannelsByThingOptions::default().with_disconnected(true);
//! assert!(unconnected.disconnected());
//! ```

use aiot_api::{Direction, ListQuery, Order};

/// Default page size.
pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination and sorting for a list endpoint.
///
/// Defaults: offset `0`, limit `10`, order [`Order::Name`], direction
/// [`Direction::Desc`]. Values are not validated; the gateway decides what
/// to do with out-of-range offsets or limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    offset: u64,
    limit: u64,
    order: Order,
    direction: Direction,
}

/// Options for `ListThingsByUser`.
pub type ListThingsByUserOptions = PageOptions;

/// Options for `ListChannelsByUser`.
pub type ListChannelsByUserOptions = PageOptions;

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            order: Order::Name,
            direction: Direction::Desc,
        }
    }
}

impl PageOptions {
    pub fn with_offset(self, offset: u64) -> Self {
        Self { offset, ..self }
    }

    pub fn with_limit(self, limit: u64) -> Self {
        Self { limit, ..self }
    }

    pub fn with_order(self, order: Order) -> Self {
        Self { order, ..self }
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The list query sent to the gateway. Every field is set explicitly.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            offset: Some(self.offset),
            limit: Some(self.limit),
            order: Some(self.order),
            dir: Some(self.direction),
            disconnected: None,
        }
    }
}

/// Pagination plus a connection-state filter, for listing the channels of a
/// thing or the things of a channel.
///
/// `disconnected` defaults to `false` (list connected resources); `true`
/// lists the resources that are *not* connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionOptions {
    page: PageOptions,
    disconnected: bool,
}

/// Options for `ListChannelsByThing`.
pub type ListChannelsByThingOptions = ConnectionOptions;

/// Options for `ListThingsByChannel`.
pub type ListThingsByChannelOptions = ConnectionOptions;

impl ConnectionOptions {
    pub fn with_page(self, page: PageOptions) -> Self {
        Self { page, ..self }
    }

    pub fn with_disconnected(self, disconnected: bool) -> Self {
        Self {
            disconnected,
            ..self
        }
    }

    pub fn with_offset(self, offset: u64) -> Self {
        self.with_page(self.page.with_offset(offset))
    }

    pub fn with_limit(self, limit: u64) -> Self {
        self.with_page(self.page.with_limit(limit))
    }

    pub fn with_order(self, order: Order) -> Self {
        self.with_page(self.page.with_order(order))
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        self.with_page(self.page.with_direction(direction))
    }

    pub fn page(&self) -> PageOptions {
        self.page
    }

    pub fn disconnected(&self) -> bool {
        self.disconnected
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            disconnected: Some(self.disconnected),
            ..self.page.to_query()
        }
    }
}
