//! In-memory state of the mock gateway.
//!
//! Everything lives behind one [`RwLock`] and is lost when the process
//! exits. Resources are scoped to the account that created them: another
//! account asking for the same id gets a not-found, exactly as if the id did
//! not exist.
//!
//! Ids, keys and tokens are UUIDv7 strings, so a `BTreeMap` keyed by id
//! iterates in creation order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use aiot_api::{
    Channel, ChannelRequest, ChannelsPage, ConnectRequest, CreateGatewayRequest, Direction,
    GatewayRecord, GatewayStatus, GatewayThing, ListQuery, Metadata, Order, Thing, ThingRequest,
    ThingsPage, UpdateGatewayRequest, UserProfile,
};
use uuid::Uuid;

/// Page size used when a listing does not name one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Status reported for a gateway nobody has marked otherwise.
pub const DEFAULT_GATEWAY_STATUS: &str = "offline";

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("invalid email or password")]
    BadCredentials,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct Account {
    password: String,
    profile: UserProfile,
}

struct Owned<T> {
    owner: String,
    value: T,
}

struct GatewayEntry {
    owner: String,
    name: String,
    description: String,
    thing_id: String,
    status: String,
    active_devices: u64,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    /// token → email
    sessions: HashMap<String, String>,
    things: BTreeMap<String, Owned<Thing>>,
    channels: BTreeMap<String, Owned<Channel>>,
    /// (channel_id, thing_id)
    connections: BTreeSet<(String, String)>,
    gateways: BTreeMap<String, GatewayEntry>,
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

// ---------------------------------------------------------------------------
// Listing helpers
// ---------------------------------------------------------------------------

/// Anything a listing can sort.
trait Listed {
    fn id(&self) -> &str;
    fn key(&self) -> &str;
    fn name(&self) -> &str;
}

impl Listed for Thing {
    fn id(&self) -> &str {
        &self.id
    }
    fn key(&self) -> &str {
        &self.key
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Listed for Channel {
    fn id(&self) -> &str {
        &self.id
    }
    fn key(&self) -> &str {
        &self.key
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Sort, then cut one page. Returns the page and the number of matches.
fn paginate<T: Listed + Clone>(mut items: Vec<T>, query: &ListQuery) -> (Vec<T>, u64) {
    let order = query.order.unwrap_or_default();
    let dir = query.dir.unwrap_or_default();
    items.sort_by(|a, b| {
        let ord: Ordering = match order {
            Order::Name => a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())),
            Order::Key => a.key().cmp(b.key()),
            Order::Id => a.id().cmp(b.id()),
        };
        match dir {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });

    let total = items.len() as u64;
    let offset = query.offset.unwrap_or(0) as usize;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT) as usize;
    let page = items.into_iter().skip(offset).take(limit).collect();
    (page, total)
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// Thread-safe state shared by every handler of one mock gateway.
#[derive(Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
    requests: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // A handler that panicked mid-write leaves nothing half-applied that
    // matters to a test double, so poisoned locks are simply recovered.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // --- Request accounting --------------------------------------------------

    pub fn record_request(&self) {
        self.requests.fetch_add(1, AtomicOrdering::SeqCst);
    }

    /// Number of HTTP requests served so far.
    pub fn request_count(&self) -> u64 {
        self.requests.load(AtomicOrdering::SeqCst)
    }

    // --- Accounts ------------------------------------------------------------

    pub fn register_user(&self, email: &str, password: &str) -> Result<(), BackendError> {
        if email.is_empty() || password.is_empty() {
            return Err(BackendError::InvalidRequest(
                "email and password are required".into(),
            ));
        }
        let mut inner = self.write();
        if inner.accounts.contains_key(email) {
            return Err(BackendError::Conflict(format!("user {email} already exists")));
        }
        let profile = UserProfile {
            email: email.to_string(),
            created_by: "mock-gateway".into(),
            ..UserProfile::default()
        };
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                profile,
            },
        );
        Ok(())
    }

    /// Issue a fresh token for a valid email/password pair.
    pub fn login(&self, email: &str, password: &str) -> Result<String, BackendError> {
        let mut inner = self.write();
        match inner.accounts.get(email) {
            Some(account) if account.password == password => {
                let token = new_id();
                inner.sessions.insert(token.clone(), email.to_string());
                Ok(token)
            }
            _ => Err(BackendError::BadCredentials),
        }
    }

    /// Email of the account `token` belongs to.
    pub fn session(&self, token: &str) -> Option<String> {
        self.read().sessions.get(token).cloned()
    }

    pub fn profile(&self, email: &str) -> Result<UserProfile, BackendError> {
        self.read()
            .accounts
            .get(email)
            .map(|a| a.profile.clone())
            .ok_or(BackendError::NotFound("user"))
    }

    pub fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        old_password: &str,
    ) -> Result<(), BackendError> {
        if new_password.is_empty() {
            return Err(BackendError::InvalidRequest("new password is empty".into()));
        }
        let mut inner = self.write();
        let account = inner
            .accounts
            .get_mut(email)
            .ok_or(BackendError::NotFound("user"))?;
        if account.password != old_password {
            return Err(BackendError::InvalidRequest(
                "old password does not match".into(),
            ));
        }
        account.password = new_password.to_string();
        Ok(())
    }

    // --- Things --------------------------------------------------------------

    pub fn create_thing(&self, owner: &str, req: ThingRequest) -> Result<Thing, BackendError> {
        if req.name.is_empty() {
            return Err(BackendError::InvalidRequest("thing name is required".into()));
        }
        let thing = Thing {
            id: new_id(),
            key: new_id(),
            name: req.name,
            metadata: req.metadata,
        };
        self.write().things.insert(
            thing.id.clone(),
            Owned {
                owner: owner.to_string(),
                value: thing.clone(),
            },
        );
        Ok(thing)
    }

    pub fn things(&self, owner: &str, query: &ListQuery) -> ThingsPage {
        let inner = self.read();
        let mine = inner
            .things
            .values()
            .filter(|t| t.owner == owner)
            .map(|t| t.value.clone())
            .collect();
        let (things, total) = paginate(mine, query);
        ThingsPage { things, total }
    }

    pub fn thing(&self, owner: &str, id: &str) -> Result<Thing, BackendError> {
        self.read()
            .things
            .get(id)
            .filter(|t| t.owner == owner)
            .map(|t| t.value.clone())
            .ok_or(BackendError::NotFound("thing"))
    }

    pub fn update_thing(&self, owner: &str, id: &str, req: ThingRequest) -> Result<(), BackendError> {
        let mut inner = self.write();
        let entry = inner
            .things
            .get_mut(id)
            .filter(|t| t.owner == owner)
            .ok_or(BackendError::NotFound("thing"))?;
        entry.value.name = req.name;
        entry.value.metadata = req.metadata;
        Ok(())
    }

    /// Remove a thing and every connection it takes part in.
    pub fn delete_thing(&self, owner: &str, id: &str) -> Result<(), BackendError> {
        let mut inner = self.write();
        if !inner.things.get(id).is_some_and(|t| t.owner == owner) {
            return Err(BackendError::NotFound("thing"));
        }
        inner.things.remove(id);
        inner.connections.retain(|(_, thing_id)| thing_id != id);
        Ok(())
    }

    /// Channels connected to `thing_id`, or with `disconnected`, the
    /// caller's channels that are not.
    pub fn channels_of_thing(
        &self,
        owner: &str,
        thing_id: &str,
        query: &ListQuery,
    ) -> Result<ChannelsPage, BackendError> {
        let inner = self.read();
        if !inner.things.get(thing_id).is_some_and(|t| t.owner == owner) {
            return Err(BackendError::NotFound("thing"));
        }
        let want_connected = !query.disconnected.unwrap_or(false);
        let matching = inner
            .channels
            .values()
            .filter(|c| c.owner == owner)
            .filter(|c| {
                let linked = inner
                    .connections
                    .contains(&(c.value.id.clone(), thing_id.to_string()));
                linked == want_connected
            })
            .map(|c| c.value.clone())
            .collect();
        let (channels, total) = paginate(matching, query);
        Ok(ChannelsPage { channels, total })
    }

    // --- Channels ------------------------------------------------------------

    pub fn create_channel(&self, owner: &str, req: ChannelRequest) -> Result<Channel, BackendError> {
        if req.name.is_empty() {
            return Err(BackendError::InvalidRequest("channel name is required".into()));
        }
        let channel = Channel {
            id: new_id(),
            key: new_id(),
            name: req.name,
            metadata: req.metadata,
        };
        self.write().channels.insert(
            channel.id.clone(),
            Owned {
                owner: owner.to_string(),
                value: channel.clone(),
            },
        );
        Ok(channel)
    }

    pub fn channels(&self, owner: &str, query: &ListQuery) -> ChannelsPage {
        let inner = self.read();
        let mine = inner
            .channels
            .values()
            .filter(|c| c.owner == owner)
            .map(|c| c.value.clone())
            .collect();
        let (channels, total) = paginate(mine, query);
        ChannelsPage { channels, total }
    }

    pub fn channel(&self, owner: &str, id: &str) -> Result<Channel, BackendError> {
        self.read()
            .channels
            .get(id)
            .filter(|c| c.owner == owner)
            .map(|c| c.value.clone())
            .ok_or(BackendError::NotFound("channel"))
    }

    pub fn update_channel(
        &self,
        owner: &str,
        id: &str,
        req: ChannelRequest,
    ) -> Result<(), BackendError> {
        let mut inner = self.write();
        let entry = inner
            .channels
            .get_mut(id)
            .filter(|c| c.owner == owner)
            .ok_or(BackendError::NotFound("channel"))?;
        entry.value.name = req.name;
        entry.value.metadata = req.metadata;
        Ok(())
    }

    pub fn delete_channel(&self, owner: &str, id: &str) -> Result<(), BackendError> {
        let mut inner = self.write();
        if !inner.channels.get(id).is_some_and(|c| c.owner == owner) {
            return Err(BackendError::NotFound("channel"));
        }
        inner.channels.remove(id);
        inner.connections.retain(|(channel_id, _)| channel_id != id);
        Ok(())
    }

    /// Things connected to `channel_id`, or with `disconnected`, the
    /// caller's things that are not.
    pub fn things_of_channel(
        &self,
        owner: &str,
        channel_id: &str,
        query: &ListQuery,
    ) -> Result<ThingsPage, BackendError> {
        let inner = self.read();
        if !inner.channels.get(channel_id).is_some_and(|c| c.owner == owner) {
            return Err(BackendError::NotFound("channel"));
        }
        let want_connected = !query.disconnected.unwrap_or(false);
        let matching = inner
            .things
            .values()
            .filter(|t| t.owner == owner)
            .filter(|t| {
                let linked = inner
                    .connections
                    .contains(&(channel_id.to_string(), t.value.id.clone()));
                linked == want_connected
            })
            .map(|t| t.value.clone())
            .collect();
        let (things, total) = paginate(matching, query);
        Ok(ThingsPage { things, total })
    }

    // --- Connections ---------------------------------------------------------

    /// Connect `channel_ids[i]` to `thing_ids[i]`. All-or-nothing.
    pub fn connect(&self, owner: &str, req: &ConnectRequest) -> Result<(), BackendError> {
        if req.channel_ids.len() != req.thing_ids.len() {
            return Err(BackendError::InvalidRequest(
                "channel_ids and thing_ids differ in length".into(),
            ));
        }
        let mut inner = self.write();
        for (channel_id, thing_id) in req.pairs() {
            if !inner.channels.get(channel_id).is_some_and(|c| c.owner == owner) {
                return Err(BackendError::NotFound("channel"));
            }
            if !inner.things.get(thing_id).is_some_and(|t| t.owner == owner) {
                return Err(BackendError::NotFound("thing"));
            }
        }
        let pairs: Vec<(String, String)> = req
            .pairs()
            .map(|(c, t)| (c.to_string(), t.to_string()))
            .collect();
        inner.connections.extend(pairs);
        Ok(())
    }

    pub fn disconnect(&self, owner: &str, channel_id: &str, thing_id: &str) -> Result<(), BackendError> {
        let mut inner = self.write();
        if !inner.things.get(thing_id).is_some_and(|t| t.owner == owner) {
            return Err(BackendError::NotFound("thing"));
        }
        if !inner
            .connections
            .remove(&(channel_id.to_string(), thing_id.to_string()))
        {
            return Err(BackendError::NotFound("connection"));
        }
        Ok(())
    }

    // --- Gateways ------------------------------------------------------------

    pub fn create_gateway(
        &self,
        owner: &str,
        req: CreateGatewayRequest,
    ) -> Result<GatewayRecord, BackendError> {
        if req.name.is_empty() {
            return Err(BackendError::InvalidRequest("gateway name is required".into()));
        }
        let id = new_id();
        {
            let mut inner = self.write();
            if !inner.things.get(&req.thing_id).is_some_and(|t| t.owner == owner) {
                return Err(BackendError::NotFound("thing"));
            }
            inner.gateways.insert(
                id.clone(),
                GatewayEntry {
                    owner: owner.to_string(),
                    name: req.name,
                    description: req.description,
                    thing_id: req.thing_id,
                    status: DEFAULT_GATEWAY_STATUS.into(),
                    active_devices: 0,
                },
            );
        }
        self.gateway(owner, &id)
    }

    pub fn gateways(&self, owner: &str) -> Vec<GatewayRecord> {
        let inner = self.read();
        inner
            .gateways
            .iter()
            .filter(|(_, g)| g.owner == owner)
            .map(|(id, g)| record(&inner, id, g))
            .collect()
    }

    pub fn gateway(&self, owner: &str, id: &str) -> Result<GatewayRecord, BackendError> {
        let inner = self.read();
        inner
            .gateways
            .get(id)
            .filter(|g| g.owner == owner)
            .map(|g| record(&inner, id, g))
            .ok_or(BackendError::NotFound("gateway"))
    }

    pub fn update_gateway(
        &self,
        owner: &str,
        id: &str,
        req: UpdateGatewayRequest,
    ) -> Result<(), BackendError> {
        let mut inner = self.write();
        let entry = inner
            .gateways
            .get_mut(id)
            .filter(|g| g.owner == owner)
            .ok_or(BackendError::NotFound("gateway"))?;
        entry.name = req.name;
        entry.description = req.description;
        Ok(())
    }

    pub fn delete_gateway(&self, owner: &str, id: &str) -> Result<(), BackendError> {
        let mut inner = self.write();
        if !inner.gateways.get(id).is_some_and(|g| g.owner == owner) {
            return Err(BackendError::NotFound("gateway"));
        }
        inner.gateways.remove(id);
        Ok(())
    }

    pub fn gateway_statuses(&self, owner: &str) -> Vec<GatewayStatus> {
        self.read()
            .gateways
            .iter()
            .filter(|(_, g)| g.owner == owner)
            .map(|(id, g)| GatewayStatus {
                id: id.clone(),
                name: g.name.clone(),
                status: g.status.clone(),
            })
            .collect()
    }

    pub fn active_devices(&self, owner: &str, id: &str) -> Result<u64, BackendError> {
        self.read()
            .gateways
            .get(id)
            .filter(|g| g.owner == owner)
            .map(|g| g.active_devices)
            .ok_or(BackendError::NotFound("gateway"))
    }

    /// Simulate device traffic behind a gateway.
    pub fn set_gateway_activity(
        &self,
        id: &str,
        status: &str,
        active_devices: u64,
    ) -> Result<(), BackendError> {
        let mut inner = self.write();
        let entry = inner
            .gateways
            .get_mut(id)
            .ok_or(BackendError::NotFound("gateway"))?;
        entry.status = status.to_string();
        entry.active_devices = active_devices;
        Ok(())
    }
}

/// Wire form of a gateway, embedding its thing with string-encoded metadata.
/// A thing deleted out from under the gateway embeds as an empty shell.
fn record(inner: &Inner, id: &str, g: &GatewayEntry) -> GatewayRecord {
    let thing = match inner.things.get(&g.thing_id) {
        Some(t) => GatewayThing::from_thing(&t.value, t.owner.clone()),
        None => GatewayThing {
            id: g.thing_id.clone(),
            metadata: aiot_api::encode_metadata(&Metadata::new()),
            ..GatewayThing::default()
        },
    };
    GatewayRecord {
        id: id.to_string(),
        name: g.name.clone(),
        description: g.description.clone(),
        owner: g.owner.clone(),
        thing,
    }
}
