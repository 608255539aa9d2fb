//! Endpoint paths, relative to the configured gateway address.
//!
//! Identifiers are opaque to the client; they are percent-encoded when
//! placed in a path segment and otherwise left untouched.

use urlencoding::encode;

// ── User ──────────────────────────────────────────────────────────────────────

pub const LOGIN: &str = "/user/login";
pub const VERIFY: &str = "/user/verify";
pub const RESET_PASSWORD: &str = "/user/reset-password";
pub const PROFILE: &str = "/user/profile";

// ── Things ────────────────────────────────────────────────────────────────────

pub const THINGS: &str = "/thing";
pub const THINGS_LIST: &str = "/thing/list";

/// `/thing/{id}`
pub fn thing(id: &str) -> String {
    format!("/thing/{}", encode(id))
}

/// `/thing/{id}/channels`
pub fn thing_channels(id: &str) -> String {
    format!("/thing/{}/channels", encode(id))
}

/// `/thing/{thing_id}/channel/{channel_id}`
pub fn connection(thing_id: &str, channel_id: &str) -> String {
    format!("/thing/{}/channel/{}", encode(thing_id), encode(channel_id))
}

// ── Channels ──────────────────────────────────────────────────────────────────

pub const CHANNELS: &str = "/channel";
pub const CHANNELS_LIST: &str = "/channel/list";

/// `/channel/{id}`
pub fn channel(id: &str) -> String {
    format!("/channel/{}", encode(id))
}

/// `/channel/{id}/things`
pub fn channel_things(id: &str) -> String {
    format!("/channel/{}/things", encode(id))
}

pub const CONNECT: &str = "/connect";

// ── Gateways ──────────────────────────────────────────────────────────────────

pub const GATEWAYS: &str = "/gateway";
pub const GATEWAYS_LIST: &str = "/gateway/list";
pub const GATEWAYS_STATUS: &str = "/gateway/status";

/// `/gateway/{id}`
pub fn gateway(id: &str) -> String {
    format!("/gateway/{}", encode(id))
}

/// `/gateway/{id}/active-devices`
pub fn gateway_active_devices(id: &str) -> String {
    format!("/gateway/{}/active-devices", encode(id))
}

// ── Legacy family ─────────────────────────────────────────────────────────────

pub const LEGACY_USERS: &str = "/users";
pub const LEGACY_TOKENS: &str = "/tokens";
pub const LEGACY_THINGS: &str = "/things";
pub const LEGACY_THINGS_BULK: &str = "/things/bulk";
pub const LEGACY_CHANNELS: &str = "/channels";
pub const LEGACY_CHANNELS_BULK: &str = "/channels/bulk";

/// `/things/{id}`
pub fn legacy_thing(id: &str) -> String {
    format!("/things/{}", encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_are_untouched() {
        assert_eq!(thing("0192f6a4-7d1e"), "/thing/0192f6a4-7d1e");
        assert_eq!(gateway_active_devices("g-1"), "/gateway/g-1/active-devices");
    }

    #[test]
    fn connection_path_puts_thing_first() {
        assert_eq!(connection("t-1", "c-1"), "/thing/t-1/channel/c-1");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        assert_eq!(channel("a/b?c"), "/channel/a%2Fb%3Fc");
        assert_eq!(legacy_thing("x y"), "/things/x%20y");
    }
}
