//! Connecting things to channels.

use aiot_api::ConnectRequest;

use crate::error::{ErrorKind, Result};
use crate::paths;
use crate::transport::Endpoint;
use crate::Client;

/// Build the `/connect` body, rejecting arrays that cannot be paired up.
pub(crate) fn connect_request(
    endpoint: &Endpoint,
    channel_ids: &[String],
    thing_ids: &[String],
) -> Result<ConnectRequest> {
    if channel_ids.len() != thing_ids.len() {
        return Err(endpoint.error(ErrorKind::Validation(format!(
            "{} channel ids but {} thing ids; connect pairs them by position",
            channel_ids.len(),
            thing_ids.len()
        ))));
    }
    Ok(ConnectRequest {
        channel_ids: channel_ids.to_vec(),
        thing_ids: thing_ids.to_vec(),
    })
}

impl Client {
    /// `POST /connect`: connect `channel_ids[i]` to `thing_ids[i]` for
    /// every `i`.
    ///
    /// Arrays of different lengths are rejected before any request is sent.
    pub async fn connect(
        &self,
        token: &str,
        channel_ids: &[String],
        thing_ids: &[String],
    ) -> Result<()> {
        let endpoint = Endpoint::post("Connect", paths::CONNECT);
        let body = connect_request(&endpoint, channel_ids, thing_ids)?;
        self.call(endpoint).token(token).json(&body).send().await
    }

    /// `DELETE /thing/{thingId}/channel/{channelId}`: remove one connection.
    pub async fn disconnect(&self, token: &str, channel_id: &str, thing_id: &str) -> Result<()> {
        self.call(Endpoint::delete(
            "Disconnect",
            paths::connection(thing_id, channel_id),
        ))
        .token(token)
        .send()
        .await
    }
}
