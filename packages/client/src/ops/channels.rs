//! Channel operations.

use aiot_api::{Channel, ChannelRequest, ChannelsPage, ThingsPage};

use super::Page;
use crate::error::Result;
use crate::input::{CreateChannelInput, UpdateChannelInput};
use crate::options::{ListChannelsByUserOptions, ListThingsByChannelOptions};
use crate::paths;
use crate::transport::{Endpoint, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::{Client, Thing};

impl Client {
    /// `POST /channel`: create a channel and return it with its assigned
    /// `id` and `key`.
    pub async fn create_channel(&self, token: &str, input: CreateChannelInput) -> Result<Channel> {
        self.call(Endpoint::post("CreateChannel", paths::CHANNELS).accepting(OK_OR_CREATED))
            .token(token)
            .json(&ChannelRequest::from(input))
            .fetch()
            .await
    }

    /// `GET /channel/list`: one page of the caller's channels.
    pub async fn list_channels_by_user(
        &self,
        token: &str,
        options: &ListChannelsByUserOptions,
    ) -> Result<Page<Channel>> {
        let page: ChannelsPage = self
            .call(Endpoint::get("ListChannelsByUser", paths::CHANNELS_LIST))
            .token(token)
            .query(options.to_query())
            .fetch()
            .await?;
        Ok(page.into())
    }

    /// `GET /channel/{id}`.
    pub async fn channel_profile(&self, token: &str, channel_id: &str) -> Result<Channel> {
        self.call(Endpoint::get("ChannelProfile", paths::channel(channel_id)))
            .token(token)
            .fetch()
            .await
    }

    /// `PUT /channel/{id}`: replace the channel's name and metadata.
    pub async fn update_channel(&self, token: &str, input: UpdateChannelInput) -> Result<()> {
        let (id, body) = input.into_parts();
        self.call(Endpoint::put("UpdateChannel", paths::channel(&id)))
            .token(token)
            .json(&body)
            .send()
            .await
    }

    /// `DELETE /channel/{id}`. Absent channels yield a not-found error.
    pub async fn delete_channel(&self, token: &str, channel_id: &str) -> Result<()> {
        self.call(
            Endpoint::delete("DeleteChannel", paths::channel(channel_id))
                .accepting(OK_OR_NO_CONTENT),
        )
        .token(token)
        .send()
        .await
    }

    /// `GET /channel/{id}/things`: things connected to a channel, or with
    /// `disconnected` set, the things that are not.
    pub async fn list_things_by_channel(
        &self,
        token: &str,
        channel_id: &str,
        options: &ListThingsByChannelOptions,
    ) -> Result<Page<Thing>> {
        let page: ThingsPage = self
            .call(Endpoint::get("ListThingsByChannel", paths::channel_things(channel_id)))
            .token(token)
            .query(options.to_query())
            .fetch()
            .await?;
        Ok(page.into())
    }
}
