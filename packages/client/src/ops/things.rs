//! Thing operations.

use aiot_api::{ChannelsPage, Thing, ThingRequest, ThingsPage};

use super::Page;
use crate::error::Result;
use crate::input::{CreateThingInput, UpdateThingInput};
use crate::options::{ListChannelsByThingOptions, ListThingsByUserOptions};
use crate::paths;
use crate::transport::{Endpoint, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::{Channel, Client};

impl Client {
    /// `POST /thing`: register a thing and return it with its assigned
    /// `id` and `key`.
    pub async fn create_thing(&self, token: &str, input: CreateThingInput) -> Result<Thing> {
        self.call(Endpoint::post("CreateThing", paths::THINGS).accepting(OK_OR_CREATED))
            .token(token)
            .json(&ThingRequest::from(input))
            .fetch()
            .await
    }

    /// `GET /thing/list`: one page of the caller's things.
    pub async fn list_things_by_user(
        &self,
        token: &str,
        options: &ListThingsByUserOptions,
    ) -> Result<Page<Thing>> {
        let page: ThingsPage = self
            .call(Endpoint::get("ListThingsByUser", paths::THINGS_LIST))
            .token(token)
            .query(options.to_query())
            .fetch()
            .await?;
        Ok(page.into())
    }

    /// `GET /thing/{id}`.
    pub async fn thing_profile(&self, token: &str, thing_id: &str) -> Result<Thing> {
        self.call(Endpoint::get("ThingProfile", paths::thing(thing_id)))
            .token(token)
            .fetch()
            .await
    }

    /// `PUT /thing/{id}`: replace the thing's name and metadata.
    pub async fn update_thing(&self, token: &str, input: UpdateThingInput) -> Result<()> {
        let (id, body) = input.into_parts();
        self.call(Endpoint::put("UpdateThing", paths::thing(&id)))
            .token(token)
            .json(&body)
            .send()
            .await
    }

    /// `DELETE /thing/{id}`.
    ///
    /// Deleting a thing that does not exist is an error
    /// ([`crate::Error::is_not_found`]), not a no-op.
    pub async fn delete_thing(&self, token: &str, thing_id: &str) -> Result<()> {
        self.call(
            Endpoint::delete("DeleteThing", paths::thing(thing_id)).accepting(OK_OR_NO_CONTENT),
        )
        .token(token)
        .send()
        .await
    }

    /// `GET /thing/{id}/channels`: channels connected to a thing, or with
    /// `disconnected` set, the channels it is not connected to.
    pub async fn list_channels_by_thing(
        &self,
        token: &str,
        thing_id: &str,
        options: &ListChannelsByThingOptions,
    ) -> Result<Page<Channel>> {
        let page: ChannelsPage = self
            .call(Endpoint::get("ListChannelsByThing", paths::thing_channels(thing_id)))
            .token(token)
            .query(options.to_query())
            .fetch()
            .await?;
        Ok(page.into())
    }
}
