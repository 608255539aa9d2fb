//! Gateway operations.
//!
//! Gateway records embed their thing's metadata as a JSON string; every read
//! here decodes that string, so a malformed record is a `Decode` error of
//! the operation that fetched it.

use aiot_api::{
    ActiveDeviceCount, CreateGatewayRequest, Gateway, GatewayRecord, GatewayStatus,
    GatewayStatusResponse, GatewaysResponse,
};

use crate::error::{ErrorKind, Result};
use crate::input::{CreateGatewayInput, UpdateGatewayInput};
use crate::paths;
use crate::transport::{Endpoint, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::Client;

fn flatten(endpoint: &Endpoint, record: GatewayRecord) -> Result<Gateway> {
    Gateway::try_from(record).map_err(|e| endpoint.error(ErrorKind::Decode(e.into_inner())))
}

impl Client {
    /// `POST /gateway`: create a gateway on top of an existing thing.
    pub async fn create_gateway(&self, token: &str, input: CreateGatewayInput) -> Result<()> {
        self.call(Endpoint::post("CreateGateway", paths::GATEWAYS).accepting(OK_OR_CREATED))
            .token(token)
            .json(&CreateGatewayRequest::from(input))
            .send()
            .await
    }

    /// `GET /gateway/list`: every gateway visible to the caller.
    pub async fn list_gateways(&self, token: &str) -> Result<Vec<Gateway>> {
        let endpoint = Endpoint::get("ListGateway", paths::GATEWAYS_LIST);
        let resp: GatewaysResponse = self.call(endpoint.clone()).token(token).fetch().await?;
        resp.gateways
            .into_iter()
            .map(|record| flatten(&endpoint, record))
            .collect()
    }

    /// `GET /gateway/{id}`.
    pub async fn gateway_profile(&self, token: &str, gateway_id: &str) -> Result<Gateway> {
        let endpoint = Endpoint::get("GatewayProfile", paths::gateway(gateway_id));
        let record: GatewayRecord = self.call(endpoint.clone()).token(token).fetch().await?;
        flatten(&endpoint, record)
    }

    /// `PUT /gateway/{id}`: replace name and description.
    pub async fn update_gateway(&self, token: &str, input: UpdateGatewayInput) -> Result<()> {
        let (id, body) = input.into_parts();
        self.call(Endpoint::put("UpdateGateway", paths::gateway(&id)))
            .token(token)
            .json(&body)
            .send()
            .await
    }

    /// `DELETE /gateway/{id}`. The underlying thing is left in place.
    pub async fn delete_gateway(&self, token: &str, gateway_id: &str) -> Result<()> {
        self.call(
            Endpoint::delete("DeleteGateway", paths::gateway(gateway_id))
                .accepting(OK_OR_NO_CONTENT),
        )
        .token(token)
        .send()
        .await
    }

    /// `GET /gateway/status`: connectivity of every gateway.
    pub async fn gateway_statuses(&self, token: &str) -> Result<Vec<GatewayStatus>> {
        let resp: GatewayStatusResponse = self
            .call(Endpoint::get("GatewayStatus", paths::GATEWAYS_STATUS))
            .token(token)
            .fetch()
            .await?;
        Ok(resp.statuses)
    }

    /// `GET /gateway/{id}/active-devices`: number of devices currently
    /// online behind the gateway.
    pub async fn gateway_active_device_count(&self, token: &str, gateway_id: &str) -> Result<u64> {
        let resp: ActiveDeviceCount = self
            .call(Endpoint::get(
                "GatewayActiveDeviceCount",
                paths::gateway_active_devices(gateway_id),
            ))
            .token(token)
            .fetch()
            .await?;
        Ok(resp.count)
    }
}
