//! Arguments for the create and update operations.

use aiot_api::{ChannelRequest, CreateGatewayRequest, Metadata, ThingRequest, UpdateGatewayRequest};

/// Arguments for `CreateThing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateThingInput {
    pub name: String,
    pub metadata: Metadata,
}

impl CreateThingInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(self, metadata: Metadata) -> Self {
        Self { metadata, ..self }
    }

    /// Add a single metadata entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Arguments for `UpdateThing`. Both `name` and `metadata` are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateThingInput {
    pub id: String,
    pub name: String,
    pub metadata: Metadata,
}

/// Arguments for `CreateChannel`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateChannelInput {
    pub name: String,
    pub metadata: Metadata,
}

impl CreateChannelInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(self, metadata: Metadata) -> Self {
        Self { metadata, ..self }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Arguments for `UpdateChannel`. Both `name` and `metadata` are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateChannelInput {
    pub id: String,
    pub name: String,
    pub metadata: Metadata,
}

/// Arguments for `CreateGateway`. `thing_id` must name an existing thing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGatewayInput {
    pub name: String,
    pub description: String,
    pub thing_id: String,
}

/// Arguments for `UpdateGateway`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateGatewayInput {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<CreateThingInput> for ThingRequest {
    fn from(input: CreateThingInput) -> Self {
        Self {
            name: input.name,
            metadata: input.metadata,
        }
    }
}

impl From<CreateChannelInput> for ChannelRequest {
    fn from(input: CreateChannelInput) -> Self {
        Self {
            name: input.name,
            metadata: input.metadata,
        }
    }
}

impl From<CreateGatewayInput> for CreateGatewayRequest {
    fn from(input: CreateGatewayInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            thing_id: input.thing_id,
        }
    }
}

impl UpdateThingInput {
    pub(crate) fn into_parts(self) -> (String, ThingRequest) {
        let request = ThingRequest {
            name: self.name,
            metadata: self.metadata,
        };
        (self.id, request)
    }
}

impl UpdateChannelInput {
    pub(crate) fn into_parts(self) -> (String, ChannelRequest) {
        let request = ChannelRequest {
            name: self.name,
            metadata: self.metadata,
        };
        (self.id, request)
    }
}

impl UpdateGatewayInput {
    pub(crate) fn into_parts(self) -> (String, UpdateGatewayRequest) {
        let request = UpdateGatewayRequest {
            name: self.name,
            description: self.description,
        };
        (self.id, request)
    }
}
