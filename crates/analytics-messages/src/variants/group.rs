//! Group: associates a user with a company, organization, or team.

use serde::Serialize;
use serde_json::Value;

use analytics_core::AppResult;

use crate::attributes::Attributes;
use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;
use crate::validation::require_non_empty;

/// A group call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    #[serde(flatten)]
    envelope: Envelope,
    group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    traits: Option<Attributes>,
}

/// Builder for [`GroupMessage`].
pub type GroupBuilder = MessageBuilder<GroupPayload>;

/// Variant fields of a group call being assembled.
#[derive(Debug, Clone)]
pub struct GroupPayload {
    group_id: String,
    traits: Option<Attributes>,
}

impl GroupMessage {
    /// Start building a group call for `group_id`.
    pub fn builder(group_id: impl Into<String>) -> AppResult<GroupBuilder> {
        let group_id = require_non_empty(group_id.into(), "groupId")?;
        Ok(MessageBuilder::from_payload(GroupPayload {
            group_id,
            traits: None,
        }))
    }

    /// The group's identifier.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Traits of the group, such as `name` or `employees`.
    pub fn traits(&self) -> Option<&Attributes> {
        self.traits.as_ref()
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> GroupBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            GroupPayload {
                group_id: self.group_id.clone(),
                traits: self.traits.clone(),
            },
        )
    }
}

impl MessageFields for GroupMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for GroupPayload {
    type Message = GroupMessage;
    const TYPE: MessageType = MessageType::Group;

    fn assemble(self, envelope: Envelope) -> GroupMessage {
        GroupMessage {
            envelope,
            group_id: self.group_id,
            traits: self.traits,
        }
    }
}

impl GroupBuilder {
    /// Set the group's traits.
    ///
    /// A JSON `null` fails with a null-reference error.
    pub fn traits(mut self, traits: impl Into<Value>) -> AppResult<Self> {
        self.payload.traits = Some(Attributes::from_payload_value("traits", traits.into())?);
        Ok(self)
    }
}
