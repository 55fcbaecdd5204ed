//! Identify: ties a user to their actions and records who they are.

use serde::Serialize;
use serde_json::Value;

use analytics_core::AppResult;

use crate::attributes::Attributes;
use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;

/// An identify call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyMessage {
    #[serde(flatten)]
    envelope: Envelope,
    #[serde(skip_serializing_if = "Option::is_none")]
    traits: Option<Attributes>,
}

/// Builder for [`IdentifyMessage`].
pub type IdentifyBuilder = MessageBuilder<IdentifyPayload>;

/// Variant fields of an identify call being assembled.
#[derive(Debug, Clone, Default)]
pub struct IdentifyPayload {
    traits: Option<Attributes>,
}

impl IdentifyMessage {
    /// Start building an identify call. Identify has no mandatory
    /// variant field, so this cannot fail.
    pub fn builder() -> IdentifyBuilder {
        MessageBuilder::from_payload(IdentifyPayload::default())
    }

    /// Traits of the user, such as `email` or `name`.
    pub fn traits(&self) -> Option<&Attributes> {
        self.traits.as_ref()
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> IdentifyBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            IdentifyPayload {
                traits: self.traits.clone(),
            },
        )
    }
}

impl MessageFields for IdentifyMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for IdentifyPayload {
    type Message = IdentifyMessage;
    const TYPE: MessageType = MessageType::Identify;

    fn assemble(self, envelope: Envelope) -> IdentifyMessage {
        IdentifyMessage {
            envelope,
            traits: self.traits,
        }
    }
}

impl IdentifyBuilder {
    /// Set the user's traits.
    ///
    /// A JSON `null` fails with a null-reference error.
    pub fn traits(mut self, traits: impl Into<Value>) -> AppResult<Self> {
        self.payload.traits = Some(Attributes::from_payload_value("traits", traits.into())?);
        Ok(self)
    }
}
