//! Track: records an action the user performed.

use serde::Serialize;
use serde_json::Value;

use analytics_core::AppResult;

use crate::attributes::Attributes;
use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;
use crate::validation::require_non_empty;

/// A track call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMessage {
    #[serde(flatten)]
    envelope: Envelope,
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Attributes>,
}

/// Builder for [`TrackMessage`].
pub type TrackBuilder = MessageBuilder<TrackPayload>;

/// Variant fields of a track call being assembled.
#[derive(Debug, Clone)]
pub struct TrackPayload {
    event: String,
    properties: Option<Attributes>,
}

impl TrackMessage {
    /// Start building a track call for `event`.
    ///
    /// Fails with an invalid-argument error if the event name is empty.
    pub fn builder(event: impl Into<String>) -> AppResult<TrackBuilder> {
        let event = require_non_empty(event.into(), "event")?;
        Ok(MessageBuilder::from_payload(TrackPayload {
            event,
            properties: None,
        }))
    }

    /// The name of the action, e.g. `"Purchased Item"`.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Free-form properties of the action.
    pub fn properties(&self) -> Option<&Attributes> {
        self.properties.as_ref()
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> TrackBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            TrackPayload {
                event: self.event.clone(),
                properties: self.properties.clone(),
            },
        )
    }
}

impl MessageFields for TrackMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for TrackPayload {
    type Message = TrackMessage;
    const TYPE: MessageType = MessageType::Track;

    fn assemble(self, envelope: Envelope) -> TrackMessage {
        TrackMessage {
            envelope,
            event: self.event,
            properties: self.properties,
        }
    }
}

impl TrackBuilder {
    /// Set the properties of the action.
    ///
    /// A JSON `null` fails with a null-reference error.
    pub fn properties(mut self, properties: impl Into<Value>) -> AppResult<Self> {
        self.payload.properties = Some(Attributes::from_payload_value(
            "properties",
            properties.into(),
        )?);
        Ok(self)
    }
}
