//! Screen: records that a user saw a screen of a mobile app.

use serde::Serialize;
use serde_json::Value;

use analytics_core::AppResult;

use crate::attributes::Attributes;
use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;
use crate::validation::require_non_empty;

/// A screen call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMessage {
    #[serde(flatten)]
    envelope: Envelope,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Attributes>,
}

/// Builder for [`ScreenMessage`].
pub type ScreenBuilder = MessageBuilder<ScreenPayload>;

/// Variant fields of a screen call being assembled.
#[derive(Debug, Clone)]
pub struct ScreenPayload {
    name: String,
    properties: Option<Attributes>,
}

impl ScreenMessage {
    /// Start building a screen call for the screen called `name`.
    pub fn builder(name: impl Into<String>) -> AppResult<ScreenBuilder> {
        let name = require_non_empty(name.into(), "screen name")?;
        Ok(MessageBuilder::from_payload(ScreenPayload {
            name,
            properties: None,
        }))
    }

    /// The name of the screen the user is on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Information describing the screen.
    pub fn properties(&self) -> Option<&Attributes> {
        self.properties.as_ref()
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> ScreenBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            ScreenPayload {
                name: self.name.clone(),
                properties: self.properties.clone(),
            },
        )
    }
}

impl MessageFields for ScreenMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for ScreenPayload {
    type Message = ScreenMessage;
    const TYPE: MessageType = MessageType::Screen;

    fn assemble(self, envelope: Envelope) -> ScreenMessage {
        ScreenMessage {
            envelope,
            name: self.name,
            properties: self.properties,
        }
    }
}

impl ScreenBuilder {
    /// Set information that describes the screen.
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

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_null_properties_is_null_reference_not_invalid_argument() {
        let err = ScreenMessage::builder("Home")
            .expect("name")
            .properties(Value::Null)
            .expect_err("null properties");
        assert_eq!(err.kind, ErrorKind::NullReference);
        assert_ne!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.message, "Null properties");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ScreenMessage::builder("").expect_err("empty name");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.message, "screen name cannot be null or empty.");
    }

    #[test]
    fn test_build() {
        let message = ScreenMessage::builder("Home")
            .expect("name")
            .anonymous_id("a1")
            .properties(json!({ "tab": "feed" }))
            .expect("properties")
            .build()
            .expect("build");

        assert_eq!(message.message_type(), MessageType::Screen);
        assert_eq!(message.name(), "Home");
        assert_eq!(
            message.properties().and_then(|p| p.get("tab")),
            Some(&json!("feed"))
        );
    }
}
