//! Alias: merges a previous identity into the current one.

use serde::Serialize;

use analytics_core::AppResult;

use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;
use crate::validation::require_non_empty;

/// An alias call.
///
/// `previous_id` is the old identity; the envelope's `userId` or
/// `anonymousId` is the new one. Both must be present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasMessage {
    #[serde(flatten)]
    envelope: Envelope,
    previous_id: String,
}

/// Builder for [`AliasMessage`].
pub type AliasBuilder = MessageBuilder<AliasPayload>;

/// Variant fields of an alias call being assembled.
#[derive(Debug, Clone)]
pub struct AliasPayload {
    previous_id: String,
}

impl AliasMessage {
    /// Start building an alias call from `previous_id`.
    pub fn builder(previous_id: impl Into<String>) -> AppResult<AliasBuilder> {
        let previous_id = require_non_empty(previous_id.into(), "previousId")?;
        Ok(MessageBuilder::from_payload(AliasPayload { previous_id }))
    }

    /// The identity being merged away.
    pub fn previous_id(&self) -> &str {
        &self.previous_id
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> AliasBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            AliasPayload {
                previous_id: self.previous_id.clone(),
            },
        )
    }
}

impl MessageFields for AliasMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for AliasPayload {
    type Message = AliasMessage;
    const TYPE: MessageType = MessageType::Alias;

    fn assemble(self, envelope: Envelope) -> AliasMessage {
        AliasMessage {
            envelope,
            previous_id: self.previous_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_core::ErrorKind;

    #[test]
    fn test_empty_previous_id_rejected() {
        let err = AliasMessage::builder("").expect_err("empty previous id");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(err.message.contains("previousId"));
        assert_eq!(err.message, "previousId cannot be null or empty.");
    }

    #[test]
    fn test_previous_id_does_not_satisfy_identity() {
        let err = AliasMessage::builder("anon-123")
            .expect("previous id")
            .build()
            .expect_err("no current identity");
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_alias() {
        let message = AliasMessage::builder("anon-123")
            .expect("previous id")
            .user_id("u1")
            .build()
            .expect("build");
        assert_eq!(message.message_type(), MessageType::Alias);
        assert_eq!(message.previous_id(), "anon-123");
        assert_eq!(message.envelope().user_id(), Some("u1"));
    }
}
