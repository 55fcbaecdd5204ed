//! Fields shared by every message variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use analytics_core::traits::{Clock, IdGenerator};
use analytics_core::{AppError, AppResult};

use crate::attributes::Attributes;
use crate::types::MessageType;
use crate::validation::is_blank;

/// Integration key that addresses every destination at once.
pub const ALL_INTEGRATIONS: &str = "All";

/// The resolved envelope of a built message.
///
/// Only [`EnvelopeBuilder`] can produce one, so every `Envelope` has a
/// type, an id, a timestamp, and at least one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(rename = "type")]
    message_type: MessageType,
    message_id: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    context: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anonymous_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default)]
    integrations: Attributes,
}

impl Envelope {
    /// The message type.
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// The unique message id.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// When the event happened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Free-form metadata (device, library, locale, ...).
    pub fn context(&self) -> &Attributes {
        &self.context
    }

    /// Identifier for a user who is not logged in.
    pub fn anonymous_id(&self) -> Option<&str> {
        self.anonymous_id.as_deref()
    }

    /// Identifier for a known user.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Per-destination routing and settings.
    pub fn integrations(&self) -> &Attributes {
        &self.integrations
    }
}

/// Mutable draft of an [`Envelope`].
///
/// Every variant builder embeds one. Setters consume and return the
/// builder; the ones that can reject input return [`AppResult`].
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct EnvelopeBuilder {
    message_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    context: Option<Attributes>,
    anonymous_id: Option<String>,
    user_id: Option<String>,
    integrations: Option<Attributes>,
}

impl EnvelopeBuilder {
    /// An empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from every field of an existing envelope.
    pub fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            message_id: Some(envelope.message_id.clone()),
            timestamp: Some(envelope.timestamp),
            context: Some(envelope.context.clone()),
            anonymous_id: envelope.anonymous_id.clone(),
            user_id: envelope.user_id.clone(),
            integrations: Some(envelope.integrations.clone()),
        }
    }

    /// Set the message id. An empty id is rejected.
    pub fn message_id(mut self, message_id: impl Into<String>) -> AppResult<Self> {
        let message_id = message_id.into();
        if is_blank(&message_id) {
            return Err(AppError::invalid_argument(
                "messageId cannot be null or empty.",
            ));
        }
        self.message_id = Some(message_id);
        Ok(self)
    }

    /// Set when the event happened.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the context mapping. `null` and non-object values are rejected.
    pub fn context(mut self, context: impl Into<Value>) -> AppResult<Self> {
        self.context = Some(Attributes::from_envelope_value("context", context.into())?);
        Ok(self)
    }

    /// Set the anonymous id.
    pub fn anonymous_id(mut self, anonymous_id: impl Into<String>) -> Self {
        self.anonymous_id = Some(anonymous_id.into());
        self
    }

    /// Set the user id.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Replace the integrations mapping. `null` and non-object values are
    /// rejected.
    pub fn integrations(mut self, integrations: impl Into<Value>) -> AppResult<Self> {
        self.integrations = Some(Attributes::from_envelope_value(
            "integrations",
            integrations.into(),
        )?);
        Ok(self)
    }

    /// Enable or disable a single integration, keeping the others.
    pub fn enable_integration(self, name: impl Into<String>, enabled: bool) -> Self {
        self.merge_integration(name.into(), Value::Bool(enabled))
    }

    /// Attach destination-specific settings for a single integration.
    pub fn integration_options(
        self,
        name: impl Into<String>,
        options: impl Into<Value>,
    ) -> AppResult<Self> {
        let name = name.into();
        let options = Attributes::from_envelope_value(&name, options.into())?;
        Ok(self.merge_integration(name, options.to_value()))
    }

    fn merge_integration(mut self, name: String, value: Value) -> Self {
        let current = self.integrations.take().unwrap_or_default();
        self.integrations = Some(current.with_entry(name, value));
        self
    }

    /// The message id, if set.
    pub fn get_message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// The timestamp, if set.
    pub fn get_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// The context, if set.
    pub fn get_context(&self) -> Option<&Attributes> {
        self.context.as_ref()
    }

    /// The anonymous id, if set.
    pub fn get_anonymous_id(&self) -> Option<&str> {
        self.anonymous_id.as_deref()
    }

    /// The user id, if set.
    pub fn get_user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The integrations, if set.
    pub fn get_integrations(&self) -> Option<&Attributes> {
        self.integrations.as_ref()
    }

    /// Validate and fill in defaults.
    ///
    /// Fails if neither identity is present. A missing id comes from
    /// `ids`, a missing timestamp from `clock`, and missing mappings
    /// default to empty.
    pub(crate) fn resolve(
        self,
        message_type: MessageType,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
    ) -> AppResult<Envelope> {
        let has_identity = |id: &Option<String>| id.as_deref().is_some_and(|s| !is_blank(s));
        if !has_identity(&self.anonymous_id) && !has_identity(&self.user_id) {
            return Err(AppError::invalid_argument(
                "Either anonymousId or userId must be set.",
            ));
        }
        // A decoded envelope can carry an id that never went through the setter.
        if self.message_id.as_deref().is_some_and(is_blank) {
            return Err(AppError::invalid_argument(
                "messageId cannot be null or empty.",
            ));
        }

        Ok(Envelope {
            message_type,
            message_id: self.message_id.unwrap_or_else(|| ids.next_id()),
            timestamp: self.timestamp.unwrap_or_else(|| clock.now()),
            context: self.context.unwrap_or_default(),
            anonymous_id: self.anonymous_id,
            user_id: self.user_id,
            integrations: self.integrations.unwrap_or_default(),
        })
    }
}
