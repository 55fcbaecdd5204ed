//! Generic message builder shared by all variants.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use analytics_core::AppResult;
use analytics_core::traits::{Clock, IdGenerator, SystemClock, UuidGenerator};

use crate::envelope::{Envelope, EnvelopeBuilder};
use crate::message::{Message, MessageFields};
use crate::types::MessageType;

/// The clock and id generator a builder falls back on when the caller
/// leaves `timestamp` or `messageId` unset.
#[derive(Debug, Clone)]
pub struct Providers {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Providers {
    /// Create providers from explicit implementations.
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and random UUIDs.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// The clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The id generator.
    pub fn id_generator(&self) -> &Arc<dyn IdGenerator> {
        &self.ids
    }
}

impl Default for Providers {
    fn default() -> Self {
        Self::system()
    }
}

/// Variant-specific half of a builder.
///
/// Implemented by each variant's payload draft. The variant's mandatory
/// fields are already validated by the time a payload exists.
pub trait Payload: fmt::Debug + Clone + Send + Sized + 'static {
    /// The frozen message this payload assembles into.
    type Message: MessageFields + Into<Message>;

    /// The type stamped on the envelope.
    const TYPE: MessageType;

    /// Combine the resolved envelope with the variant fields.
    fn assemble(self, envelope: Envelope) -> Self::Message;
}

/// Fluent builder for one message of variant `P`.
///
/// Obtain one from the variant's `builder` constructor (or `to_builder`
/// on an existing message). [`build`](Self::build) consumes it.
#[derive(Debug, Clone)]
#[must_use]
pub struct MessageBuilder<P: Payload> {
    pub(crate) envelope: EnvelopeBuilder,
    pub(crate) payload: P,
    providers: Providers,
}

impl<P: Payload> MessageBuilder<P> {
    pub(crate) fn from_payload(payload: P) -> Self {
        Self {
            envelope: EnvelopeBuilder::new(),
            payload,
            providers: Providers::default(),
        }
    }

    pub(crate) fn rehydrate(envelope: &Envelope, payload: P) -> Self {
        Self {
            envelope: EnvelopeBuilder::from_envelope(envelope),
            payload,
            providers: Providers::default(),
        }
    }

    /// The type of message this builder produces.
    pub fn message_type(&self) -> MessageType {
        P::TYPE
    }

    /// The envelope fields set so far.
    pub fn envelope(&self) -> &EnvelopeBuilder {
        &self.envelope
    }

    /// Replace the envelope draft wholesale.
    pub fn with_envelope(mut self, envelope: EnvelopeBuilder) -> Self {
        self.envelope = envelope;
        self
    }

    fn try_envelope(
        mut self,
        f: impl FnOnce(EnvelopeBuilder) -> AppResult<EnvelopeBuilder>,
    ) -> AppResult<Self> {
        self.envelope = f(self.envelope)?;
        Ok(self)
    }

    /// Set the message id. An empty id is rejected.
    pub fn message_id(self, message_id: impl Into<String>) -> AppResult<Self> {
        self.try_envelope(|e| e.message_id(message_id))
    }

    /// Set when the event happened.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.envelope = self.envelope.timestamp(timestamp);
        self
    }

    /// Set the context mapping.
    pub fn context(self, context: impl Into<Value>) -> AppResult<Self> {
        self.try_envelope(|e| e.context(context))
    }

    /// Set the anonymous id.
    pub fn anonymous_id(mut self, anonymous_id: impl Into<String>) -> Self {
        self.envelope = self.envelope.anonymous_id(anonymous_id);
        self
    }

    /// Set the user id.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.envelope = self.envelope.user_id(user_id);
        self
    }

    /// Replace the integrations mapping.
    pub fn integrations(self, integrations: impl Into<Value>) -> AppResult<Self> {
        self.try_envelope(|e| e.integrations(integrations))
    }

    /// Enable or disable a single integration.
    pub fn enable_integration(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.envelope = self.envelope.enable_integration(name, enabled);
        self
    }

    /// Attach settings for a single integration.
    pub fn integration_options(
        self,
        name: impl Into<String>,
        options: impl Into<Value>,
    ) -> AppResult<Self> {
        self.try_envelope(|e| e.integration_options(name, options))
    }

    /// Use these providers for generated defaults.
    pub fn providers(mut self, providers: Providers) -> Self {
        self.providers = providers;
        self
    }

    /// Use this clock for a defaulted timestamp.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.providers.clock = clock;
        self
    }

    /// Use this generator for a defaulted message id.
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.providers.ids = ids;
        self
    }

    /// Validate the envelope, fill in defaults, and freeze the message.
    pub fn build(self) -> AppResult<P::Message> {
        let envelope = self.envelope.resolve(
            P::TYPE,
            self.providers.clock.as_ref(),
            self.providers.ids.as_ref(),
        )?;
        Ok(self.payload.assemble(envelope))
    }

    /// Build and wrap in [`Message`].
    pub fn build_message(self) -> AppResult<Message> {
        self.build().map(Into::into)
    }
}
