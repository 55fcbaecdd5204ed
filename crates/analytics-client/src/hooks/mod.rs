//! Hooks run by [`Analytics::enqueue`](crate::Analytics::enqueue).
//!
//! Transformers see the envelope draft before the message is built.
//! Interceptors see the built message. Either can replace what it was
//! given or halt the pipeline, which drops the message.

pub mod defaults;

use std::fmt;

use analytics_core::AppResult;
use analytics_messages::{EnvelopeBuilder, Message, MessageType};

pub use defaults::{DefaultIntegrations, LibraryContext};

/// Outcome of a hook.
#[derive(Debug, Clone, PartialEq)]
pub enum HookResult<T> {
    /// Keep going with the input unchanged.
    Continue,
    /// Keep going with a replacement.
    ContinueWith(T),
    /// Stop and drop the message.
    Halt(String),
}

/// Edits or vetoes a message before it is built.
pub trait MessageTransformer: Send + Sync + fmt::Debug + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Inspect the envelope draft of a `message_type` message.
    fn transform(
        &self,
        message_type: MessageType,
        envelope: &EnvelopeBuilder,
    ) -> AppResult<HookResult<EnvelopeBuilder>>;
}

/// Replaces or vetoes a built message before it reaches the sink.
pub trait MessageInterceptor: Send + Sync + fmt::Debug + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Inspect a built message.
    fn intercept(&self, message: &Message) -> AppResult<HookResult<Message>>;
}
