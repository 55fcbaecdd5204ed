//! Built-in hooks wired up from [`ClientConfig`](analytics_core::config::client::ClientConfig).

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use analytics_core::AppResult;
use analytics_messages::{EnvelopeBuilder, Message, MessageFields, MessageType};

use super::{HookResult, MessageInterceptor, MessageTransformer};

/// Applies default integration flags the message does not already set.
#[derive(Debug, Clone, Default)]
pub struct DefaultIntegrations {
    defaults: BTreeMap<String, bool>,
}

impl DefaultIntegrations {
    /// Create the transformer from name → enabled pairs.
    pub fn new(defaults: BTreeMap<String, bool>) -> Self {
        Self { defaults }
    }
}

impl MessageTransformer for DefaultIntegrations {
    fn name(&self) -> &str {
        "default-integrations"
    }

    fn transform(
        &self,
        _message_type: MessageType,
        envelope: &EnvelopeBuilder,
    ) -> AppResult<HookResult<EnvelopeBuilder>> {
        let missing: Vec<(&String, &bool)> = self
            .defaults
            .iter()
            .filter(|(name, _)| {
                !envelope
                    .get_integrations()
                    .is_some_and(|current| current.contains_key(name))
            })
            .collect();

        if missing.is_empty() {
            return Ok(HookResult::Continue);
        }

        let updated = missing
            .into_iter()
            .fold(envelope.clone(), |draft, (name, enabled)| {
                draft.enable_integration(name.clone(), *enabled)
            });
        Ok(HookResult::ContinueWith(updated))
    }
}

/// Records the sending library in `context.library`.
///
/// A `library` entry the caller already put in the context is left alone.
#[derive(Debug, Clone)]
pub struct LibraryContext {
    name: String,
    version: String,
}

impl LibraryContext {
    /// Create the interceptor for the given library name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl MessageInterceptor for LibraryContext {
    fn name(&self) -> &str {
        "library-context"
    }

    fn intercept(&self, message: &Message) -> AppResult<HookResult<Message>> {
        let context = message.envelope().context();
        if context.contains_key("library") {
            return Ok(HookResult::Continue);
        }

        let mut merged: Map<String, Value> = context.as_map().clone();
        merged.insert(
            "library".to_string(),
            json!({ "name": self.name, "version": self.version }),
        );

        let updated = message.map_envelope(|envelope| envelope.context(merged))?;
        Ok(HookResult::ContinueWith(updated))
    }
}
