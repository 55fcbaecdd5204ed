//! The `Analytics` facade.

use std::sync::Arc;

use tracing::{debug, error};
use validator::Validate;

use analytics_core::config::client::ClientConfig;
use analytics_core::traits::{Clock, IdGenerator};
use analytics_core::{AppError, AppResult};
use analytics_messages::{Message, MessageBuilder, MessageFields, Payload, Providers};

use crate::hooks::{
    DefaultIntegrations, HookResult, LibraryContext, MessageInterceptor, MessageTransformer,
};
use crate::sink::MessageSink;

/// Entry point for sending analytics messages.
///
/// Cheap to clone; clones share hooks, providers, and the sink.
#[derive(Debug, Clone)]
pub struct Analytics {
    write_key: String,
    providers: Providers,
    transformers: Arc<[Arc<dyn MessageTransformer>]>,
    interceptors: Arc<[Arc<dyn MessageInterceptor>]>,
    sink: Arc<dyn MessageSink>,
}

impl Analytics {
    /// Start configuring a client for `write_key`.
    pub fn builder(write_key: impl Into<String>) -> AnalyticsBuilder {
        AnalyticsBuilder {
            write_key: write_key.into(),
            providers: Providers::default(),
            transformers: Vec::new(),
            interceptors: Vec::new(),
            sink: None,
        }
    }

    /// Build a client from validated configuration.
    ///
    /// Installs [`DefaultIntegrations`] when the configuration names any,
    /// and always installs [`LibraryContext`].
    pub fn from_config(config: &ClientConfig, sink: Arc<dyn MessageSink>) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Self::builder(config.write_key.clone()).sink(sink);
        if !config.default_integrations.is_empty() {
            builder = builder.transformer(Arc::new(DefaultIntegrations::new(
                config.default_integrations.clone(),
            )));
        }
        builder
            .interceptor(Arc::new(LibraryContext::new(
                config.library_name.clone(),
                config.library_version.clone(),
            )))
            .build()
    }

    /// The write key this client sends on behalf of.
    pub fn write_key(&self) -> &str {
        &self.write_key
    }

    /// Run the hook pipeline on `builder` and hand the result to the sink.
    ///
    /// Returns `Ok(false)` if a hook dropped the message and `Ok(true)`
    /// once the sink accepted it. Validation failures from `build` and
    /// sink failures are returned as errors.
    pub async fn enqueue<P: Payload>(&self, builder: MessageBuilder<P>) -> AppResult<bool> {
        let message_type = builder.message_type();
        let mut builder = builder.providers(self.providers.clone());

        for transformer in self.transformers.iter() {
            match transformer.transform(message_type, builder.envelope())? {
                HookResult::Continue => {}
                HookResult::ContinueWith(envelope) => builder = builder.with_envelope(envelope),
                HookResult::Halt(reason) => {
                    debug!(
                        transformer = transformer.name(),
                        %message_type,
                        %reason,
                        "Message dropped by transformer"
                    );
                    return Ok(false);
                }
            }
        }

        let mut message: Message = builder.build_message()?;

        for interceptor in self.interceptors.iter() {
            match interceptor.intercept(&message)? {
                HookResult::Continue => {}
                HookResult::ContinueWith(replacement) => message = replacement,
                HookResult::Halt(reason) => {
                    debug!(
                        interceptor = interceptor.name(),
                        message_id = message.envelope().message_id(),
                        %reason,
                        "Message dropped by interceptor"
                    );
                    return Ok(false);
                }
            }
        }

        let message_id = message.envelope().message_id().to_string();
        if let Err(e) = self.sink.send(message).await {
            error!(
                sink = self.sink.name(),
                %message_id,
                "Failed to enqueue message: {}",
                e
            );
            return Err(e);
        }

        debug!(
            sink = self.sink.name(),
            %message_type,
            %message_id,
            "Enqueued message"
        );
        Ok(true)
    }
}

/// Fluent configuration for [`Analytics`].
#[derive(Debug)]
#[must_use]
pub struct AnalyticsBuilder {
    write_key: String,
    providers: Providers,
    transformers: Vec<Arc<dyn MessageTransformer>>,
    interceptors: Vec<Arc<dyn MessageInterceptor>>,
    sink: Option<Arc<dyn MessageSink>>,
}

impl AnalyticsBuilder {
    /// Clock used for messages without an explicit timestamp.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.providers = Providers::new(clock, self.providers.id_generator().clone());
        self
    }

    /// Generator used for messages without an explicit id.
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.providers = Providers::new(self.providers.clock().clone(), ids);
        self
    }

    /// Append a transformer. Transformers run in insertion order.
    pub fn transformer(mut self, transformer: Arc<dyn MessageTransformer>) -> Self {
        self.transformers.push(transformer);
        self
    }

    /// Append an interceptor. Interceptors run in insertion order.
    pub fn interceptor(mut self, interceptor: Arc<dyn MessageInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Destination for built messages.
    pub fn sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Finish configuration.
    pub fn build(self) -> AppResult<Analytics> {
        if self.write_key.trim().is_empty() {
            return Err(AppError::invalid_argument(
                "writeKey cannot be null or empty.",
            ));
        }
        let sink = self
            .sink
            .ok_or_else(|| AppError::invalid_argument("a message sink must be provided."))?;

        Ok(Analytics {
            write_key: self.write_key,
            providers: self.providers,
            transformers: self.transformers.into(),
            interceptors: self.interceptors.into(),
            sink,
        })
    }
}
