//! Integration tests for the client facade and its sinks.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use analytics_client::{
    Analytics, HookResult, JsonLinesSink, MemorySink, MessageInterceptor, MessageSink,
    MessageTransformer,
};
use analytics_core::config::AnalyticsConfig;
use analytics_core::{AppError, AppResult, ErrorKind};
use analytics_messages::{
    EnvelopeBuilder, GroupMessage, IdentifyMessage, Message, MessageFields, MessageType,
    PageMessage, TrackMessage,
};

const CONFIG: &str = r#"
[client]
write_key = "wk_integration"
library_name = "analytics-it"
library_version = "1.2.3"

[client.default_integrations]
amplitude = false
mixpanel = true
"#;

/// Fills in an anonymous id when the caller gave no identity.
#[derive(Debug)]
struct AnonymousFallback;

impl MessageTransformer for AnonymousFallback {
    fn name(&self) -> &str {
        "anonymous-fallback"
    }

    fn transform(
        &self,
        _message_type: MessageType,
        envelope: &EnvelopeBuilder,
    ) -> AppResult<HookResult<EnvelopeBuilder>> {
        if envelope.get_user_id().is_some() || envelope.get_anonymous_id().is_some() {
            return Ok(HookResult::Continue);
        }
        Ok(HookResult::ContinueWith(
            envelope.clone().anonymous_id("anon-fallback"),
        ))
    }
}

/// Drops page views.
#[derive(Debug)]
struct NoPages;

impl MessageInterceptor for NoPages {
    fn name(&self) -> &str {
        "no-pages"
    }

    fn intercept(&self, message: &Message) -> AppResult<HookResult<Message>> {
        if message.message_type() == MessageType::Page {
            return Ok(HookResult::Halt("page views are disabled".to_string()));
        }
        Ok(HookResult::Continue)
    }
}

#[derive(Debug)]
struct FailingSink;

#[async_trait]
impl MessageSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send(&self, _message: Message) -> AppResult<()> {
        Err(AppError::sink("upstream unavailable"))
    }
}

#[tokio::test]
async fn test_from_config_applies_defaults() {
    let config = AnalyticsConfig::from_toml_str(CONFIG).expect("config");
    config.validate().expect("valid");

    let sink = MemorySink::new();
    let analytics = Analytics::from_config(&config.client, Arc::new(sink.clone())).expect("client");

    analytics
        .enqueue(
            TrackMessage::builder("Clicked")
                .expect("event")
                .user_id("u1")
                .enable_integration("mixpanel", false),
        )
        .await
        .expect("enqueue");
    analytics
        .enqueue(
            GroupMessage::builder("acme")
                .expect("group")
                .user_id("u1")
                .context(json!({ "library": { "name": "custom" } }))
                .expect("context"),
        )
        .await
        .expect("enqueue");

    let messages = sink.drain().await;
    assert_eq!(messages.len(), 2);

    let track = messages[0].envelope();
    assert_eq!(track.integrations().get("mixpanel"), Some(&json!(false)));
    assert_eq!(track.integrations().get("amplitude"), Some(&json!(false)));
    assert_eq!(
        track.context().get("library"),
        Some(&json!({ "name": "analytics-it", "version": "1.2.3" }))
    );

    let group = messages[1].envelope();
    assert_eq!(group.integrations().get("mixpanel"), Some(&json!(true)));
    assert_eq!(
        group.context().get("library"),
        Some(&json!({ "name": "custom" }))
    );
}

#[tokio::test]
async fn test_hooks_run_in_pipeline_order() {
    let sink = MemorySink::new();
    let analytics = Analytics::builder("wk_hooks")
        .clock(helpers::fixed_providers().clock().clone())
        .transformer(Arc::new(AnonymousFallback))
        .interceptor(Arc::new(NoPages))
        .sink(Arc::new(sink.clone()))
        .build()
        .expect("client");

    let sent = analytics
        .enqueue(IdentifyMessage::builder().traits(json!({ "plan": "free" })).expect("traits"))
        .await
        .expect("identity supplied by transformer");
    assert!(sent);

    let sent = analytics
        .enqueue(PageMessage::builder("Pricing").expect("name").user_id("u1"))
        .await
        .expect("enqueue");
    assert!(!sent);

    let messages = sink.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].envelope().anonymous_id(), Some("anon-fallback"));
    assert_eq!(messages[0].envelope().timestamp(), helpers::fixed_instant());
}

#[tokio::test]
async fn test_sink_failure_propagates() {
    let analytics = Analytics::builder("wk_fail")
        .sink(Arc::new(FailingSink))
        .build()
        .expect("client");

    let err = analytics
        .enqueue(TrackMessage::builder("Clicked").expect("event").user_id("u1"))
        .await
        .expect_err("sink failure");
    assert_eq!(err.kind, ErrorKind::Sink);
}

#[tokio::test]
async fn test_json_lines_output_decodes() {
    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let analytics = Analytics::builder("wk_lines")
        .sink(sink.clone())
        .build()
        .expect("client");

    let providers = helpers::fixed_providers();
    for message_type in MessageType::ALL {
        let message = helpers::build_variant(message_type, helpers::Identity::User, &providers)
            .expect("build");
        let sent = match message {
            Message::Identify(m) => analytics.enqueue(m.to_builder()).await,
            Message::Track(m) => analytics.enqueue(m.to_builder()).await,
            Message::Screen(m) => analytics.enqueue(m.to_builder()).await,
            Message::Page(m) => analytics.enqueue(m.to_builder()).await,
            Message::Group(m) => analytics.enqueue(m.to_builder()).await,
            Message::Alias(m) => analytics.enqueue(m.to_builder()).await,
        };
        assert!(sent.expect("enqueue"));
    }
    drop(analytics);

    let sink = Arc::try_unwrap(sink).expect("sole owner");
    let text = String::from_utf8(sink.into_inner().expect("writer")).expect("utf8");
    let decoded: Vec<Message> = text
        .lines()
        .map(|line| line.parse().expect("decode"))
        .collect();
    let types: Vec<MessageType> = decoded.iter().map(|m| m.message_type()).collect();
    assert_eq!(types, MessageType::ALL.to_vec());
}

#[tokio::test]
async fn test_concurrent_enqueue() {
    let sink = MemorySink::new();
    let analytics = Analytics::builder("wk_concurrent")
        .sink(Arc::new(sink.clone()))
        .build()
        .expect("client");

    let mut handles = Vec::new();
    for i in 0..16 {
        let analytics = analytics.clone();
        handles.push(tokio::spawn(async move {
            analytics
                .enqueue(
                    TrackMessage::builder(format!("Event {i}"))
                        .expect("event")
                        .anonymous_id(format!("anon-{i}")),
                )
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await.expect("join").expect("enqueue"));
    }

    let ids: HashSet<String> = sink
        .messages()
        .await
        .iter()
        .map(|m| m.envelope().message_id().to_string())
        .collect();
    assert_eq!(ids.len(), 16);
}
