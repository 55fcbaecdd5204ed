//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use analytics_core::AppResult;
use analytics_core::traits::{FixedClock, SequentialIdGenerator};
use analytics_messages::{
    AliasMessage, GroupMessage, IdentifyMessage, Message, MessageBuilder, MessageType,
    PageMessage, Payload, Providers, ScreenMessage, TrackMessage,
};

/// Which identity fields a test message carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Neither id
    Missing,
    /// `userId` only
    User,
    /// `anonymousId` only
    Anonymous,
    /// Both ids
    Both,
}

/// Instant every fixed clock in these tests reports
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap()
}

/// Providers with a fixed clock and a fresh sequential id generator
pub fn fixed_providers() -> Providers {
    Providers::new(
        Arc::new(FixedClock::new(fixed_instant())),
        Arc::new(SequentialIdGenerator::new("it")),
    )
}

fn with_identity<P: Payload>(mut builder: MessageBuilder<P>, identity: Identity) -> MessageBuilder<P> {
    if matches!(identity, Identity::User | Identity::Both) {
        builder = builder.user_id("user-1");
    }
    if matches!(identity, Identity::Anonymous | Identity::Both) {
        builder = builder.anonymous_id("anon-1");
    }
    builder
}

fn finish<P: Payload>(
    builder: MessageBuilder<P>,
    identity: Identity,
    providers: &Providers,
) -> AppResult<Message> {
    with_identity(builder, identity)
        .providers(providers.clone())
        .build_message()
}

/// Build a representative message of `message_type`
pub fn build_variant(
    message_type: MessageType,
    identity: Identity,
    providers: &Providers,
) -> AppResult<Message> {
    match message_type {
        MessageType::Identify => finish(
            IdentifyMessage::builder().traits(json!({ "plan": "pro" }))?,
            identity,
            providers,
        ),
        MessageType::Track => finish(
            TrackMessage::builder("Signed Up")?.properties(json!({ "source": "ads" }))?,
            identity,
            providers,
        ),
        MessageType::Screen => finish(
            ScreenMessage::builder("Settings")?.properties(json!({ "tab": "privacy" }))?,
            identity,
            providers,
        ),
        MessageType::Page => finish(
            PageMessage::builder("Pricing")?.properties(json!({ "path": "/pricing" }))?,
            identity,
            providers,
        ),
        MessageType::Group => finish(
            GroupMessage::builder("acme")?.traits(json!({ "employees": 120 }))?,
            identity,
            providers,
        ),
        MessageType::Alias => finish(AliasMessage::builder("old-id")?, identity, providers),
    }
}

/// Try to start a builder of `message_type` with `required` as its
/// mandatory argument. Identify has none and always succeeds.
pub fn start_with_required(message_type: MessageType, required: &str) -> AppResult<()> {
    match message_type {
        MessageType::Identify => {
            let _ = IdentifyMessage::builder();
        }
        MessageType::Track => {
            TrackMessage::builder(required)?;
        }
        MessageType::Screen => {
            ScreenMessage::builder(required)?;
        }
        MessageType::Page => {
            PageMessage::builder(required)?;
        }
        MessageType::Group => {
            GroupMessage::builder(required)?;
        }
        MessageType::Alias => {
            AliasMessage::builder(required)?;
        }
    }
    Ok(())
}
