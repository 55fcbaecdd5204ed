//! Integration tests for message building and decoding.

mod helpers;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use analytics_core::ErrorKind;
use analytics_core::traits::FixedClock;
use analytics_messages::{
    AliasMessage, IdentifyMessage, Message, MessageFields, MessageType,
    ScreenMessage, TrackMessage,
};
use helpers::Identity;

#[test]
fn test_every_variant_requires_identity() {
    let providers = helpers::fixed_providers();
    for message_type in MessageType::ALL {
        let err = helpers::build_variant(message_type, Identity::Missing, &providers)
            .expect_err("identity is required");
        assert_eq!(err.kind, ErrorKind::InvalidArgument, "{message_type}");
        assert!(err.message.contains("anonymousId or userId"));

        for identity in [Identity::User, Identity::Anonymous, Identity::Both] {
            let message = helpers::build_variant(message_type, identity, &providers)
                .unwrap_or_else(|e| panic!("{message_type} with {identity:?}: {e}"));
            assert_eq!(message.message_type(), message_type);
        }
    }
}

#[test]
fn test_required_arguments_reject_empty() {
    for message_type in MessageType::ALL {
        if message_type == MessageType::Identify {
            assert!(helpers::start_with_required(message_type, "").is_ok());
            continue;
        }
        for blank in ["", "   "] {
            let err = helpers::start_with_required(message_type, blank)
                .expect_err("blank required argument");
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "{message_type}");
        }
        assert!(helpers::start_with_required(message_type, "x").is_ok());
    }
}

#[test]
fn test_idempotent_build() {
    let first = helpers::build_variant(
        MessageType::Track,
        Identity::User,
        &helpers::fixed_providers(),
    )
    .expect("first");
    let second = helpers::build_variant(
        MessageType::Track,
        Identity::User,
        &helpers::fixed_providers(),
    )
    .expect("second");
    assert_eq!(first, second);

    // Generated ids differ under the system providers; everything else matches.
    let a = TrackMessage::builder("Clicked")
        .expect("event")
        .user_id("u1")
        .build()
        .expect("a");
    let b = TrackMessage::builder("Clicked")
        .expect("event")
        .user_id("u1")
        .build()
        .expect("b");
    assert_ne!(a.envelope().message_id(), b.envelope().message_id());
    let realigned = b
        .to_builder()
        .message_id(a.envelope().message_id())
        .expect("message id")
        .timestamp(a.envelope().timestamp())
        .build()
        .expect("realigned");
    assert_eq!(a, realigned);
}

#[test]
fn test_caller_map_is_copied() {
    let mut traits = json!({ "email": "a@example.com" });
    let message = IdentifyMessage::builder()
        .user_id("u1")
        .traits(traits.clone())
        .expect("traits")
        .build()
        .expect("build");

    traits["email"] = json!("b@example.com");
    traits["admin"] = json!(true);

    let stored = message.traits().expect("traits");
    assert_eq!(stored.get("email"), Some(&json!("a@example.com")));
    assert!(!stored.contains_key("admin"));
}

#[test]
fn test_rehydrate_without_changes_is_identity() {
    let providers = helpers::fixed_providers();
    for message_type in MessageType::ALL {
        let message =
            helpers::build_variant(message_type, Identity::Both, &providers).expect("build");
        let rebuilt = message.map_envelope(Ok).expect("rebuild");
        assert_eq!(message, rebuilt, "{message_type}");
    }
}

#[test]
fn test_purchased_item() {
    let message = TrackMessage::builder("Purchased Item")
        .expect("event")
        .user_id("u1")
        .properties(json!({ "price": 9.99 }))
        .expect("properties")
        .build_message()
        .expect("build");

    let wire = serde_json::to_value(&message).expect("serialize");
    assert_eq!(wire["type"], "track");
    assert_eq!(wire["event"], "Purchased Item");
    assert_eq!(wire["userId"], "u1");
    assert!(wire.get("anonymousId").is_none());
    assert_eq!(wire["properties"], json!({ "price": 9.99 }));
    assert_eq!(wire["context"], json!({}));
    assert_eq!(wire["integrations"], json!({}));
    assert!(!wire["messageId"].as_str().unwrap_or_default().is_empty());
    assert!(wire["timestamp"].is_string());
}

#[test]
fn test_alias_empty_previous_id() {
    let err = AliasMessage::builder("").expect_err("empty previous id");
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert!(err.message.contains("previousId"));
}

#[test]
fn test_screen_null_properties() {
    let err = ScreenMessage::builder("Home")
        .expect("name")
        .properties(serde_json::Value::Null)
        .expect_err("null properties");
    assert_eq!(err.kind, ErrorKind::NullReference);
}

#[test]
fn test_wire_round_trip_preserves_every_variant() {
    let providers = helpers::fixed_providers();
    for message_type in MessageType::ALL {
        let message =
            helpers::build_variant(message_type, Identity::User, &providers).expect("build");
        let line = serde_json::to_string(&message).expect("serialize");
        let decoded: Message = line.parse().expect("decode");
        assert_eq!(decoded, message, "{message_type}");
    }
}

#[test]
fn test_decode_rejects_invalid_messages() {
    let cases = [
        json!({ "type": "track", "messageId": "m", "timestamp": "2024-01-01T00:00:00Z", "event": "E" }),
        json!({ "type": "group", "messageId": "m", "timestamp": "2024-01-01T00:00:00Z", "userId": "u" }),
        json!({ "type": "flush", "messageId": "m", "timestamp": "2024-01-01T00:00:00Z", "userId": "u" }),
        json!({ "type": "page", "messageId": "", "timestamp": "2024-01-01T00:00:00Z", "userId": "u", "name": "P" }),
    ];
    for case in cases {
        assert!(
            serde_json::from_value::<Message>(case.clone()).is_err(),
            "accepted {case}"
        );
    }
}

#[test]
fn test_injected_clock_overrides_default_timestamp() {
    let instant = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
    let message = TrackMessage::builder("Clicked")
        .expect("event")
        .anonymous_id("a1")
        .clock(Arc::new(FixedClock::new(instant)))
        .build()
        .expect("build");
    assert_eq!(message.envelope().timestamp(), instant);

    let explicit = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let message = message
        .to_builder()
        .timestamp(explicit)
        .build()
        .expect("rebuild");
    assert_eq!(message.envelope().timestamp(), explicit);
    assert!(message.properties().is_none());
}
