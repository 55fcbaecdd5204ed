//! The closed set of message variants.

use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use analytics_core::{AppError, AppResult};

use crate::builder::{MessageBuilder, Payload};
use crate::envelope::{Envelope, EnvelopeBuilder};
use crate::types::MessageType;
use crate::variants::{
    AliasMessage, GroupMessage, IdentifyMessage, PageMessage, ScreenMessage, TrackMessage,
};

/// Accessors every message exposes.
pub trait MessageFields {
    /// The shared envelope.
    fn envelope(&self) -> &Envelope;

    /// The message type.
    fn message_type(&self) -> MessageType {
        self.envelope().message_type()
    }
}

/// A built, immutable analytics message.
///
/// Serializes to a flat JSON object using the wire field names
/// (`type`, `messageId`, `userId`, `properties`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    /// An identify call.
    Identify(IdentifyMessage),
    /// A track call.
    Track(TrackMessage),
    /// A screen call.
    Screen(ScreenMessage),
    /// A page call.
    Page(PageMessage),
    /// A group call.
    Group(GroupMessage),
    /// An alias call.
    Alias(AliasMessage),
}

impl MessageFields for Message {
    fn envelope(&self) -> &Envelope {
        match self {
            Self::Identify(m) => m.envelope(),
            Self::Track(m) => m.envelope(),
            Self::Screen(m) => m.envelope(),
            Self::Page(m) => m.envelope(),
            Self::Group(m) => m.envelope(),
            Self::Alias(m) => m.envelope(),
        }
    }
}

impl Message {
    /// Derive a modified copy by re-hydrating a builder, editing its
    /// envelope, and building again.
    ///
    /// Variant fields are carried over unchanged.
    pub fn map_envelope(
        &self,
        f: impl FnOnce(EnvelopeBuilder) -> AppResult<EnvelopeBuilder>,
    ) -> AppResult<Message> {
        fn rebuild<P: Payload>(
            builder: MessageBuilder<P>,
            f: impl FnOnce(EnvelopeBuilder) -> AppResult<EnvelopeBuilder>,
        ) -> AppResult<Message> {
            let envelope = f(builder.envelope().clone())?;
            builder.with_envelope(envelope).build_message()
        }

        match self {
            Self::Identify(m) => rebuild(m.to_builder(), f),
            Self::Track(m) => rebuild(m.to_builder(), f),
            Self::Screen(m) => rebuild(m.to_builder(), f),
            Self::Page(m) => rebuild(m.to_builder(), f),
            Self::Group(m) => rebuild(m.to_builder(), f),
            Self::Alias(m) => rebuild(m.to_builder(), f),
        }
    }

    /// Decode a message from a JSON value.
    ///
    /// Decoding goes through the variant builders, so a decoded message
    /// satisfies the same invariants as a built one.
    pub fn from_value(value: Value) -> AppResult<Message> {
        let Value::Object(mut object) = value else {
            return Err(AppError::invalid_argument("message must be a JSON object"));
        };

        let envelope: Envelope = serde_json::from_value(Value::Object(object.clone()))?;

        match envelope.message_type() {
            MessageType::Identify => {
                let mut builder = IdentifyMessage::builder();
                if let Some(traits) = take(&mut object, "traits") {
                    builder = builder.traits(traits)?;
                }
                rehydrated(builder, &envelope)
            }
            MessageType::Track => {
                let mut builder = TrackMessage::builder(take_string(&mut object, "event")?)?;
                if let Some(properties) = take(&mut object, "properties") {
                    builder = builder.properties(properties)?;
                }
                rehydrated(builder, &envelope)
            }
            MessageType::Screen => {
                let mut builder = ScreenMessage::builder(take_string(&mut object, "name")?)?;
                if let Some(properties) = take(&mut object, "properties") {
                    builder = builder.properties(properties)?;
                }
                rehydrated(builder, &envelope)
            }
            MessageType::Page => {
                let mut builder = PageMessage::builder(take_string(&mut object, "name")?)?;
                if let Some(properties) = take(&mut object, "properties") {
                    builder = builder.properties(properties)?;
                }
                rehydrated(builder, &envelope)
            }
            MessageType::Group => {
                let mut builder = GroupMessage::builder(take_string(&mut object, "groupId")?)?;
                if let Some(traits) = take(&mut object, "traits") {
                    builder = builder.traits(traits)?;
                }
                rehydrated(builder, &envelope)
            }
            MessageType::Alias => {
                let builder = AliasMessage::builder(take_string(&mut object, "previousId")?)?;
                rehydrated(builder, &envelope)
            }
        }
    }
}

fn rehydrated<P: Payload>(
    builder: MessageBuilder<P>,
    envelope: &Envelope,
) -> AppResult<Message> {
    builder
        .with_envelope(EnvelopeBuilder::from_envelope(envelope))
        .build_message()
}

/// Remove `key`, treating JSON `null` as absent.
fn take(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(|v| !v.is_null())
}

fn take_string(object: &mut Map<String, Value>, key: &str) -> AppResult<String> {
    match take(object, key) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AppError::invalid_argument(format!(
            "{key} must be a string"
        ))),
    }
}

impl FromStr for Message {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(serde_json::from_str(s)?)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )*
    };
}

impl_from_variant!(
    Identify => IdentifyMessage,
    Track => TrackMessage,
    Screen => ScreenMessage,
    Page => PageMessage,
    Group => GroupMessage,
    Alias => AliasMessage,
);
