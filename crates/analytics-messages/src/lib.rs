//! # analytics-messages
//!
//! The message type hierarchy for the analytics client: one sealed
//! [`Message`] enum over six variants (identify, track, screen, page,
//! group, alias), each embedding a shared [`Envelope`].
//!
//! Messages are only produced by builders. Every variant builder is a
//! [`MessageBuilder`] parameterized over the variant's [`Payload`]; the
//! envelope is validated and defaulted once, in one place, and `build`
//! consumes the builder.
//!
//! ```
//! use analytics_messages::{MessageFields, TrackMessage};
//! use serde_json::json;
//!
//! let message = TrackMessage::builder("Purchased Item")?
//!     .user_id("u1")
//!     .properties(json!({ "price": 9.99 }))?
//!     .build()?;
//!
//! assert_eq!(message.event(), "Purchased Item");
//! assert_eq!(message.envelope().user_id(), Some("u1"));
//! # Ok::<(), analytics_core::AppError>(())
//! ```

pub mod attributes;
pub mod builder;
pub mod envelope;
pub mod message;
pub mod types;
pub mod variants;

mod validation;

pub use attributes::Attributes;
pub use builder::{MessageBuilder, Payload, Providers};
pub use envelope::{Envelope, EnvelopeBuilder};
pub use message::{Message, MessageFields};
pub use types::MessageType;
pub use variants::{
    AliasBuilder, AliasMessage, GroupBuilder, GroupMessage, IdentifyBuilder, IdentifyMessage,
    PageBuilder, PageMessage, ScreenBuilder, ScreenMessage, TrackBuilder, TrackMessage,
};
