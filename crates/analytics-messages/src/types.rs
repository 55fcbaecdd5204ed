//! Message type discriminant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use analytics_core::AppError;

/// The kind of a message, serialized as the wire `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Ties a user to their actions and records traits about them.
    Identify,
    /// Records an action the user performed.
    Track,
    /// Records a screen view in a mobile app.
    Screen,
    /// Records a page view on a website.
    Page,
    /// Associates a user with a group.
    Group,
    /// Merges two user identities.
    Alias,
}

impl MessageType {
    /// All message types, in declaration order.
    pub const ALL: [MessageType; 6] = [
        Self::Identify,
        Self::Track,
        Self::Screen,
        Self::Page,
        Self::Group,
        Self::Alias,
    ];

    /// The wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identify => "identify",
            Self::Track => "track",
            Self::Screen => "screen",
            Self::Page => "page",
            Self::Group => "group",
            Self::Alias => "alias",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::invalid_argument(format!("unknown message type '{s}'")))
    }
}
