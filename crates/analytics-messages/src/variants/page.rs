//! Page: records a page view on a website.

use serde::Serialize;
use serde_json::Value;

use analytics_core::AppResult;

use crate::attributes::Attributes;
use crate::builder::{MessageBuilder, Payload};
use crate::envelope::Envelope;
use crate::message::MessageFields;
use crate::types::MessageType;
use crate::validation::require_non_empty;

/// A page call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMessage {
    #[serde(flatten)]
    envelope: Envelope,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Attributes>,
}

/// Builder for [`PageMessage`].
pub type PageBuilder = MessageBuilder<PagePayload>;

/// Variant fields of a page call being assembled.
#[derive(Debug, Clone)]
pub struct PagePayload {
    name: String,
    properties: Option<Attributes>,
}

impl PageMessage {
    /// Start building a page call for the page called `name`.
    pub fn builder(name: impl Into<String>) -> AppResult<PageBuilder> {
        let name = require_non_empty(name.into(), "page name")?;
        Ok(MessageBuilder::from_payload(PagePayload {
            name,
            properties: None,
        }))
    }

    /// The name of the page.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page properties such as `url`, `title`, or `referrer`.
    pub fn properties(&self) -> Option<&Attributes> {
        self.properties.as_ref()
    }

    /// A builder pre-populated with every field of this message.
    pub fn to_builder(&self) -> PageBuilder {
        MessageBuilder::rehydrate(
            &self.envelope,
            PagePayload {
                name: self.name.clone(),
                properties: self.properties.clone(),
            },
        )
    }
}

impl MessageFields for PageMessage {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl Payload for PagePayload {
    type Message = PageMessage;
    const TYPE: MessageType = MessageType::Page;

    fn assemble(self, envelope: Envelope) -> PageMessage {
        PageMessage {
            envelope,
            name: self.name,
            properties: self.properties,
        }
    }
}

impl PageBuilder {
    /// Set the page properties.
    pub fn properties(mut self, properties: impl Into<Value>) -> AppResult<Self> {
        self.payload.properties = Some(Attributes::from_payload_value(
            "properties",
            properties.into(),
        )?);
        Ok(self)
    }
}
