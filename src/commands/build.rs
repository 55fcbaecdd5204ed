//! `analytics build`: assemble one message through the client facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde_json::Value;

use analytics_client::{Analytics, JsonLinesSink};
use analytics_core::config::AnalyticsConfig;
use analytics_core::error::{AppError, ErrorKind};
use analytics_core::result::AppResult;
use analytics_messages::{
    AliasMessage, GroupMessage, IdentifyMessage, MessageBuilder, PageMessage, Payload,
    ScreenMessage, TrackMessage,
};

/// Arguments for the build command
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Message type to build
    #[command(subcommand)]
    pub message: MessageCommand,
}

/// One subcommand per message type
#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Identify a user
    Identify {
        /// User traits as a JSON object
        #[arg(long)]
        traits: Option<String>,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
    /// Record an action
    Track {
        /// Name of the action
        event: String,
        /// Event properties as a JSON object
        #[arg(long)]
        properties: Option<String>,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
    /// Record a screen view
    Screen {
        /// Screen name
        name: String,
        /// Screen properties as a JSON object
        #[arg(long)]
        properties: Option<String>,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
    /// Record a page view
    Page {
        /// Page name
        name: String,
        /// Page properties as a JSON object
        #[arg(long)]
        properties: Option<String>,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
    /// Associate a user with a group
    Group {
        /// Group identifier
        group_id: String,
        /// Group traits as a JSON object
        #[arg(long)]
        traits: Option<String>,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
    /// Merge a previous identity into the current one
    Alias {
        /// The identity being merged away
        previous_id: String,
        #[command(flatten)]
        envelope: EnvelopeArgs,
    },
}

/// Envelope flags shared by every message type
#[derive(Debug, Clone, Default, Args)]
pub struct EnvelopeArgs {
    /// Known user id
    #[arg(long)]
    pub user_id: Option<String>,
    /// Anonymous id
    #[arg(long)]
    pub anonymous_id: Option<String>,
    /// Explicit message id (generated when omitted)
    #[arg(long)]
    pub message_id: Option<String>,
    /// RFC 3339 timestamp (now when omitted)
    #[arg(long)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Context as a JSON object
    #[arg(long)]
    pub context: Option<String>,
    /// Integrations as a JSON object
    #[arg(long)]
    pub integrations: Option<String>,
    /// Enable an integration (repeatable)
    #[arg(long = "enable", value_name = "INTEGRATION")]
    pub enable: Vec<String>,
    /// Disable an integration (repeatable)
    #[arg(long = "disable", value_name = "INTEGRATION")]
    pub disable: Vec<String>,
}

impl EnvelopeArgs {
    /// Apply every flag that was given to `builder`
    pub fn apply<P: Payload>(&self, mut builder: MessageBuilder<P>) -> AppResult<MessageBuilder<P>> {
        if let Some(user_id) = &self.user_id {
            builder = builder.user_id(user_id.clone());
        }
        if let Some(anonymous_id) = &self.anonymous_id {
            builder = builder.anonymous_id(anonymous_id.clone());
        }
        if let Some(message_id) = &self.message_id {
            builder = builder.message_id(message_id.clone())?;
        }
        if let Some(timestamp) = self.timestamp {
            builder = builder.timestamp(timestamp);
        }
        if let Some(raw) = &self.context {
            builder = builder.context(parse_json("context", raw)?)?;
        }
        if let Some(raw) = &self.integrations {
            builder = builder.integrations(parse_json("integrations", raw)?)?;
        }
        for name in &self.enable {
            builder = builder.enable_integration(name.clone(), true);
        }
        for name in &self.disable {
            builder = builder.enable_integration(name.clone(), false);
        }
        Ok(builder)
    }
}

/// Parse a JSON flag value
fn parse_json(flag: &str, raw: &str) -> AppResult<Value> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::InvalidArgument,
            format!("--{flag} is not valid JSON: {e}"),
            e,
        )
    })
}

/// Execute the build command
pub async fn execute(args: &BuildArgs, config: &AnalyticsConfig) -> Result<(), AppError> {
    let sink = Arc::new(JsonLinesSink::new(std::io::stdout()));
    let analytics = Analytics::from_config(&config.client, sink)?;

    let sent = match &args.message {
        MessageCommand::Identify { traits, envelope } => {
            let mut builder = IdentifyMessage::builder();
            if let Some(raw) = traits {
                builder = builder.traits(parse_json("traits", raw)?)?;
            }
            analytics.enqueue(envelope.apply(builder)?).await?
        }
        MessageCommand::Track {
            event,
            properties,
            envelope,
        } => {
            let mut builder = TrackMessage::builder(event.clone())?;
            if let Some(raw) = properties {
                builder = builder.properties(parse_json("properties", raw)?)?;
            }
            analytics.enqueue(envelope.apply(builder)?).await?
        }
        MessageCommand::Screen {
            name,
            properties,
            envelope,
        } => {
            let mut builder = ScreenMessage::builder(name.clone())?;
            if let Some(raw) = properties {
                builder = builder.properties(parse_json("properties", raw)?)?;
            }
            analytics.enqueue(envelope.apply(builder)?).await?
        }
        MessageCommand::Page {
            name,
            properties,
            envelope,
        } => {
            let mut builder = PageMessage::builder(name.clone())?;
            if let Some(raw) = properties {
                builder = builder.properties(parse_json("properties", raw)?)?;
            }
            analytics.enqueue(envelope.apply(builder)?).await?
        }
        MessageCommand::Group {
            group_id,
            traits,
            envelope,
        } => {
            let mut builder = GroupMessage::builder(group_id.clone())?;
            if let Some(raw) = traits {
                builder = builder.traits(parse_json("traits", raw)?)?;
            }
            analytics.enqueue(envelope.apply(builder)?).await?
        }
        MessageCommand::Alias {
            previous_id,
            envelope,
        } => {
            let builder = AliasMessage::builder(previous_id.clone())?;
            analytics.enqueue(envelope.apply(builder)?).await?
        }
    };

    if !sent {
        tracing::warn!("Message was dropped by a hook");
    }
    Ok(())
}
