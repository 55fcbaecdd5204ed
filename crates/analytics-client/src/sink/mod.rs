//! Where built messages go.
//!
//! A [`MessageSink`] is the boundary to the transport layer. The sinks
//! here do no batching or retry.

pub mod json_lines;
pub mod memory;

use async_trait::async_trait;

use analytics_core::AppResult;
use analytics_messages::Message;

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

/// Receiver for built messages.
#[async_trait]
pub trait MessageSink: Send + Sync + std::fmt::Debug + 'static {
    /// Sink name used in logs.
    fn name(&self) -> &str;

    /// Accept one message.
    async fn send(&self, message: Message) -> AppResult<()>;
}
