//! In-memory sink.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use analytics_core::AppResult;
use analytics_messages::Message;

use super::MessageSink;

/// Collects messages in a shared vector.
///
/// Clones share the same storage, so a clone can be handed to
/// [`Analytics`](crate::Analytics) while the original is inspected.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every message received so far.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    /// Number of messages received.
    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    /// Whether no message has been received.
    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }

    /// Take every message, leaving the sink empty.
    pub async fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.messages.lock().await)
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, message: Message) -> AppResult<()> {
        self.messages.lock().await.push(message);
        Ok(())
    }
}
