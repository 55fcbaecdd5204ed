//! Newline-delimited JSON sink.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use analytics_core::{AppError, AppResult};
use analytics_messages::Message;

use super::MessageSink;

/// Writes each message as one JSON document per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send + std::fmt::Debug + 'static> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> AppResult<W> {
        self.writer
            .into_inner()
            .map_err(|_| AppError::sink("JSON lines writer lock poisoned"))
    }
}

#[async_trait]
impl<W: Write + Send + std::fmt::Debug + 'static> MessageSink for JsonLinesSink<W> {
    fn name(&self) -> &str {
        "json-lines"
    }

    async fn send(&self, message: Message) -> AppResult<()> {
        let line = serde_json::to_vec(&message)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| AppError::sink("JSON lines writer lock poisoned"))?;
        writer.write_all(&line)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
