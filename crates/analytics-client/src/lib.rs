//! # analytics-client
//!
//! The thin facade end users call. [`Analytics::enqueue`] takes any
//! variant builder, runs the configured transformers over its envelope,
//! builds it with the facade's clock and id generator, runs the
//! interceptors over the built message, and hands the result to a
//! [`MessageSink`].
//!
//! Delivery, batching, and retry belong to the sink implementation.

pub mod analytics;
pub mod hooks;
pub mod sink;

pub use analytics::{Analytics, AnalyticsBuilder};
pub use hooks::{HookResult, MessageInterceptor, MessageTransformer};
pub use sink::{JsonLinesSink, MemorySink, MessageSink};
