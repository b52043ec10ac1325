//! Event dedup/batch pipeline.
//!
//! UI signals arrive as [`EventRecord`]s through [`EventPipeline::submit`].
//! Records are filtered by integration mode, deduplicated by
//! [`DedupKey`], collected over a fixed debounce window and delivered to a
//! [`BatchSink`] as one serialized payload per window.

mod config;
mod error;
mod payload;
mod pipeline;
mod record;
mod sink;

pub use config::{IntegrationInfo, IntegrationMode, PipelineConfig, DEFAULT_DEBOUNCE_MS};
pub use error::EventError;
pub use payload::EventPayload;
pub use pipeline::{EventPipeline, SubmitOutcome};
pub use record::{format_event_time, DedupKey, EventRecord, EventType, NameValue};
pub use sink::{BatchSink, ChannelSink, FnSink};
