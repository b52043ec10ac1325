//! The event dedup/batch pipeline.
//!
//! A small state machine guarded by one mutex. `submit` filters, dedups and
//! appends; the first append into an empty window arms a timer. When the
//! timer fires the window's events are taken, wrapped with integration
//! metadata, serialized and handed to the sink. Arrivals never reset the
//! timer, so a window closes `debounce` after its first event.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::{IntegrationMode, PipelineConfig};
use crate::error::EventError;
use crate::payload::EventPayload;
use crate::record::{DedupKey, EventRecord};
use crate::sink::BatchSink;

/// What `submit` did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dropped by the integration-mode filter.
    Filtered,
    /// Dropped because its dedup key was already seen.
    Duplicate,
    /// Appended to the open window.
    Queued,
}

#[derive(Default)]
struct PipelineState {
    seen: HashSet<DedupKey>,
    pending: Vec<EventRecord>,
    timer: Option<JoinHandle<()>>,
    /// Bumped each time a window opens; a timer only closes its own window.
    window: u64,
}

struct Inner {
    config: PipelineConfig,
    sink: Arc<dyn BatchSink>,
    runtime: Handle,
    state: Mutex<PipelineState>,
}

/// Cheap to clone; clones share one seen-set and one window.
#[derive(Clone)]
pub struct EventPipeline {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for EventPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPipeline")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl EventPipeline {
    /// Create a pipeline on the current tokio runtime.
    pub fn new(config: PipelineConfig, sink: Arc<dyn BatchSink>) -> Result<Self, EventError> {
        let runtime = Handle::try_current().map_err(|e| EventError::NoRuntime(e.to_string()))?;
        Ok(Self::with_handle(config, sink, runtime))
    }

    /// Create a pipeline whose timers run on `runtime`. Lets producers
    /// outside the runtime submit.
    pub fn with_handle(config: PipelineConfig, sink: Arc<dyn BatchSink>, runtime: Handle) -> Self {
        EventPipeline {
            inner: Arc::new(Inner {
                config,
                sink,
                runtime,
                state: Mutex::new(PipelineState::default()),
            }),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    /// Offer one record to the pipeline. Never blocks on the sink.
    pub fn submit(&self, record: EventRecord) -> SubmitOutcome {
        let inner = &self.inner;
        if inner.config.integration_mode == IntegrationMode::S2s
            && record.event_type.is_load_signal()
        {
            tracing::debug!(event_type = ?record.event_type, "filtered in s2s mode");
            return SubmitOutcome::Filtered;
        }

        let mut state = inner.lock();
        if !record.event_type.bypasses_dedup() && !state.seen.insert(record.dedup_key()) {
            tracing::debug!(
                event_type = ?record.event_type,
                parent_guid = %record.parent_guid,
                "duplicate event dropped"
            );
            return SubmitOutcome::Duplicate;
        }

        state.pending.push(record);
        if state.timer.is_none() {
            state.window += 1;
            let window = state.window;
            let debounce = inner.config.debounce();
            let timer_inner = Arc::clone(inner);
            state.timer = Some(inner.runtime.spawn(async move {
                tokio::time::sleep(debounce).await;
                timer_inner.close_window(window).await;
            }));
        }
        SubmitOutcome::Queued
    }

    /// Close the open window now and emit it. No-op when nothing is pending.
    pub async fn flush(&self) {
        let batch = {
            let mut state = self.inner.lock();
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            std::mem::take(&mut state.pending)
        };
        self.inner.emit(batch).await;
    }

    /// Events waiting in the open window.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Distinct dedup keys seen so far.
    pub fn seen_len(&self) -> usize {
        self.inner.lock().seen.len()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        // Nothing panics while holding the lock, so a poisoned state is intact.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn close_window(&self, window: u64) {
        let batch = {
            let mut state = self.lock();
            if state.window != window || state.timer.is_none() {
                return;
            }
            state.timer = None;
            std::mem::take(&mut state.pending)
        };
        self.emit(batch).await;
    }

    async fn emit(&self, batch: Vec<EventRecord>) {
        if batch.is_empty() {
            return;
        }
        let payload = EventPayload::new(&self.config.integration, &batch);
        match payload.to_json() {
            Ok(json) => {
                tracing::debug!(events = batch.len(), bytes = json.len(), "emitting batch");
                self.sink.on_batch(json).await;
            }
            Err(e) => {
                tracing::warn!(events = batch.len(), error = %e, "dropping batch");
            }
        }
    }
}
