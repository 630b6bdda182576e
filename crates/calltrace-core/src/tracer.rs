//! The tracer: begin/end/fail lifecycle and elapsed-time measurement.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::context::TraceContext;
use crate::record::{RecordKind, TraceRecord};
use crate::sink::{LogSink, TraceSink};

/// An in-flight call pending its completion report.
///
/// Created by [`Tracer::begin`] or [`Tracer::begin_child`], consumed exactly
/// once by [`Tracer::end`] or [`Tracer::fail`]. Consumption is by value, so
/// a status cannot be reported twice.
#[derive(Debug)]
pub struct TraceStatus {
    context: TraceContext,
    started: Instant,
    label: String,
}

impl TraceStatus {
    /// Context of this call, for deriving nested calls.
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// The operation label given at begin.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Stateless trace emitter.
///
/// The tracer holds no per-call state; all continuity is carried by the
/// caller threading [`TraceContext`] values down the call chain and
/// [`TraceStatus`] values back up. It is therefore safe to share one tracer
/// across any number of concurrent call chains. Completion should be
/// reported in reverse call order for the rendered diagram to nest
/// correctly; the tracer records whatever order the caller reports.
#[derive(Clone)]
pub struct Tracer {
    sink: Arc<dyn TraceSink>,
}

impl Tracer {
    /// Tracer emitting through the default [`LogSink`].
    pub fn new() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }

    /// Tracer emitting through the given sink.
    pub fn with_sink(sink: Arc<dyn TraceSink>) -> Self {
        Self { sink }
    }

    /// Start a root trace: fresh identifier, level 0, one start line.
    pub fn begin(&self, label: impl Into<String>) -> TraceStatus {
        self.start(TraceContext::new(), label.into())
    }

    /// Start a call nested under `parent`: same identifier, one level
    /// deeper, one start line.
    pub fn begin_child(&self, parent: &TraceContext, label: impl Into<String>) -> TraceStatus {
        self.start(parent.next(), label.into())
    }

    fn start(&self, context: TraceContext, label: String) -> TraceStatus {
        let started = Instant::now();
        self.sink.emit(&TraceRecord {
            kind: RecordKind::Begin,
            trace_id: context.id().to_string(),
            level: context.level(),
            label: label.clone(),
            elapsed_ms: None,
            error: None,
            at: Utc::now(),
        });
        TraceStatus {
            context,
            started,
            label,
        }
    }

    /// Report normal completion: one line with elapsed milliseconds.
    pub fn end(&self, status: TraceStatus) {
        self.complete(status, None);
    }

    /// Report exceptional completion: one line with elapsed milliseconds and
    /// the error's Display form. The error is only recorded; propagating it
    /// remains the caller's job.
    pub fn fail(&self, status: TraceStatus, error: impl fmt::Display) {
        self.complete(status, Some(error.to_string()));
    }

    // Single completion path so elapsed-time computation and field layout
    // are identical for both outcomes.
    fn complete(&self, status: TraceStatus, error: Option<String>) {
        let elapsed_ms = status.started.elapsed().as_millis() as u64;
        let kind = if error.is_some() {
            RecordKind::Fail
        } else {
            RecordKind::End
        };
        self.sink.emit(&TraceRecord {
            kind,
            trace_id: status.context.id().to_string(),
            level: status.context.level(),
            label: status.label,
            elapsed_ms: Some(elapsed_ms),
            error,
            at: Utc::now(),
        });
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}
