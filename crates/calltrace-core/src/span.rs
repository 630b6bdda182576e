//! Guarded spans: completion reporting tied to scope exit.
//!
//! Calling `end`/`fail` by hand on every exit path is fragile; an early `?`
//! return or a panic before the completion call leaves a truncated trace.
//! [`TraceSpan`] reports on drop, and [`Tracer::scoped`] wraps a closure and
//! maps its `Result` to the matching completion line.

use std::fmt;

use crate::context::TraceContext;
use crate::tracer::{TraceStatus, Tracer};

/// Error recorded when a span is dropped without an explicit completion.
const DROPPED_ERROR: &str = "dropped before completion";

/// Guard tying a traced call's completion report to scope exit.
///
/// Obtained from [`Tracer::span`] or [`Tracer::child`]. Call [`ok`] or
/// [`fail`] to report the outcome; if the guard is instead dropped (early
/// return, panic unwind), the call is reported as failed with a fixed
/// message so the trace never silently loses its completion line.
///
/// [`ok`]: TraceSpan::ok
/// [`fail`]: TraceSpan::fail
#[must_use = "dropping a span without ok() or fail() reports it as failed"]
pub struct TraceSpan<'a> {
    tracer: &'a Tracer,
    status: Option<TraceStatus>,
}

impl<'a> TraceSpan<'a> {
    pub(crate) fn new(tracer: &'a Tracer, status: TraceStatus) -> Self {
        Self {
            tracer,
            status: Some(status),
        }
    }

    /// Context of this span, for deriving nested spans.
    pub fn context(&self) -> &TraceContext {
        // Some until ok()/fail() consume self, so this cannot fail.
        self.status
            .as_ref()
            .expect("status present until span is consumed")
            .context()
    }

    /// Report normal completion.
    pub fn ok(mut self) {
        if let Some(status) = self.status.take() {
            self.tracer.end(status);
        }
    }

    /// Report exceptional completion with `error`.
    pub fn fail(mut self, error: impl fmt::Display) {
        if let Some(status) = self.status.take() {
            self.tracer.fail(status, error);
        }
    }
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        if let Some(status) = self.status.take() {
            self.tracer.fail(status, DROPPED_ERROR);
        }
    }
}

impl Tracer {
    /// Begin a root call and tie its completion to the returned guard.
    pub fn span(&self, label: impl Into<String>) -> TraceSpan<'_> {
        TraceSpan::new(self, self.begin(label))
    }

    /// Begin a nested call under `parent`, tied to the returned guard.
    pub fn child(&self, parent: &TraceContext, label: impl Into<String>) -> TraceSpan<'_> {
        TraceSpan::new(self, self.begin_child(parent, label))
    }

    /// Run `f` as a root traced call.
    ///
    /// Emits the start line, invokes `f` with the call's context, then emits
    /// the normal completion line on `Ok` or the exceptional one on `Err`.
    /// The result is returned untouched; a panic inside `f` still produces a
    /// completion line via the guard.
    pub fn scoped<T, E>(
        &self,
        label: impl Into<String>,
        f: impl FnOnce(&TraceContext) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display,
    {
        let status = self.begin(label);
        self.run_scoped(status, f)
    }

    /// Like [`scoped`](Tracer::scoped), nested one level under `parent`.
    pub fn scoped_child<T, E>(
        &self,
        parent: &TraceContext,
        label: impl Into<String>,
        f: impl FnOnce(&TraceContext) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display,
    {
        let status = self.begin_child(parent, label);
        self.run_scoped(status, f)
    }

    fn run_scoped<T, E>(
        &self,
        status: TraceStatus,
        f: impl FnOnce(&TraceContext) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display,
    {
        let span = TraceSpan::new(self, status);
        let context = span.context().clone();
        let result = f(&context);
        match &result {
            Ok(_) => span.ok(),
            Err(error) => span.fail(error),
        }
        result
    }
}
