//! Hierarchical call tracing with explicit context passing.
//!
//! Each root call gets a unique trace identifier. Nested calls derive a new
//! context one level deeper, keeping the identifier, and every call boundary
//! emits one structured line: a start line on entry and a completion line
//! (normal or exceptional) on exit, annotated with elapsed milliseconds and
//! an arrow diagram showing nesting depth.
//!
//! There is no ambient state: the [`TraceContext`] for the current call is
//! threaded explicitly through function arguments, which makes the tracer
//! safe across concurrent call chains without any locking or task-local
//! storage.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use calltrace_core::{Tracer, testing::MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let tracer = Tracer::with_sink(sink.clone());
//!
//! let root = tracer.begin("save item");
//! let child = tracer.begin_child(root.context(), "validate item");
//! tracer.end(child);
//! tracer.end(root);
//!
//! let lines = sink.lines();
//! assert_eq!(lines.len(), 4);
//! assert!(lines[1].contains("|-->validate item"));
//! ```
//!
//! # Guarded spans
//!
//! Reporting completion on every exit path is easy to get wrong by hand; an
//! early `?` return or a panic before the completion call silently truncates
//! the trace. [`Tracer::span`] ties the completion report to a guard, and
//! [`Tracer::scoped`] wraps a whole closure, mapping its `Result` to the
//! normal or exceptional completion line:
//!
//! ```rust
//! use std::sync::Arc;
//! use calltrace_core::{Tracer, testing::MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let tracer = Tracer::with_sink(sink.clone());
//!
//! let result: Result<u32, String> = tracer.scoped("load", |_ctx| Ok(42));
//! assert_eq!(result, Ok(42));
//! assert!(sink.lines()[1].contains("<--load time="));
//! ```

pub mod context;
pub mod record;
pub mod sink;
pub mod span;
pub mod testing;
pub mod tracer;
pub mod writer;

// Re-export main types
pub use context::TraceContext;
pub use record::{RecordKind, TraceRecord};
pub use sink::{LogSink, TraceSink};
pub use span::TraceSpan;
pub use tracer::{TraceStatus, Tracer};
pub use writer::{JsonlWriter, WriteError};
