//! Sink abstraction for emitted trace records.

use crate::record::TraceRecord;

/// Destination for trace records.
///
/// Exactly one record is emitted per begin/end/fail call, synchronously,
/// before that call returns. There is no queueing or batching; a slow sink
/// slows the caller. Implementations must be safe to share across threads.
pub trait TraceSink: Send + Sync {
    /// Deliver one record. Fire-and-forget: errors stay inside the sink.
    fn emit(&self, record: &TraceRecord);
}

/// Default sink: renders each record and logs it at INFO via `tracing`.
#[derive(Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn emit(&self, record: &TraceRecord) {
        tracing::info!("{}", record.render());
    }
}
