//! Test support: an in-memory sink capturing emitted records.

use std::sync::Mutex;

use crate::record::TraceRecord;
use crate::sink::TraceSink;

/// Sink that collects records in memory for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<TraceRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records, in emission order.
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Rendered lines for all captured records, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(TraceRecord::render)
            .collect()
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, record: &TraceRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
