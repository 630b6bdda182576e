//! JSONL record persistence.
//!
//! [`JsonlWriter`] appends one JSON object per trace record to a single
//! file, flushed per write so a crashing process never loses lines it
//! already reported. It doubles as a [`TraceSink`], where write failures are
//! logged and dropped to honor the fire-and-forget emission contract.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::record::TraceRecord;
use crate::sink::TraceSink;

/// Error type for record writing operations.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Appends trace records as JSON lines to a file.
///
/// Thread-safe via internal mutex. The file is opened lazily on the first
/// write and appended to if it already exists.
pub struct JsonlWriter {
    path: PathBuf,
    file: Mutex<Option<BufWriter<File>>>,
}

impl JsonlWriter {
    /// Create a writer targeting `path`, creating parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, WriteError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            file: Mutex::new(None),
        })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one record and flush.
    pub fn write(&self, record: &TraceRecord) -> Result<(), WriteError> {
        let mut guard = self.file.lock().unwrap();

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            *guard = Some(BufWriter::new(file));
        }

        if let Some(ref mut writer) = *guard {
            let line = serde_json::to_string(record)?;
            writeln!(writer, "{}", line)?;
            writer.flush()?;
        }

        Ok(())
    }

    /// Read records back from a JSONL file.
    pub fn read_records(path: &Path) -> Result<Vec<TraceRecord>, WriteError> {
        let content = fs::read_to_string(path)?;
        let records: Result<Vec<TraceRecord>, _> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect();
        Ok(records?)
    }
}

impl TraceSink for JsonlWriter {
    fn emit(&self, record: &TraceRecord) {
        if let Err(error) = self.write(record) {
            tracing::warn!("failed to write trace record: {}", error);
        }
    }
}
