//! Structured trace records and the canonical line format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which lifecycle point a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Call entered.
    Begin,
    /// Call completed normally.
    End,
    /// Call completed exceptionally.
    Fail,
}

impl RecordKind {
    /// The marker symbol distinguishing this kind in the rendered line.
    pub fn marker(self) -> &'static str {
        match self {
            RecordKind::Begin => "-->",
            RecordKind::End => "<--",
            RecordKind::Fail => "<X-",
        }
    }
}

/// One trace emission: exactly one record per begin/end/fail call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Lifecycle point this record describes.
    pub kind: RecordKind,

    /// Identifier shared by every record of one trace.
    pub trace_id: String,

    /// Nesting level of the call, 0 at the root.
    pub level: u32,

    /// Human-readable description of the traced operation.
    pub label: String,

    /// Whole milliseconds from start to completion. Present on completion
    /// records, absent on start records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    /// Display form of the error, for exceptional completions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock time of the emission.
    pub at: DateTime<Utc>,
}

impl TraceRecord {
    /// Render the canonical log line for this record.
    ///
    /// Start: `[id] <depth>-->label`.
    /// Normal completion: `[id] <depth><--label time=<ms>ms`.
    /// Exceptional completion: `[id] <depth><X-label time=<ms>ms ex=<error>`.
    pub fn render(&self) -> String {
        let mut line = format!(
            "[{}] {}{}",
            self.trace_id,
            depth_prefix(self.kind.marker(), self.level),
            self.label
        );
        if let Some(ms) = self.elapsed_ms {
            line.push_str(&format!(" time={}ms", ms));
        }
        if let Some(ref error) = self.error {
            line.push_str(&format!(" ex={}", error));
        }
        line
    }
}

/// Render the depth indicator plus marker for a given level.
///
/// Level L renders L four-character cells: every cell except the last is
/// `"|   "`, the last is a bar followed immediately by the marker. At level
/// 0 there are no cells and the marker stands alone. Level 2 with `-->`
/// renders `"|   |-->"`.
pub(crate) fn depth_prefix(marker: &str, level: u32) -> String {
    let mut out = String::with_capacity(4 * level as usize + marker.len());
    for i in 0..level {
        if i + 1 == level {
            out.push('|');
        } else {
            out.push_str("|   ");
        }
    }
    out.push_str(marker);
    out
}
