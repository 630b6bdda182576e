//! Trace identity and nesting depth.
//!
//! A [`TraceContext`] identifies one position within a trace: the trace's
//! identifier plus the call's nesting level. Contexts are immutable; nesting
//! derives a new value via [`TraceContext::next`] rather than mutating.

use uuid::Uuid;

/// Length of the trace identifier in characters.
const ID_LEN: usize = 8;

/// Identity and depth of one call within a trace.
///
/// All contexts derived from the same root share one identifier; the level
/// increases by exactly one per nesting step. The type does not enforce that
/// completion is reported in reverse call order - that is the caller's
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    id: String,
    level: u32,
}

impl TraceContext {
    /// Create a root context: fresh identifier, level 0.
    ///
    /// The identifier is the first eight hex characters of a v4 UUID. A
    /// collision between concurrently active traces only makes two unrelated
    /// traces render under one identifier in the log stream; it cannot
    /// affect the traced operations themselves.
    pub fn new() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        Self { id, level: 0 }
    }

    /// Derive the context for a call nested one level deeper.
    ///
    /// Pure: returns a new value with the same identifier and `level + 1`.
    pub fn next(&self) -> Self {
        Self {
            id: self.id.clone(),
            level: self.level + 1,
        }
    }

    /// The trace identifier, stable across all levels of one trace.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Nesting depth, 0 at the root.
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}
