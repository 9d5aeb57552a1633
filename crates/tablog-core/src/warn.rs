//! Once-per-key diagnostic deduplication.
//!
//! Components that emit advisory warnings (the record, the logger, the CSV
//! writer) each own a `WarnOnce` so a condition is reported the first time
//! it occurs and then stays quiet.  Emission itself happens at the call
//! site via `tracing::warn!`; this type only answers "should this key warn
//! now?".  State is per instance — two writers warn independently.

use std::collections::HashSet;

/// Tracks which warning keys have already fired, plus a suppress-all flag.
#[derive(Debug, Default)]
pub struct WarnOnce {
    seen:     HashSet<String>,
    disabled: bool,
}

impl WarnOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per `key`, and never after [`disable`](Self::disable).
    pub fn should_warn(&mut self, key: &str) -> bool {
        if self.disabled || self.seen.contains(key) {
            return false;
        }
        self.seen.insert(key.to_owned());
        true
    }

    /// Suppress all further warnings from the owning component.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
