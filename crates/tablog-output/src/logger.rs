//! `Logger` — fans logged data out to every attached output.

use tablog_core::{LogInput, WarnOnce};

use crate::output::LogOutput;
use crate::OutputResult;

/// Owns any number of boxed outputs and dispatches each datum to every
/// output that accepts its kind.
///
/// Logging with no outputs attached, or with a datum no attached output
/// accepts, is not an error — it warns once per condition and drops the
/// datum, so instrumentation can stay in place while outputs come and go.
///
/// The prefix stack applies to message text only; tabular records carry
/// their own prefixes (see `TabularRecord::push_prefix`).
pub struct Logger {
    outputs:  Vec<Box<dyn LogOutput>>,
    prefixes: Vec<String>,
    prefix:   String,
    warn:     WarnOnce,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            outputs:  Vec::new(),
            prefixes: Vec::new(),
            prefix:   String::new(),
            warn:     WarnOnce::new(),
        }
    }

    /// Attach an output.  Outputs are dispatched in attachment order.
    pub fn add_output(&mut self, output: impl LogOutput + 'static) {
        self.outputs.push(Box::new(output));
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Dispatch `data` to every attached output that accepts its kind.
    ///
    /// The first output error aborts the dispatch and propagates; outputs
    /// earlier in the attachment order will already have recorded the
    /// datum.
    pub fn log<'a>(&mut self, data: impl Into<LogInput<'a>>) -> OutputResult<()> {
        let data = data.into();

        if self.outputs.is_empty() {
            if self.warn.should_warn("no-outputs") {
                tracing::warn!("no outputs attached, logged data is dropped");
            }
            return Ok(());
        }

        let mut accepted = false;
        for output in &mut self.outputs {
            if output.accepts(data) {
                output.record(data, &self.prefix)?;
                accepted = true;
            }
        }

        if !accepted {
            let key = format!("unaccepted-{}", data.kind());
            if self.warn.should_warn(&key) {
                tracing::warn!(kind = data.kind(), "no attached output accepts this input kind");
            }
        }
        Ok(())
    }

    /// Flush every attached output.
    pub fn dump_all(&mut self) -> OutputResult<()> {
        for output in &mut self.outputs {
            output.dump()?;
        }
        Ok(())
    }

    /// Close every attached output, then detach them all.
    pub fn remove_all(&mut self) -> OutputResult<()> {
        for output in &mut self.outputs {
            output.close()?;
        }
        self.outputs.clear();
        Ok(())
    }

    // ── Prefixes ──────────────────────────────────────────────────────────

    /// Prepend `prefix` to the text of subsequent messages.  Nests.
    pub fn push_prefix(&mut self, prefix: &str) {
        self.prefixes.push(prefix.to_owned());
        self.prefix = self.prefixes.concat();
    }

    /// Remove the most recently pushed prefix.
    ///
    /// # Panics
    /// Panics if no prefix is on the stack.
    pub fn pop_prefix(&mut self) {
        assert!(
            self.prefixes.pop().is_some(),
            "pop_prefix called with an empty prefix stack"
        );
        self.prefix = self.prefixes.concat();
    }

    /// Suppress this logger's own diagnostics.  Outputs keep their own
    /// warning state; see e.g. `CsvOutput::disable_warnings`.
    pub fn disable_warnings(&mut self) {
        self.warn.disable();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
