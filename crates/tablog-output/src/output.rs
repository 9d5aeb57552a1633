//! The `LogOutput` trait implemented by all backends.

use tablog_core::LogInput;

use crate::OutputResult;

/// A destination for logged data.
///
/// The logger holds outputs as `Box<dyn LogOutput>` and calls
/// [`accepts`](Self::accepts) before [`record`](Self::record), so an output
/// only ever sees the input kinds it claims.  Calling `record` directly
/// with an unaccepted kind is a contract violation and returns
/// [`OutputError::UnsupportedInput`](crate::OutputError::UnsupportedInput).
///
/// `dump` and `close` have default no-op implementations so unbuffered
/// outputs only need to implement the first two methods.
///
/// # Example — message counter
///
/// ```rust
/// use tablog_core::LogInput;
/// use tablog_output::{LogOutput, OutputResult};
///
/// struct Counter { messages: usize }
///
/// impl LogOutput for Counter {
///     fn accepts(&self, data: LogInput<'_>) -> bool {
///         matches!(data, LogInput::Message(_))
///     }
///
///     fn record(&mut self, _data: LogInput<'_>, _prefix: &str) -> OutputResult<()> {
///         self.messages += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait LogOutput {
    /// Whether this output handles `data`'s kind.
    fn accepts(&self, data: LogInput<'_>) -> bool;

    /// Record one datum.
    ///
    /// `prefix` is the logger's current prefix string; outputs that render
    /// message text prepend it.  Tabular records carry their own prefixes,
    /// so table-only outputs ignore it.
    fn record(&mut self, data: LogInput<'_>, prefix: &str) -> OutputResult<()>;

    /// Flush buffered data to the destination.
    fn dump(&mut self) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and release the destination.
    ///
    /// Idempotent — safe to call more than once.
    fn close(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

// ── FileMode ──────────────────────────────────────────────────────────────────

/// How a file-backed output opens its destination on first write.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileMode {
    /// Create the file, replacing any previous contents.
    #[default]
    Truncate,
    /// Keep existing contents and append after them.  The CSV backend
    /// resumes from the file's own header row; a header is only written
    /// if the file is missing or empty.
    Append,
}
