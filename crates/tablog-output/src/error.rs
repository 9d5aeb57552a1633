//! Error types for tablog-output.

use thiserror::Error;

/// Errors that can occur when recording or flushing log output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The datum's kind is not handled by the output it was passed to.
    /// Raised directly by [`LogOutput::record`](crate::LogOutput::record);
    /// [`Logger::log`](crate::Logger::log) filters by kind and never
    /// triggers it.
    #[error("{output} does not accept {kind} input")]
    UnsupportedInput {
        output: &'static str,
        kind:   &'static str,
    },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
