//! Plain-text output backends: an append-only log file and stdout.
//!
//! Both accept every input kind.  Messages become one line each,
//! optionally led by a local wall-clock timestamp; tabular records are
//! written as their aligned table rendering (no timestamp) and marked
//! fully consumed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use tablog_core::LogInput;

use crate::output::LogOutput;
use crate::OutputResult;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── TextOutput ────────────────────────────────────────────────────────────────

/// Appends human-readable log lines to a text file.
///
/// The file is opened in append mode at construction (earlier runs are kept)
/// and parent directories are created as needed.
pub struct TextOutput {
    file:           BufWriter<File>,
    with_timestamp: bool,
}

impl TextOutput {
    /// Open `path` for appending, with timestamped message lines.
    pub fn new(path: impl AsRef<Path>) -> OutputResult<Self> {
        Self::open(path, true)
    }

    /// Open `path` for appending, without timestamps.
    pub fn without_timestamp(path: impl AsRef<Path>) -> OutputResult<Self> {
        Self::open(path, false)
    }

    fn open(path: impl AsRef<Path>, with_timestamp: bool) -> OutputResult<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
            with_timestamp,
        })
    }
}

impl LogOutput for TextOutput {
    fn accepts(&self, _data: LogInput<'_>) -> bool {
        true
    }

    fn record(&mut self, data: LogInput<'_>, prefix: &str) -> OutputResult<()> {
        match data {
            LogInput::Message(text) => {
                if self.with_timestamp {
                    writeln!(self.file, "{} | {prefix}{text}", timestamp())?;
                } else {
                    writeln!(self.file, "{prefix}{text}")?;
                }
            }
            LogInput::Tabular(table) => {
                writeln!(self.file, "{table}")?;
                table.mark_all();
            }
        }
        Ok(())
    }

    fn dump(&mut self) -> OutputResult<()> {
        self.file.flush()?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        self.dump()
    }
}

// ── StdOutput ─────────────────────────────────────────────────────────────────

/// Writes the same rendering as [`TextOutput`] to stdout.
#[derive(Debug, Default)]
pub struct StdOutput {
    plain: bool,
}

impl StdOutput {
    /// Timestamped message lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Message lines without timestamps.
    pub fn without_timestamp() -> Self {
        Self { plain: true }
    }
}

impl LogOutput for StdOutput {
    fn accepts(&self, _data: LogInput<'_>) -> bool {
        true
    }

    fn record(&mut self, data: LogInput<'_>, prefix: &str) -> OutputResult<()> {
        let mut out = io::stdout().lock();
        match data {
            LogInput::Message(text) => {
                if self.plain {
                    writeln!(out, "{prefix}{text}")?;
                } else {
                    writeln!(out, "{} | {prefix}{text}", timestamp())?;
                }
            }
            LogInput::Tabular(table) => {
                writeln!(out, "{table}")?;
                table.mark_all();
            }
        }
        Ok(())
    }

    fn dump(&mut self) -> OutputResult<()> {
        io::stdout().flush()?;
        Ok(())
    }
}
