//! Column-evolving CSV output backend.
//!
//! # Design
//!
//! One `CsvOutput` owns one destination file.  The column set is not known
//! up front: the first non-empty record fixes the initial header, and any
//! later record whose field set differs triggers a *schema migration* —
//! the file is rewritten under the union of all columns ever seen (old
//! order first, new columns appended), with rows written before the change
//! backfilled as empty cells.  Appending then resumes under the widened
//! header.
//!
//! Two write paths fall out of that:
//!
//! | Path      | Trigger                        | Cost                     |
//! |-----------|--------------------------------|--------------------------|
//! | fast      | field set == current columns   | one buffered row append  |
//! | migration | any field-set difference       | O(file size) rewrite     |
//!
//! The rewrite goes through a temporary file in the destination directory
//! and an atomic rename, so readers of the path never observe a
//! half-written file.  A crash after the original handle is closed but
//! before the rename completes can still orphan the temporary file; a
//! periodic metric logger accepts that window rather than paying for a
//! journal.
//!
//! Nothing touches the filesystem until the first non-empty record, so
//! constructing a `CsvOutput` is infallible and an unused output leaves no
//! file behind.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Reader, Writer};
use tempfile::NamedTempFile;

use tablog_core::{LogInput, TabularRecord, WarnOnce};

use crate::output::{FileMode, LogOutput};
use crate::{OutputError, OutputResult};

// ── Schema ────────────────────────────────────────────────────────────────────

/// Column order and membership for one destination file.
///
/// Order is first-seen and append-only; a column is never dropped or moved
/// once established, so every migration preserves the old order as a
/// prefix of the new one.
#[derive(Debug, Clone, Default)]
struct Schema {
    order:   Vec<String>,
    members: HashSet<String>,
}

impl Schema {
    /// Append `key` as the new rightmost column unless already present.
    fn push(&mut self, key: &str) {
        if self.members.insert(key.to_owned()) {
            self.order.push(key.to_owned());
        }
    }

    /// Set equality with the record's field set — order does not matter,
    /// values are written in column order either way.
    fn matches(&self, table: &TabularRecord) -> bool {
        table.len() == self.order.len() && table.keys().all(|k| self.members.contains(k))
    }

    fn columns(&self) -> &[String] {
        &self.order
    }

    #[inline]
    fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ── CsvOutput ─────────────────────────────────────────────────────────────────

/// Writes tabular records to a single CSV file whose columns grow with the
/// data.
///
/// Accepts tabular input only.  Rows are buffered by the underlying CSV
/// writer; call [`dump`](LogOutput::dump) (or [`close`](LogOutput::close))
/// before reading the file back.
pub struct CsvOutput {
    path:     PathBuf,
    mode:     FileMode,
    writer:   Option<Writer<File>>,
    schema:   Schema,
    rewrites: u64,
    warn:     WarnOnce,
}

impl CsvOutput {
    /// Create an output that will log to `path`, truncating any existing
    /// file on first write.  The file (and its parent directories) is not
    /// created until the first non-empty record arrives.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_mode(path, FileMode::Truncate)
    }

    /// Like [`new`](Self::new) with an explicit initial [`FileMode`].
    pub fn with_mode(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            path:     path.into(),
            mode,
            writer:   None,
            schema:   Schema::default(),
            rewrites: 0,
            warn:     WarnOnce::new(),
        }
    }

    /// The destination path this output logs to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current column order.  Empty until the first non-empty record.
    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    /// How many schema migrations (full-file rewrites) have happened.
    pub fn schema_rewrites(&self) -> u64 {
        self.rewrites
    }

    /// Suppress this output's diagnostics (schema-change and empty-record
    /// warnings).
    pub fn disable_warnings(&mut self) {
        self.warn.disable();
    }

    /// First non-empty record: establish the schema and create or adopt
    /// the file.
    ///
    /// Append mode over an existing non-empty file adopts the file's own
    /// header row as the schema instead of the record's fields, so a
    /// record that differs goes through the ordinary migration path
    /// rather than appending misaligned cells.
    fn establish(&mut self, table: &TabularRecord) -> OutputResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        if self.mode == FileMode::Append {
            let has_rows = fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false);
            if has_rows {
                return self.resume_existing();
            }
        }

        let file = match self.mode {
            FileMode::Truncate => File::create(&self.path)?,
            FileMode::Append => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };

        let mut schema = Schema::default();
        for key in table.keys() {
            schema.push(key);
        }

        let mut writer = Writer::from_writer(file);
        writer.write_record(schema.columns())?;
        self.schema = schema;
        self.writer = Some(writer);
        Ok(())
    }

    /// Adopt the header row of an existing file as the schema.  The
    /// append handle is opened later, on the first actual row write.
    fn resume_existing(&mut self) -> OutputResult<()> {
        let mut reader = Reader::from_path(&self.path)?;
        let mut schema = Schema::default();
        for column in reader.headers()? {
            schema.push(column);
        }
        self.schema = schema;
        Ok(())
    }

    /// Rewrite the whole file under the union of the current columns and
    /// `table`'s fields.
    ///
    /// Sequence: flush and close the live handle, stream the old rows into
    /// a temporary file under the widened header (new columns backfilled
    /// empty), atomically rename the temporary file over the original,
    /// commit the widened schema.  The caller reopens for append.
    fn migrate(&mut self, table: &TabularRecord) -> OutputResult<()> {
        if self.warn.should_warn("schema-change") {
            tracing::warn!(
                path = %self.path.display(),
                "column set changed, rewriting the file under the union header"
            );
        }

        // Every buffered row must be on disk before readback.
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        let mut merged = self.schema.clone();
        for key in table.keys() {
            merged.push(key);
        }

        // Same directory as the destination, so the final rename cannot
        // cross filesystems.
        let dir = self
            .path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut out = Writer::from_writer(tmp.as_file_mut());
            out.write_record(merged.columns())?;

            // Old rows are positional under the old column order, which
            // `merged` preserves as a prefix.
            let old_width = self.schema.len();
            let mut reader = Reader::from_path(&self.path)?;
            for row in reader.records() {
                let row = row?;
                let cells = (0..merged.len())
                    .map(|i| if i < old_width { row.get(i).unwrap_or("") } else { "" });
                out.write_record(cells)?;
            }
            out.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        // Commit immediately after the swap: the in-memory columns must
        // match the on-disk header even if a later reopen fails.
        self.schema = merged;
        self.rewrites += 1;
        Ok(())
    }

    fn open_append(&self) -> OutputResult<Writer<File>> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        Ok(Writer::from_writer(file))
    }

    /// Append one row in column order; fields the record lacks are stored
    /// as empty cells.
    fn append_row(
        writer: &mut Writer<File>,
        schema: &Schema,
        table: &TabularRecord,
    ) -> OutputResult<()> {
        let row: Vec<String> = schema
            .columns()
            .iter()
            .map(|column| table.get(column).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
        Ok(())
    }
}

impl LogOutput for CsvOutput {
    fn accepts(&self, data: LogInput<'_>) -> bool {
        matches!(data, LogInput::Tabular(_))
    }

    fn record(&mut self, data: LogInput<'_>, _prefix: &str) -> OutputResult<()> {
        let LogInput::Tabular(table) = data else {
            return Err(OutputError::UnsupportedInput {
                output: "CsvOutput",
                kind:   data.kind(),
            });
        };

        if table.is_empty() {
            if self.warn.should_warn("empty-record") {
                tracing::warn!(path = %self.path.display(), "empty record, nothing to write");
            }
            return Ok(());
        }

        if self.schema.is_empty() {
            self.establish(table)?;
        }
        if !self.schema.matches(table) {
            self.migrate(table)?;
        }

        // The handle is absent after a migration, after close(), and after
        // adopting an existing file; all three resume by appending.
        let mut writer = match self.writer.take() {
            Some(writer) => writer,
            None => self.open_append()?,
        };
        let appended = Self::append_row(&mut writer, &self.schema, table);
        self.writer = Some(writer);
        appended?;

        for key in table.keys() {
            table.mark(key);
        }
        Ok(())
    }

    fn dump(&mut self) -> OutputResult<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}
