//! Tabular key-value records.
//!
//! # Design
//!
//! A [`TabularRecord`] is an insertion-ordered map from field name to
//! [`Scalar`].  Order matters: the first record a writer sees fixes its
//! column order, so the record stores keys and values in parallel `Vec`s
//! (first-seen order) with a `HashMap` index for O(1) overwrite and lookup.
//! Re-recording a key replaces its value in place and keeps its slot.
//!
//! Outputs receive records by shared reference, but must report back which
//! fields they persisted (the *consumed* set) so that `clear()` can warn
//! about values that were recorded and then silently dropped.  That makes
//! [`mark`](TabularRecord::mark) a `&self` method backed by a `RefCell`,
//! which in turn makes the type `!Sync` — the logger is a single-thread
//! companion to a training loop, so nothing is lost.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::value::Scalar;
use crate::warn::WarnOnce;

// ── StatPlacement ─────────────────────────────────────────────────────────────

/// Where the statistic name goes relative to the key in
/// [`TabularRecord::record_stats`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum StatPlacement {
    /// `AverageLoss`, `StdLoss`, …
    Front,
    /// `LossAverage`, `LossStd`, …
    #[default]
    Back,
}

// ── TabularRecord ─────────────────────────────────────────────────────────────

/// An insertion-ordered collection of named scalar values, filled once per
/// logging interval and handed to [`LogInput::Tabular`](crate::LogInput).
///
/// ```rust
/// use tablog_core::TabularRecord;
///
/// let mut table = TabularRecord::new();
/// table.record("Epoch", 3usize);
/// table.record("Loss", 0.25);
/// assert_eq!(table.keys().collect::<Vec<_>>(), ["Epoch", "Loss"]);
/// ```
#[derive(Debug, Default)]
pub struct TabularRecord {
    keys:     Vec<String>,
    values:   Vec<Scalar>,
    index:    HashMap<String, usize>,
    consumed: RefCell<HashSet<String>>,
    prefixes: Vec<String>,
    prefix:   String,
    warn:     WarnOnce,
}

impl TabularRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under the current prefix + `key`.
    ///
    /// A new key is appended after all existing keys; a known key keeps its
    /// slot and only its value changes.
    pub fn record(&mut self, key: &str, value: impl Into<Scalar>) {
        let key = if self.prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}{key}", self.prefix)
        };
        let value = value.into();

        match self.index.get(&key) {
            Some(&slot) => self.values[slot] = value,
            None => {
                self.index.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.values.push(value);
            }
        }
    }

    /// Record five summary statistics of `values` under derived keys.
    ///
    /// With `StatPlacement::Back` the keys are `{key}Average`, `{key}Std`,
    /// `{key}Median`, `{key}Min`, `{key}Max`; with `Front` the statistic
    /// name leads.  `Std` is the population standard deviation.  An empty
    /// slice records NaN for all five.
    pub fn record_stats(&mut self, key: &str, values: &[f64], placement: StatPlacement) {
        let stats = if values.is_empty() {
            [f64::NAN; 5]
        } else {
            [
                mean(values),
                std_dev(values),
                median(values),
                values.iter().copied().fold(f64::INFINITY, f64::min),
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ]
        };

        for (name, value) in ["Average", "Std", "Median", "Min", "Max"].iter().zip(stats) {
            let column = match placement {
                StatPlacement::Front => format!("{name}{key}"),
                StatPlacement::Back  => format!("{key}{name}"),
            };
            self.record(&column, value);
        }
    }

    /// Look up a value by its full (prefixed) key.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.index.get(key).map(|&slot| &self.values[slot])
    }

    /// Field names in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// `(key, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.keys().zip(self.values.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    // ── Consumed-field bookkeeping ────────────────────────────────────────

    /// Note that an output persisted the field `key`.
    ///
    /// Callable through a shared reference because outputs only hold
    /// `&TabularRecord`.
    pub fn mark(&self, key: &str) {
        self.consumed.borrow_mut().insert(key.to_owned());
    }

    /// Mark every currently recorded field as consumed.
    pub fn mark_all(&self) {
        let mut consumed = self.consumed.borrow_mut();
        for key in &self.keys {
            consumed.insert(key.clone());
        }
    }

    pub fn is_marked(&self, key: &str) -> bool {
        self.consumed.borrow().contains(key)
    }

    /// Drop all fields and consumed marks, warning once per field that was
    /// recorded but never consumed by any output.
    pub fn clear(&mut self) {
        let consumed = self.consumed.get_mut();
        for key in &self.keys {
            if !consumed.contains(key.as_str()) && self.warn.should_warn(key) {
                tracing::warn!(key = %key, "recorded value was never consumed by any output");
            }
        }
        self.keys.clear();
        self.values.clear();
        self.index.clear();
        consumed.clear();
    }

    // ── Prefixes ──────────────────────────────────────────────────────────

    /// Prepend `prefix` to the keys of subsequent `record` calls.  Nests.
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

    /// Suppress this record's own diagnostics (never-consumed warnings).
    pub fn disable_warnings(&mut self) {
        self.warn.disable();
    }
}

/// Renders the record as an aligned two-column table, keys sorted, for
/// console and text-file outputs:
///
/// ```text
/// -----  ----
/// Epoch  3
/// Loss   0.25
/// -----  ----
/// ```
impl fmt::Display for TabularRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<(&str, String)> =
            self.iter().map(|(k, v)| (k, v.to_string())).collect();
        if rows.is_empty() {
            return Ok(());
        }
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let val_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let rule = format!("{}  {}", "-".repeat(key_width), "-".repeat(val_width));

        writeln!(f, "{rule}")?;
        for (key, value) in &rows {
            writeln!(f, "{key:<key_width$}  {value}")?;
        }
        write!(f, "{rule}")
    }
}

// ── Statistics helpers ────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
