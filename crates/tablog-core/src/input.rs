//! The datum dispatched to log outputs.

use crate::record::TabularRecord;

/// A borrowed datum handed to the logger and fanned out to every output
/// that accepts its kind.
///
/// `From` impls let call sites pass a `&str` or `&TabularRecord` directly:
///
/// ```rust
/// use tablog_core::{LogInput, TabularRecord};
///
/// let table = TabularRecord::new();
/// assert_eq!(LogInput::from("starting").kind(), "message");
/// assert_eq!(LogInput::from(&table).kind(), "tabular");
/// ```
#[derive(Copy, Clone, Debug)]
pub enum LogInput<'a> {
    /// Free-form message text.
    Message(&'a str),
    /// A structured table of named scalar values.
    Tabular(&'a TabularRecord),
}

impl LogInput<'_> {
    /// Short name of the input kind, used in diagnostics and errors.
    pub fn kind(self) -> &'static str {
        match self {
            LogInput::Message(_) => "message",
            LogInput::Tabular(_) => "tabular",
        }
    }
}

impl<'a> From<&'a str> for LogInput<'a> {
    fn from(text: &'a str) -> Self {
        LogInput::Message(text)
    }
}

impl<'a> From<&'a String> for LogInput<'a> {
    fn from(text: &'a String) -> Self {
        LogInput::Message(text)
    }
}

impl<'a> From<&'a TabularRecord> for LogInput<'a> {
    fn from(table: &'a TabularRecord) -> Self {
        LogInput::Tabular(table)
    }
}
