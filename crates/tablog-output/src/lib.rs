//! `tablog-output` — log outputs for the `tablog` metric logger.
//!
//! Three backends are provided, all implementing [`LogOutput`]:
//!
//! | Backend        | Accepts            | Destination                        |
//! |----------------|--------------------|------------------------------------|
//! | [`CsvOutput`]  | tabular            | one CSV file, column-evolving      |
//! | [`TextOutput`] | messages + tabular | append-only text file              |
//! | [`StdOutput`]  | messages + tabular | stdout                             |
//!
//! [`Logger`] owns any number of boxed outputs and fans each datum out to
//! every output that accepts its kind.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tablog_core::TabularRecord;
//! use tablog_output::{CsvOutput, Logger, StdOutput};
//!
//! let mut logger = Logger::new();
//! logger.add_output(CsvOutput::new("runs/progress.csv"));
//! logger.add_output(StdOutput::new());
//!
//! let mut table = TabularRecord::new();
//! table.record("Epoch", 1usize);
//! table.record("Loss", 0.73);
//! logger.log("epoch done")?;
//! logger.log(&table)?;
//! logger.dump_all()?;
//! table.clear();
//! ```

pub mod csv;
pub mod error;
pub mod logger;
pub mod output;
pub mod text;


// `self::` disambiguates from the `csv` dependency crate.
pub use self::csv::CsvOutput;
pub use error::{OutputError, OutputResult};
pub use logger::Logger;
pub use output::{FileMode, LogOutput};
pub use text::{StdOutput, TextOutput};
