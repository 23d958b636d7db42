//! # hanzidb I/O - Source and Sink Implementations
//!
//! This crate provides the concrete file readers and writers for the hanzidb
//! converter pipeline.
//!
//! ## Features
//!
//! ### Data Sources
//! - **CSV**: Whole-file read of the character dataset, tolerant of a UTF-8 byte-order mark
//!
//! ### Data Sinks
//! - **CSV**: Enhanced rows with a fixed header and column order
//! - **JSON**: A single pretty-printed array with non-ASCII text kept literal
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hanzidb_core::{Sink, Source};
//! use hanzidb_io::{sink_json::JsonSink, source_csv::CsvSource};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut source = CsvSource::new("csv-source".to_string(), "data/source.csv".into());
//! let rows = source.read_rows()?;
//!
//! let mut sink = JsonSink::new("json-sink".to_string(), "data/hanzidb.json".into());
//! let written = Sink::<hanzidb_core::JsonRow>::write_all(&mut sink, &[])?;
//! assert_eq!(written, 0);
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

use hanzidb_core::HanziError;
use std::path::Path;

/// Enhanced-row CSV sink
pub mod sink_csv;

/// JSON array sink
pub mod sink_json;

/// CSV file source implementation
pub mod source_csv;

/// Create the parent directory of `path` if it does not exist yet
pub fn create_parent_dirs(path: &Path) -> Result<(), HanziError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| HanziError::io(dir, e))
        }
        _ => Ok(()),
    }
}
