//! # hanzidb Core - Hanzi Dataset Converter Core Library
//!
//! This crate provides the foundational types, traits, and configuration used by the
//! hanzidb converter. It defines the record shapes that flow between pipeline stages,
//! the operator interfaces those stages implement, and the run configuration.
//!
//! ## Key Components
//!
//! - **Records**: `SourceRow` for raw CSV rows, `EnhancedRow` and `JsonRow` for the two outputs
//! - **Operator Traits**: Source, Transform, and Sink abstractions for building the pipeline
//! - **Configuration**: `ConvertSpec`, the paths a single conversion run reads and writes
//! - **Error Handling**: `HanziError` for I/O, CSV, and JSON failures tied to a path
//!
//! ## Example Usage
//!
//! ```rust
//! use hanzidb_core::{ConvertSpec, SourceRow};
//!
//! let spec = ConvertSpec::new("data/source.csv", "data/hanzidb.json", None);
//! assert_eq!(spec.csv_target(), std::path::Path::new("data/source.csv"));
//!
//! let row: SourceRow = [("character", " 国 ")].into_iter().collect();
//! assert_eq!(row.trimmed("character"), "国");
//! assert_eq!(row.trimmed("pinyin"), "");
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Column order of the enhanced CSV output
///
/// The header line is written in exactly this order and every enhanced row
/// carries one value per name.
pub const FIELD_NAMES: [&str; 19] = [
    "frequency_rank",
    "character",
    "pinyin",
    "pinyin_alternates",
    "common_word_1",
    "common_word_1_pinyin",
    "common_word_1_definition",
    "common_word_2",
    "common_word_2_pinyin",
    "common_word_2_definition",
    "definition",
    "radical",
    "radical_code",
    "stroke_count",
    "hsk_level",
    "general_standard_num",
    "traditional_character",
    "same_simp_trad",
    "alternate_characters",
];

/// Separator used between entries of `alternate_characters`
pub const VARIANT_SEPARATOR: &str = "|";

/// One raw row of the source CSV, keyed by header name
///
/// Values are stored exactly as read. Columns missing from a short record are
/// simply absent; callers read them through [`SourceRow::trimmed`], which
/// treats an absent column like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    fields: HashMap<String, String>,
}

impl SourceRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Raw value of a column, if the column exists in this row
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value of a column with surrounding whitespace removed
    ///
    /// Absent columns read as `""`.
    pub fn trimmed(&self, name: &str) -> &str {
        self.get(name).unwrap_or("").trim()
    }
}

impl<K, V> FromIterator<(K, V)> for SourceRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = SourceRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Normalized row of the enhanced CSV
///
/// Field declaration order matches [`FIELD_NAMES`]; the CSV writer derives the
/// header from it, so the two must stay in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedRow {
    pub frequency_rank: String,
    pub character: String,
    pub pinyin: String,
    pub pinyin_alternates: String,
    pub common_word_1: String,
    pub common_word_1_pinyin: String,
    pub common_word_1_definition: String,
    pub common_word_2: String,
    pub common_word_2_pinyin: String,
    pub common_word_2_definition: String,
    pub definition: String,
    pub radical: String,
    pub radical_code: String,
    pub stroke_count: String,
    pub hsk_level: String,
    pub general_standard_num: String,
    pub traditional_character: String,
    pub same_simp_trad: String,
    pub alternate_characters: String,
}

/// A number coerced from a text field
///
/// Whole values are kept as integers so they serialize without a fractional
/// part (`10`, not `10.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

/// Sparse application record written to the JSON array
///
/// Every optional field is skipped when absent, so an object only carries the
/// keys that hold a value. Key order follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JsonRow {
    pub character: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traditional_character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin_alternates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_1_pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_1_definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_2_pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_word_2_definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsk_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical_code: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_standard_num: Option<i64>,
}

/// Both outputs derived from one kept source row
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub enhanced: EnhancedRow,
    pub json: JsonRow,
}

/// Error types specific to hanzidb conversion
///
/// Every variant that touches the filesystem carries the path involved, so a
/// failure message always names the file.
#[derive(Debug, thiserror::Error)]
pub enum HanziError {
    /// Opening, reading, creating, or writing a file failed
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer rejected the data
    #[error("csv error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON serialization failed
    #[error("json error on {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HanziError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HanziError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        HanziError::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        HanziError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Base trait for all pipeline operators
///
/// Provides the name used in log lines for the stage.
pub trait Operator {
    /// Returns the identifier of this operator
    fn name(&self) -> &str;
}

/// Trait for data source operators
///
/// A source produces the full set of raw rows in one call. The converter
/// reads its input once, up front, before anything is written.
pub trait Source: Operator {
    /// Read every row from the underlying input
    fn read_rows(&mut self) -> Result<Vec<SourceRow>>;
}

/// Trait for row transformation operators
///
/// A transform maps one raw row to its pair of output records, or drops it.
pub trait Transform: Operator {
    /// Returns `None` when the row is dropped
    fn apply(&self, row: &SourceRow) -> Option<CharacterRecord>;
}

/// Trait for data sink operators
///
/// A sink writes a complete collection of items to its destination and reports
/// how many items it wrote.
pub trait Sink<T>: Operator {
    /// Where this sink writes
    fn destination(&self) -> &Path;

    /// Write all items, replacing any previous content at the destination
    fn write_all(&mut self, items: &[T]) -> Result<usize>;
}

/// Configuration of a single conversion run
///
/// Built by the CLI from its arguments. `output_csv` defaults to the input
/// path, in which case the source file is overwritten in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertSpec {
    /// Source CSV path
    pub input: PathBuf,

    /// Destination of the JSON array
    pub output_json: PathBuf,

    /// Destination of the enhanced CSV
    ///
    /// `None` means "write back to `input`".
    #[serde(default)]
    pub output_csv: Option<PathBuf>,
}

impl ConvertSpec {
    pub fn new(
        input: impl Into<PathBuf>,
        output_json: impl Into<PathBuf>,
        output_csv: Option<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output_json: output_json.into(),
            output_csv,
        }
    }

    /// Resolved destination of the enhanced CSV
    pub fn csv_target(&self) -> &Path {
        self.output_csv.as_deref().unwrap_or(&self.input)
    }

    /// True when the enhanced CSV replaces the source file
    pub fn overwrites_input(&self) -> bool {
        self.csv_target() == self.input.as_path()
    }
}

/// Count of JSON rows per HSK level
///
/// Levels 1 through 6 are counted individually; rows without a level, or with
/// a level outside that range, count as unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HskTally {
    pub levels: [usize; 6],
    pub unknown: usize,
}

impl HskTally {
    pub fn record(&mut self, level: Option<i64>) {
        match level {
            Some(l @ 1..=6) => self.levels[(l - 1) as usize] += 1,
            _ => self.unknown += 1,
        }
    }

    /// Number of rows counted at `level` (1-6)
    pub fn level(&self, level: usize) -> usize {
        match level {
            1..=6 => self.levels[level - 1],
            _ => 0,
        }
    }
}

impl<'a> FromIterator<&'a JsonRow> for HskTally {
    fn from_iter<I: IntoIterator<Item = &'a JsonRow>>(iter: I) -> Self {
        let mut tally = HskTally::default();
        for row in iter {
            tally.record(row.hsk_level);
        }
        tally
    }
}

impl fmt::Display for HskTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.levels.iter().enumerate() {
            write!(f, "hsk{}={} ", i + 1, count)?;
        }
        write!(f, "unknown={}", self.unknown)
    }
}
