use crate::create_parent_dirs;
use anyhow::Result;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use hanzidb_core::{EnhancedRow, HanziError, Operator, Sink, FIELD_NAMES};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvSink {
    id: String,
    path: PathBuf,
}

impl CsvSink {
    pub fn new(id: String, path: PathBuf) -> Self {
        Self { id, path }
    }
}

impl Operator for CsvSink {
    fn name(&self) -> &str {
        &self.id
    }
}

impl Sink<EnhancedRow> for CsvSink {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn write_all(&mut self, items: &[EnhancedRow]) -> Result<usize> {
        create_parent_dirs(&self.path)?;
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Necessary)
            .from_path(&self.path)
            .map_err(|e| HanziError::csv(&self.path, e))?;

        // serialize() only emits the header alongside the first record
        if items.is_empty() {
            writer
                .write_record(FIELD_NAMES)
                .map_err(|e| HanziError::csv(&self.path, e))?;
        }
        for item in items {
            writer
                .serialize(item)
                .map_err(|e| HanziError::csv(&self.path, e))?;
        }
        writer.flush().map_err(|e| HanziError::io(&self.path, e))?;

        info!("{}: wrote {} rows to {}", self.id, items.len(), self.path.display());
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn row(character: &str, definition: &str) -> EnhancedRow {
        EnhancedRow {
            character: character.into(),
            definition: definition.into(),
            ..Default::default()
        }
    }

    #[test]
    fn writes_header_then_rows_with_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/enhanced.csv");
        let mut sink = CsvSink::new("csv".into(), path.clone());

        let n = sink.write_all(&[row("你", "you"), row("好", "good, well")]).unwrap();
        assert_eq!(n, 2);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], FIELD_NAMES.join(","));
        assert_eq!(lines[1], ",你,,,,,,,,,you,,,,,,,,");
        assert_eq!(lines[2], ",好,,,,,,,,,\"good, well\",,,,,,,,");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn empty_collection_still_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let mut sink = CsvSink::new("csv".into(), path.clone());
        assert_eq!(sink.write_all(&[]).unwrap(), 0);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{}\r\n", FIELD_NAMES.join(","))
        );
    }

    #[test]
    fn replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is much longer than the new file\n".repeat(50)).unwrap();

        let mut sink = CsvSink::new("csv".into(), path.clone());
        sink.write_all(&[row("一", "one")]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 2);
    }
}
