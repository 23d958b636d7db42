use anyhow::Result;
use csv::ReaderBuilder;
use hanzidb_core::{HanziError, Operator, Source, SourceRow};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvSource {
    pub id: String,
    pub path: PathBuf,
}

impl CsvSource {
    pub fn new(id: String, path: PathBuf) -> Self {
        Self { id, path }
    }
}

/// Parse headed CSV into rows keyed by header name
///
/// Records shorter than the header are accepted; their missing columns are
/// left out of the row.
pub fn parse_rows<R: Read>(input: R) -> Result<Vec<SourceRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    debug!("csv headers: {:?}", headers);

    let mut rows: Vec<SourceRow> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }
    Ok(rows)
}

impl Operator for CsvSource {
    fn name(&self) -> &str {
        &self.id
    }
}

impl Source for CsvSource {
    fn read_rows(&mut self) -> Result<Vec<SourceRow>> {
        let bytes = std::fs::read(&self.path).map_err(|e| HanziError::io(&self.path, e))?;
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        let rows = parse_rows(body).map_err(|e| HanziError::csv(&self.path, e))?;
        info!("{}: read {} rows from {}", self.id, rows.len(), self.path.display());
        Ok(rows)
    }
}
