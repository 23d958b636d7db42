use crate::create_parent_dirs;
use anyhow::Result;
use hanzidb_core::{HanziError, Operator, Sink};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes all items as one pretty-printed JSON array
///
/// Output is UTF-8 with non-ASCII characters left unescaped and no trailing
/// newline.
pub struct JsonSink {
    id: String,
    path: PathBuf,
}

impl JsonSink {
    pub fn new(id: String, path: PathBuf) -> Self {
        Self { id, path }
    }
}

impl Operator for JsonSink {
    fn name(&self) -> &str {
        &self.id
    }
}

impl<T: Serialize> Sink<T> for JsonSink {
    fn destination(&self) -> &Path {
        &self.path
    }

    fn write_all(&mut self, items: &[T]) -> Result<usize> {
        create_parent_dirs(&self.path)?;
        let file = File::create(&self.path).map_err(|e| HanziError::io(&self.path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, items).map_err(|e| HanziError::json(&self.path, e))?;
        out.flush().map_err(|e| HanziError::io(&self.path, e))?;

        info!("{}: wrote {} rows to {}", self.id, items.len(), self.path.display());
        Ok(items.len())
    }
}
