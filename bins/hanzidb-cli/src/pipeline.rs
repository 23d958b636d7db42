use anyhow::{Context, Result};
use hanzidb_core::{ConvertSpec, HskTally, Operator, Sink, Source};
use hanzidb_io::{sink_csv::CsvSink, sink_json::JsonSink, source_csv::CsvSource};
use hanzidb_tx::VariantNormalizer;
use tracing::warn;

/// Row counts from one conversion run
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub json_rows: usize,
    pub csv_rows: usize,
    pub skipped: usize,
    pub hsk: HskTally,
}

/// source -> normalize -> (csv sink, json sink)
///
/// The input is fully read before either output is opened, so the CSV target
/// may be the input file itself.
pub fn run(spec: &ConvertSpec) -> Result<Summary> {
    if spec.overwrites_input() {
        warn!("no --output-csv given, {} will be overwritten in place", spec.input.display());
    }

    let mut source = CsvSource::new("csv-source".into(), spec.input.clone());
    let rows = source
        .read_rows()
        .with_context(|| format!("{}: read {}", source.name(), spec.input.display()))?;

    let normalizer = VariantNormalizer::new("normalize".into());
    let normalized = normalizer.normalize_all(&rows);
    let skipped = normalized.skipped;
    let (enhanced, json) = normalized.into_parts();

    let hsk: HskTally = json.iter().collect();

    let mut csv_sink = CsvSink::new("csv-sink".into(), spec.csv_target().to_path_buf());
    let csv_rows = csv_sink
        .write_all(&enhanced)
        .with_context(|| format!("{}: write {}", csv_sink.name(), csv_sink.destination().display()))?;

    let mut json_sink = JsonSink::new("json-sink".into(), spec.output_json.clone());
    let json_rows = json_sink
        .write_all(&json[..])
        .with_context(|| format!("{}: write {}", json_sink.name(), spec.output_json.display()))?;

    Ok(Summary {
        json_rows,
        csv_rows,
        skipped,
        hsk,
    })
}
