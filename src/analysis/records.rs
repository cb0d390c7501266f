use std::fs::File;
use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use log::debug;

// @module: Persisted per-line classification results

/// One classified subtitle line.
///
/// Field order matches the table header: `time,line,emotion,score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    /// Cue start time in decimal seconds
    pub time: f64,

    /// The dialogue line that was classified
    pub line: String,

    /// Selected emotion label
    pub emotion: String,

    /// Confidence of the selected label, in [0, 1]
    pub score: f64,
}

impl EmotionRecord {
    /// Create a new record
    pub fn new(time: f64, line: impl Into<String>, emotion: impl Into<String>, score: f64) -> Self {
        Self {
            time,
            line: line.into(),
            emotion: emotion.into(),
            score,
        }
    }
}

/// Write records to a CSV table, replacing any prior file at that path.
///
/// This is the sole persistence boundary between the analysis and the
/// report pipelines.
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[EmotionRecord]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create result table: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    if records.is_empty() {
        // serialize() emits the header lazily, so an empty table needs it spelled out
        writer.write_record(["time", "line", "emotion", "score"])
            .with_context(|| format!("Failed to write header to {}", path.display()))?;
    }

    for record in records {
        writer.serialize(record)
            .with_context(|| format!("Failed to write record to {}", path.display()))?;
    }

    writer.flush()
        .with_context(|| format!("Failed to flush result table: {}", path.display()))?;

    debug!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}

/// Load a previously persisted record table.
///
/// A missing or unreadable table is fatal - the report pipeline has no
/// other data source.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<EmotionRecord>> {
    let path = path.as_ref();

    let file = File::open(path)
        .with_context(|| format!("Failed to open result table: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: EmotionRecord = row
            .with_context(|| format!("Failed to parse record in {}", path.display()))?;
        records.push(record);
    }

    debug!("Loaded {} record(s) from {}", records.len(), path.display());
    Ok(records)
}
