// ============================================================
// Layer 4 — Sequence Loader
// ============================================================
// Reads the capture app's JSON file: a single array of sequence
// objects (see SequenceRecord for the schema). serde_json does
// the heavy lifting — we only add path context to the errors
// so a bad file name or truncated download is diagnosable.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::sequence::SequenceRecord;
use crate::domain::traits::SequenceSource;

/// Loads all sequence records from one JSON file.
/// Implements the SequenceSource trait from Layer 3.
pub struct JsonSequenceLoader {
    /// Path to the JSON array of records
    path: PathBuf,
}

impl JsonSequenceLoader {
    /// Create a new loader pointed at a record file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SequenceSource for JsonSequenceLoader {
    fn load_all(&self) -> Result<Vec<SequenceRecord>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read record file '{}'", self.path.display()))?;

        let records: Vec<SequenceRecord> = serde_json::from_str(&text)
            .with_context(|| format!("Malformed record file '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} sequences from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
