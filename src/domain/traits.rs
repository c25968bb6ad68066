// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// implementations can be swapped without touching the callers:
//   - JsonSequenceLoader implements SequenceSource
//   - A future CsvLoader or a capture-device stream could too
//   - The application layer only ever sees SequenceSource
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::sequence::SequenceRecord;

/// Any component that can produce labelled face-tracking sequences.
///
/// Implementations:
///   - JsonSequenceLoader → reads the capture app's JSON file
pub trait SequenceSource {
    /// Load every available record from this source.
    /// Consistency filtering happens later, in the feature builder —
    /// a source returns the data exactly as recorded.
    fn load_all(&self) -> Result<Vec<SequenceRecord>>;
}
