// ============================================================
// Layer 4 — Feature Builder
// ============================================================
// Converts raw SequenceRecords into the in-memory feature set the
// rest of the pipeline works on: a rectangular block of
// n_samples × seq_len × 2 coordinate values plus one class index
// per sample.
//
// Filtering policy (deliberate, and a testable property):
//   - A record whose coordinate count does not match its declared
//     sequenceLength is DROPPED, not an error. Capture glitches are
//     common on device and one bad sequence must not kill a run.
//   - The drop is logged and the count is surfaced on the result so
//     callers can see how much data was discarded.
//   - Records that pass their own length check but differ from the
//     first valid record's length are dropped too — the feature
//     block is rectangular.
//
// Normalization: a sample whose maximum coordinate exceeds 1.0 is
// divided by that maximum, bringing it into [0, 1]. Samples already
// in range pass through unchanged.

use crate::domain::labels::LabelVocabulary;
use crate::domain::sequence::SequenceRecord;

/// One sample: seq_len rows of (x, y)
pub type CoordSeq = Vec<[f32; 2]>;

/// The validated, normalized, label-encoded training data.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    /// n_samples sequences, each exactly seq_len long
    pub samples: Vec<CoordSeq>,
    /// Class index per sample, parallel to `samples`
    pub labels: Vec<usize>,
    /// Time steps per sample
    pub seq_len: usize,
    /// How many input records the filters discarded
    pub dropped: usize,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Build the feature set and its label vocabulary from raw records.
///
/// The vocabulary is built from the labels of the KEPT records only,
/// so a class that exists solely in corrupt records does not get an
/// output neuron.
pub fn build_feature_set(records: &[SequenceRecord]) -> (FeatureSet, LabelVocabulary) {
    // ── Pass 1: consistency filter ────────────────────────────────────────────
    let mut kept: Vec<&SequenceRecord> = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        if record.is_consistent() {
            kept.push(record);
        } else {
            tracing::debug!(
                "Dropping '{}' sequence: {} coordinates but declared length {}",
                record.activity_type,
                record.coordinates.len(),
                record.sequence_length
            );
            dropped += 1;
        }
    }

    // ── Pass 2: rectangularity filter ─────────────────────────────────────────
    // The first consistent record fixes seq_len for the whole set.
    let seq_len = kept.first().map(|r| r.coordinates.len()).unwrap_or(0);
    let before = kept.len();
    kept.retain(|r| r.coordinates.len() == seq_len);
    let ragged = before - kept.len();
    if ragged > 0 {
        tracing::warn!(
            "Dropped {} sequences whose length differs from the first ({} steps)",
            ragged,
            seq_len
        );
        dropped += ragged;
    }

    if dropped > 0 {
        tracing::warn!(
            "Filtered out {} of {} input sequences, {} remain",
            dropped,
            records.len(),
            kept.len()
        );
    }

    // ── Pass 3: normalize and encode ─────────────────────────────────────────
    let vocab = LabelVocabulary::from_labels(kept.iter().map(|r| r.activity_type.as_str()));

    let mut samples = Vec::with_capacity(kept.len());
    let mut labels = Vec::with_capacity(kept.len());
    for record in &kept {
        samples.push(normalize(&record.coordinates));
        // encode cannot fail here: the vocabulary was built from these labels
        if let Some(class) = vocab.encode(&record.activity_type) {
            labels.push(class);
        }
    }

    (
        FeatureSet {
            samples,
            labels,
            seq_len,
            dropped,
        },
        vocab,
    )
}

/// Scale a sample into [0, 1] when any coordinate exceeds 1.0.
/// The divisor is the sample's own maximum, so relative motion
/// within the sequence is preserved.
fn normalize(coordinates: &[[f32; 2]]) -> CoordSeq {
    let max = coordinates
        .iter()
        .flat_map(|p| p.iter().copied())
        .fold(f32::MIN, f32::max);

    if max > 1.0 {
        coordinates.iter().map(|p| [p[0] / max, p[1] / max]).collect()
    } else {
        coordinates.to_vec()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, coords: Vec<[f32; 2]>, declared: usize) -> SequenceRecord {
        SequenceRecord {
            coordinates:     coords,
            activity_type:   label.to_string(),
            camera_fps:      30.0,
            sequence_length: declared,
            timestamp:       "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_mismatched_record_is_excluded() {
        let records = vec![
            record("walking", vec![[0.1, 0.2]; 10], 10),
            // declares 10 steps but only has 9 — must be dropped
            record("walking", vec![[0.1, 0.2]; 9], 10),
        ];
        let (set, _) = build_feature_set(&records);
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn test_matching_record_is_included_unchanged() {
        // All coordinates within [0, 1] → no normalization applied
        let coords = vec![[0.25, 0.75]; 5];
        let records = vec![record("standing", coords.clone(), 5)];
        let (set, _) = build_feature_set(&records);
        assert_eq!(set.samples[0], coords);
        assert_eq!(set.dropped, 0);
    }

    #[test]
    fn test_out_of_range_sample_is_normalized() {
        let records = vec![record("walking", vec![[2.0, 4.0], [1.0, 3.0]], 2)];
        let (set, _) = build_feature_set(&records);
        // Divided by the sample max (4.0)
        assert_eq!(set.samples[0], vec![[0.5, 1.0], [0.25, 0.75]]);
    }

    #[test]
    fn test_ragged_lengths_are_dropped() {
        let records = vec![
            record("walking", vec![[0.1, 0.2]; 10], 10),
            // consistent with its own declaration, but not rectangular
            record("walking", vec![[0.1, 0.2]; 8], 8),
        ];
        let (set, _) = build_feature_set(&records);
        assert_eq!(set.len(), 1);
        assert_eq!(set.seq_len, 10);
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn test_vocabulary_from_kept_records_only() {
        let records = vec![
            record("walking", vec![[0.1, 0.2]; 4], 4),
            // "jumping" exists only in a corrupt record
            record("jumping", vec![[0.1, 0.2]; 3], 4),
        ];
        let (set, vocab) = build_feature_set(&records);
        assert_eq!(vocab.classes(), &["walking".to_string()]);
        assert_eq!(set.labels, vec![0]);
    }

    #[test]
    fn test_empty_input() {
        let (set, vocab) = build_feature_set(&[]);
        assert!(set.is_empty());
        assert!(vocab.is_empty());
    }
}
