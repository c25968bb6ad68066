// ============================================================
// Layer 3 — SequenceRecord Domain Type
// ============================================================
// Represents one observation unit captured by the mobile camera:
// an ordered run of (x, y) face positions plus its activity label
// and capture metadata.
//
// The serde field names are camelCase because that is how the
// capture app writes the JSON file:
//
//   {
//     "coordinates":    [[0.41, 0.52], [0.42, 0.53], ...],
//     "activityType":   "walking",
//     "cameraFps":      30.0,
//     "sequenceLength": 100,
//     "timestamp":      "2026-03-14T09:26:53Z"
//   }
//
// Reference: Rust Book §5 (Structs and Methods)
//            serde documentation (rename_all)

use serde::{Deserialize, Serialize};

/// One labelled face-tracking sequence as read from the capture file.
///
/// Invariant for training use: `coordinates.len() == sequence_length`.
/// Records that violate it are filtered out by the feature builder,
/// never fed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceRecord {
    /// Ordered (x, y) face positions, one pair per camera frame
    pub coordinates: Vec<[f32; 2]>,

    /// Activity label, e.g. "walking" or "standing"
    pub activity_type: String,

    /// Frames per second the camera recorded at
    pub camera_fps: f32,

    /// The length the capture app claims this sequence has
    pub sequence_length: usize,

    /// ISO-8601 capture timestamp, kept as text until display time
    pub timestamp: String,
}

impl SequenceRecord {
    /// True when the declared length matches the actual coordinate count.
    /// Only consistent records become training samples.
    pub fn is_consistent(&self) -> bool {
        self.coordinates.len() == self.sequence_length
    }

    /// Capture duration in seconds, derived from frame count and fps
    pub fn duration_secs(&self) -> f32 {
        if self.camera_fps <= 0.0 {
            return 0.0;
        }
        self.coordinates.len() as f32 / self.camera_fps
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn record(len: usize, declared: usize) -> SequenceRecord {
        SequenceRecord {
            coordinates:     vec![[0.5, 0.5]; len],
            activity_type:   "walking".to_string(),
            camera_fps:      30.0,
            sequence_length: declared,
            timestamp:       "2026-03-14T09:26:53Z".to_string(),
        }
    }

    #[test]
    fn test_consistency_check() {
        assert!(record(100, 100).is_consistent());
        assert!(!record(99, 100).is_consistent());
    }

    #[test]
    fn test_duration() {
        let r = record(60, 60);
        assert!((r.duration_secs() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_camelcase_deserialization() {
        let json = r#"{
            "coordinates": [[0.1, 0.2], [0.3, 0.4]],
            "activityType": "standing",
            "cameraFps": 24.0,
            "sequenceLength": 2,
            "timestamp": "2026-01-01T00:00:00Z"
        }"#;
        let r: SequenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.activity_type, "standing");
        assert_eq!(r.sequence_length, 2);
        assert!(r.is_consistent());
    }
}
