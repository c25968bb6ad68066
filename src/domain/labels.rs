// ============================================================
// Layer 3 — Label Vocabulary
// ============================================================
// A bijective mapping between activity-label strings and class
// indices. The ordering is the sorted list of distinct labels,
// so the same input data always produces the same index for the
// same activity — this ordering is persisted and shipped to the
// mobile app alongside the exported model, and both sides must
// agree on it.
//
// Reference: Rust Book §8 (Collections)

use serde::{Deserialize, Serialize};

/// The ordered list of distinct activity labels seen in the data.
///
/// Index → label via `class_name`, label → index via `encode`.
/// Indices are dense and start at 0, matching the model's output head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVocabulary {
    classes: Vec<String>,
}

impl LabelVocabulary {
    /// Build the vocabulary from raw labels: sort, dedup.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Map a label string to its class index
    pub fn encode(&self, label: &str) -> Option<usize> {
        // classes is sorted, so binary search gives O(log n) lookup
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    /// Map a class index back to its label string
    pub fn class_name(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// One-hot vector for a class index: all zeros except the class position
    pub fn one_hot(&self, index: usize) -> Vec<f32> {
        let mut v = vec![0.0; self.classes.len()];
        if let Some(slot) = v.get_mut(index) {
            *slot = 1.0;
        }
        v
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_deduped() {
        let v = LabelVocabulary::from_labels(["walking", "standing", "walking"]);
        assert_eq!(v.classes(), &["standing".to_string(), "walking".to_string()]);
    }

    #[test]
    fn test_bijective_mapping() {
        let v = LabelVocabulary::from_labels(["walking", "standing", "sitting"]);
        for (i, name) in v.classes().iter().enumerate() {
            assert_eq!(v.encode(name), Some(i));
            assert_eq!(v.class_name(i), Some(name.as_str()));
        }
        assert_eq!(v.encode("running"), None);
    }

    #[test]
    fn test_one_hot() {
        let v = LabelVocabulary::from_labels(["a", "b", "c"]);
        assert_eq!(v.one_hot(1), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let v = LabelVocabulary::from_labels(["walking", "standing"]);
        let json = serde_json::to_string(&v).unwrap();
        let back: LabelVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
