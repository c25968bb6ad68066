// ============================================================
// Layer 6 — Label Store
// ============================================================
// Persists the label vocabulary alongside the checkpoints.
//
// Why persist the vocabulary?
//   Class indices only mean something relative to the vocabulary
//   that produced them. Export and any downstream consumer must
//   see the exact same index → name mapping that training used,
//   so the mapping is written once at the start of a run and
//   loaded back whenever weights are restored.
//
// Output file: checkpoints/labels.json
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::labels::LabelVocabulary;

pub struct LabelStore {
    dir: PathBuf,
}

impl LabelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the vocabulary as pretty JSON next to the checkpoints.
    pub fn save(&self, vocab: &LabelVocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();
        let path = self.dir.join("labels.json");
        let json = serde_json::to_string_pretty(vocab)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write label vocabulary to '{}'", path.display()))?;
        tracing::debug!("Saved {} class labels to '{}'", vocab.len(), path.display());
        Ok(())
    }

    /// Load a previously saved vocabulary.
    pub fn load(&self) -> Result<LabelVocabulary> {
        let path = self.dir.join("labels.json");
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read label vocabulary from '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
