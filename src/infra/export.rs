// ============================================================
// Layer 6 — Mobile Exporter
// ============================================================
// Packages a trained model for on-device inference.
//
// What gets written to the export directory:
//   1. activity_cnn_fp16.bin        — weights in half precision,
//      roughly halving the file size versus the fp32 checkpoint
//   2. class_names.json             — index → activity name list
//   3. activity_cnn_metadata.json   — input/output shapes plus the
//      class list, so a mobile app can wire up the model without
//      reading the training code
//
// Half precision is enough here: the network is small and the
// coordinates it consumes are already normalised to [0, 1].
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{BinFileRecorder, HalfPrecisionSettings, Recorder},
};
use std::{fs, path::PathBuf};

use crate::domain::labels::LabelVocabulary;
use crate::ml::model::{ActivityCnn, IN_CHANNELS};

pub struct ModelExporter {
    dir: PathBuf,
}

impl ModelExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Write the quantized weights and both side files.
    pub fn export<B: Backend>(
        &self,
        model:   &ActivityCnn<B>,
        vocab:   &LabelVocabulary,
        seq_len: usize,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create export dir '{}'", self.dir.display()))?;

        // ── Step 1: Half-precision weights ────────────────────────────────────
        // Recorder adds the .bin extension itself
        let model_path = self.dir.join("activity_cnn_fp16");
        BinFileRecorder::<HalfPrecisionSettings>::new()
            .record(model.clone().into_record(), model_path.clone())
            .with_context(|| {
                format!("Failed to write fp16 weights to '{}'", model_path.display())
            })?;

        // ── Step 2: Class names side file ─────────────────────────────────────
        let names_path = self.dir.join("class_names.json");
        let names_json = serde_json::json!({ "class_names": vocab.classes() });
        fs::write(&names_path, serde_json::to_string_pretty(&names_json)?)
            .with_context(|| format!("Cannot write '{}'", names_path.display()))?;

        // ── Step 3: Model metadata ────────────────────────────────────────────
        let meta_path = self.dir.join("activity_cnn_metadata.json");
        let meta_json = serde_json::json!({
            "input_shape":  [seq_len, IN_CHANNELS],
            "output_shape": [vocab.len()],
            "class_names":  vocab.classes(),
        });
        fs::write(&meta_path, serde_json::to_string_pretty(&meta_json)?)
            .with_context(|| format!("Cannot write '{}'", meta_path.display()))?;

        tracing::info!(
            "Exported model with {} classes to '{}'",
            vocab.len(),
            self.dir.display()
        );

        Ok(())
    }
}
