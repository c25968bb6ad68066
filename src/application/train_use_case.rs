// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load JSON sequence files   (Layer 4 - data)
//   Step 2: Validate + encode features (Layer 4 - data)
//   Step 3: Split train/validation     (Layer 4 - data)
//   Step 4: Offline augmentation       (Layer 4 - data)
//   Step 5: Save config + labels       (Layer 6 - infra)
//   Step 6: Run training loop          (Layer 5 - ml)
//   Step 7: Export for mobile          (Layer 6 - infra)
//
// Export failure is deliberately non-fatal: by the time export
// runs, the checkpoints are already on disk, so a broken export
// should not look like a failed training run.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    augment::apply_augmentation,
    feature::{build_feature_set, FeatureSet},
    loader::JsonSequenceLoader,
    splitter::split_train_val,
};
use crate::domain::traits::SequenceSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    label_store::LabelStore,
    metrics::MetricsLogger,
};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for export.
// The #[derive(Serialize, Deserialize)] macros from serde handle
// reading/writing this struct to JSON automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:           String,
    pub checkpoint_dir:      String,
    pub export_dir:          String,
    pub batch_size:          usize,
    pub epochs:              usize,
    pub lr:                  f64,
    pub augmentation_factor: f64,
    pub train_fraction:      f64,
    pub dropout:             f64,
    pub seed:                u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:           "data/sequences.json".to_string(),
            checkpoint_dir:      "checkpoints".to_string(),
            export_dir:          "export".to_string(),
            batch_size:          32,
            epochs:              50,
            lr:                  1e-3,
            augmentation_factor: 3.0,
            train_fraction:      0.8,
            dropout:             0.5,
            seed:                42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        // ── Step 1: Load raw sequence records ─────────────────────────────────
        tracing::info!("Loading sequences from '{}'", cfg.data_path);
        let loader  = JsonSequenceLoader::new(&cfg.data_path);
        let records = loader.load_all()?;
        tracing::info!("Loaded {} records", records.len());

        // ── Step 2: Validate, normalise and label-encode ──────────────────────
        // Inconsistent or ragged records are dropped here, not fixed.
        let (features, vocab) = build_feature_set(&records);
        if features.dropped > 0 {
            tracing::warn!(
                "Dropped {} of {} records during validation",
                features.dropped,
                records.len()
            );
        }
        if features.is_empty() {
            bail!("No usable sequences in '{}'", cfg.data_path);
        }
        if vocab.len() < 2 {
            bail!(
                "Need at least 2 activity classes to train, found {}",
                vocab.len()
            );
        }
        tracing::info!(
            "Feature set: {} sequences x {} steps, {} classes",
            features.len(),
            features.seq_len,
            vocab.len()
        );

        // ── Step 3: Train / validation split ──────────────────────────────────
        // Pair each sequence with its label so the shuffle keeps them aligned
        let pairs: Vec<_> = features
            .samples
            .iter()
            .cloned()
            .zip(features.labels.iter().copied())
            .collect();
        let (train_pairs, val_pairs) = split_train_val(pairs, cfg.train_fraction, &mut rng);
        tracing::info!(
            "Split: {} train, {} validation",
            train_pairs.len(),
            val_pairs.len()
        );
        if train_pairs.is_empty() || val_pairs.is_empty() {
            bail!("Dataset too small to split into train and validation sets");
        }

        let (train_samples, train_labels): (Vec<_>, Vec<_>) = train_pairs.into_iter().unzip();
        let (val_samples, val_labels): (Vec<_>, Vec<_>) = val_pairs.into_iter().unzip();

        // ── Step 4: Offline augmentation of the training portion ──────────────
        // Validation data stays untouched so the metrics mean something.
        let (train_samples, train_labels) = apply_augmentation(
            &train_samples,
            &train_labels,
            cfg.augmentation_factor,
            &mut rng,
        );
        tracing::info!("Training set after augmentation: {} sequences", train_samples.len());

        let train_set = FeatureSet {
            samples: train_samples,
            labels:  train_labels,
            seq_len: features.seq_len,
            dropped: 0,
        };
        let val_set = FeatureSet {
            samples: val_samples,
            labels:  val_labels,
            seq_len: features.seq_len,
            dropped: 0,
        };

        // ── Step 5: Persist config and label vocabulary ───────────────────────
        // Export and any later inference need both to rebuild the model.
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;
        LabelStore::new(&cfg.checkpoint_dir).save(&vocab)?;

        // ── Step 6: Run training loop (Layer 5) ───────────────────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        run_training(cfg, &train_set, &val_set, vocab.len(), &ckpt_manager, &metrics)?;

        // ── Step 7: Export for mobile ─────────────────────────────────────────
        // Non-fatal: checkpoints are already saved, and export can be
        // re-run on its own with the `export` subcommand.
        let export = super::export_use_case::ExportUseCase::new(
            cfg.checkpoint_dir.clone(),
            cfg.export_dir.clone(),
        );
        if let Err(e) = export.execute() {
            tracing::error!("Mobile export failed (checkpoints are intact): {e:#}");
        }

        Ok(())
    }
}
