// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved per training run:
//   1. Model weights (.mpk.gz per epoch) — all learned parameters
//   2. latest_epoch.json                 — which epoch was last saved
//   3. train_config.json                 — run + architecture config
//
// Why save the config separately?
//   When loading for export, we need the exact architecture
//   (seq_len, num_classes via the label store, dropout) to rebuild
//   the model before the weights can be loaded into it.
//
// File naming convention:
//   checkpoints/
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     model_epoch_2.mpk.gz   ← weights after epoch 2
//     ...
//     latest_epoch.json      ← number of the latest epoch
//     train_config.json      ← run configuration
//     labels.json            ← written by the label store
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{ActivityCnn, ActivityCnnConfig};

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Save model weights for a given epoch and update the latest-epoch
    /// pointer so export can find the newest weights.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &ActivityCnn<B>,
        epoch: usize,
    ) -> Result<()> {
        // Recorder adds the .mpk.gz extension itself
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        Ok(())
    }

    /// Load weights from the latest saved checkpoint into `model`.
    /// The model must have the architecture the checkpoint was
    /// written with or loading fails.
    pub fn load_model<B: Backend>(
        &self,
        model:  ActivityCnn<B>,
        device: &B::Device,
    ) -> Result<ActivityCnn<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Persist the run configuration; must happen before training
    /// starts so export can rebuild the exact model.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. Make sure you have run 'train' before 'export'.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Record which epoch currently has the best validation loss.
    /// The per-epoch weight files keep accumulating; this pointer
    /// marks the one worth shipping.
    pub fn mark_best(&self, epoch: usize) -> Result<()> {
        let path = self.dir.join("best_epoch.json");
        fs::write(&path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write best_epoch.json")?;
        Ok(())
    }

    /// Persist the model architecture. Unlike TrainConfig this
    /// includes seq_len, which is only known once the data is loaded.
    pub fn save_model_config(&self, cfg: &ActivityCnnConfig) -> Result<()> {
        let path = self.dir.join("model_config.json");
        cfg.save(&path)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_model_config(&self) -> Result<ActivityCnnConfig> {
        let path = self.dir.join("model_config.json");
        ActivityCnnConfig::load(&path).map_err(|e| {
            anyhow::anyhow!(
                "Cannot load model config from '{}': {}. Have you run 'train' first?",
                path.display(),
                e
            )
        })
    }

    /// Read latest_epoch.json and return the epoch number.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");
        let s = fs::read_to_string(&path)
            .with_context(|| "Cannot find 'latest_epoch.json'. Have you run 'train' first?")?;
        Ok(serde_json::from_str::<usize>(&s)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_epoch_pointer_tracks_updates() {
        let dir = std::env::temp_dir().join("face_activity_checkpoint_best_test");
        let _ = fs::remove_dir_all(&dir);

        let ckpt = CheckpointManager::new(&dir);
        ckpt.mark_best(1).unwrap();
        ckpt.mark_best(5).unwrap();

        let s = fs::read_to_string(dir.join("best_epoch.json")).unwrap();
        assert_eq!(serde_json::from_str::<usize>(&s).unwrap(), 5);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = std::env::temp_dir().join("face_activity_checkpoint_cfg_test");
        let _ = fs::remove_dir_all(&dir);

        let ckpt = CheckpointManager::new(&dir);
        let cfg  = TrainConfig { epochs: 7, ..TrainConfig::default() };
        ckpt.save_config(&cfg).unwrap();

        let loaded = ckpt.load_config().unwrap();
        assert_eq!(loaded.epochs, 7);
        assert_eq!(loaded.batch_size, cfg.batch_size);

        let _ = fs::remove_dir_all(&dir);
    }
}
