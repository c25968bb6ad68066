// ============================================================
// Layer 2 — Export Use Case
// ============================================================
// Rebuilds the trained model from the latest checkpoint and
// packages it for mobile:
//   1. Load the saved training config (architecture parameters)
//   2. Load the label vocabulary
//   3. Rebuild the model and restore the latest weights
//   4. Write half-precision weights + side files

use anyhow::Result;

use crate::infra::{
    checkpoint::CheckpointManager,
    export::ModelExporter,
    label_store::LabelStore,
};
use crate::ml::trainer::ValidBackend;

pub struct ExportUseCase {
    checkpoint_dir: String,
    export_dir:     String,
}

impl ExportUseCase {
    pub fn new(checkpoint_dir: String, export_dir: String) -> Self {
        Self { checkpoint_dir, export_dir }
    }

    pub fn execute(&self) -> Result<()> {
        let ckpt      = CheckpointManager::new(&self.checkpoint_dir);
        let model_cfg = ckpt.load_model_config()?;
        let vocab     = LabelStore::new(&self.checkpoint_dir).load()?;

        // The checkpoint only stores weights, so the architecture has
        // to be rebuilt from its saved config before loading them.
        let device = Default::default();
        let model  = model_cfg.init::<ValidBackend>(&device);
        let model  = ckpt.load_model(model, &device)?;

        let exporter = ModelExporter::new(&self.export_dir);
        exporter.export(&model, &vocab, model_cfg.seq_len)?;

        println!("Export complete. Files written to '{}'.", self.export_dir);
        Ok(())
    }
}
