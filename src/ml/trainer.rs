// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop driven by the online batch
// generator instead of a framework DataLoader, because the
// generator owns the reshuffle-and-augment semantics.
//
// Backend split:
//   - Training uses Autodiff<NdArray> for gradients
//   - model.valid() returns the model on plain NdArray, which
//     also disables dropout for deterministic evaluation
//
// The CPU backend is deliberate: the model is a few hundred
// kilobytes and targets a phone, so a GPU device buys nothing
// here and the whole loop stays runnable in CI.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SequenceBatcher, feature::FeatureSet, generator::BatchGenerator};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{ActivityCnn, ActivityCnnConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray<f32>>;
pub type ValidBackend = burn::backend::NdArray<f32>;

pub fn run_training(
    cfg:         &TrainConfig,
    train_set:   &FeatureSet,
    val_set:     &FeatureSet,
    num_classes: usize,
    ckpt:        &CheckpointManager,
    metrics:     &MetricsLogger,
) -> Result<()> {
    let device = Default::default();

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = ActivityCnnConfig::new(train_set.seq_len, num_classes)
        .with_dropout(cfg.dropout);
    // Three conv/pool blocks consume ~21 steps; shorter data is a user
    // error, not a panic
    if model_cfg.flattened_steps().is_none() {
        bail!(
            "Sequences of {} steps are too short for the 3-block CNN; need at least {}",
            train_set.seq_len,
            model_cfg.min_seq_len()
        );
    }
    let mut model: ActivityCnn<TrainBackend> = model_cfg.init(&device);
    // Export rebuilds the architecture from this file
    ckpt.save_model_config(&model_cfg)?;
    tracing::info!(
        "Model ready: {} steps x 2 channels -> {} classes",
        train_set.seq_len,
        num_classes
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Batch generators ──────────────────────────────────────────────────────
    // Training batches get online augmentation; validation batches never do.
    // Derived seeds keep the two streams independent of the offline-
    // augmentation RNG and of each other.
    let mut train_gen = BatchGenerator::new(
        &train_set.samples,
        &train_set.labels,
        cfg.batch_size,
        true,
        cfg.seed.wrapping_add(1),
    );
    let mut val_gen = BatchGenerator::new(
        &val_set.samples,
        &val_set.labels,
        cfg.batch_size,
        false,
        cfg.seed.wrapping_add(2),
    );

    let steps_per_epoch = train_gen.batches_per_pass();
    let val_steps       = val_gen.batches_per_pass();

    let train_batcher = SequenceBatcher::<TrainBackend>::new(device);
    let val_batcher   = SequenceBatcher::<ValidBackend>::new(Default::default());

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut best_val_loss = f64::INFINITY;

    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;

        for _ in 0..steps_per_epoch {
            let batch = train_batcher.batch(&train_gen.next_batch());
            let (loss, _) = model.forward_loss(batch.sequences, batch.labels);

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = train_loss_sum / steps_per_epoch as f64;

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → ActivityCnn<ValidBackend>, dropout disabled
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for _ in 0..val_steps {
            let batch = val_batcher.batch(&val_gen.next_batch());

            let logits = model_valid.forward(batch.sequences);
            let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&logits.device());
            let loss = ce.forward(logits.clone(), batch.labels.clone());
            val_loss_sum += loss.into_scalar().elem::<f64>();

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with the label tensor
            let predictions = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predictions
                .equal(batch.labels)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = val_loss_sum / val_steps as f64;
        let val_acc = if total_samples > 0 {
            correct as f64 / total_samples as f64
        } else {
            0.0
        };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        let epoch_metrics = EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc);
        if epoch_metrics.is_improvement(best_val_loss) {
            best_val_loss = epoch_metrics.val_loss;
            ckpt.mark_best(epoch)?;
            tracing::info!(
                "New best validation loss {:.4} at epoch {}",
                best_val_loss,
                epoch
            );
        }
        metrics.log(&epoch_metrics)?;
        ckpt.save_model(&model, epoch)?;
        tracing::debug!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete");
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::CoordSeq;

    #[test]
    fn test_short_sequences_are_an_error_not_a_panic() {
        let dir = std::env::temp_dir().join("face_activity_trainer_short_test");
        let _ = std::fs::remove_dir_all(&dir);
        let dir_str = dir.to_string_lossy().into_owned();

        // 20 steps pass every data-layer filter but cannot feed the
        // three conv/pool blocks — training must refuse cleanly
        let samples: Vec<CoordSeq> = (0..4).map(|_| vec![[0.5, 0.5]; 20]).collect();
        let set = FeatureSet {
            samples,
            labels:  vec![0, 1, 0, 1],
            seq_len: 20,
            dropped: 0,
        };

        let cfg = TrainConfig {
            checkpoint_dir: dir_str.clone(),
            batch_size:     2,
            epochs:         1,
            ..TrainConfig::default()
        };
        let ckpt    = CheckpointManager::new(&dir_str);
        let metrics = MetricsLogger::new(&dir_str).unwrap();

        let err = run_training(&cfg, &set, &set, 2, &ckpt, &metrics).unwrap_err();
        assert!(err.to_string().contains("too short"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
