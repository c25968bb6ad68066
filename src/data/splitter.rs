// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Randomly shuffles samples and splits them into two sets:
//   - Training set:   used to update model weights
//   - Validation set: used to measure performance on unseen data
//
// Why shuffle before splitting?
//   Capture sessions are often ordered (all walking sequences
//   recorded before all standing ones). Without shuffling, the
//   validation set would contain only one activity.
//
// The RNG is passed in explicitly rather than taken from a
// process-global source, so a seeded run splits identically
// every time.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::seq::SliceRandom;
use rand::Rng;

/// Randomly shuffle `samples` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.8 = 80%
/// * `rng`            - Explicit random source for reproducibility
pub fn split_train_val<T>(
    mut samples: Vec<T>,
    train_fraction: f64,
    rng: &mut impl Rng,
) -> (Vec<T>, Vec<T>) {
    // Fisher-Yates shuffle — every permutation is equally likely
    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}
