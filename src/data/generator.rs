// ============================================================
// Layer 4 — Online Batch Generator
// ============================================================
// An infinite, restartable batch producer. One "pass" works like
// this:
//
//   1. Reshuffle the full index set
//   2. Yield successive batch_size slices of it
//   3. When the indices run out, go back to 1
//
// The generator never terminates on its own — the caller decides
// how many batches make an epoch (`gen.by_ref().take(n)` style).
// The last slice of a pass may be shorter than batch_size.
//
// Online augmentation (training only): for every yielded batch,
// with probability 0.5, each sample in the batch independently
// receives one of {jitter, scale, warp, no-op} chosen uniformly,
// applied at generation time. Validation generators are built with
// `augment = false` and always serve samples untouched.
//
// This is a cooperative, pull-based, single-consumer construct:
// it suspends between batches and resumes on the next pull.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::data::augment::{jitter, magnitude_scale, time_warp};
use crate::data::feature::CoordSeq;

/// One batch of raw samples, not yet turned into tensors.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub sequences: Vec<CoordSeq>,
    pub labels: Vec<usize>,
}

impl RawBatch {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// Infinite reshuffling batch producer over a borrowed feature set.
pub struct BatchGenerator<'a> {
    samples: &'a [CoordSeq],
    labels: &'a [usize],
    batch_size: usize,
    augment: bool,
    indices: Vec<usize>,
    cursor: usize,
    rng: StdRng,
}

impl<'a> BatchGenerator<'a> {
    /// Build a generator over `samples`/`labels`.
    ///
    /// # Panics
    /// Panics on an empty sample set or a zero batch size — both
    /// would make `next_batch` meaningless.
    pub fn new(
        samples: &'a [CoordSeq],
        labels: &'a [usize],
        batch_size: usize,
        augment: bool,
        seed: u64,
    ) -> Self {
        assert!(!samples.is_empty(), "generator needs at least one sample");
        assert!(batch_size > 0, "batch_size must be positive");
        assert_eq!(samples.len(), labels.len());

        let n = samples.len();
        Self {
            samples,
            labels,
            batch_size,
            augment,
            indices: (0..n).collect(),
            // Start past the end so the first pull triggers a shuffle
            cursor: n,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of whole batches one full pass over the data yields
    pub fn batches_per_pass(&self) -> usize {
        (self.samples.len() / self.batch_size).max(1)
    }

    /// Produce the next batch, reshuffling when a pass completes.
    pub fn next_batch(&mut self) -> RawBatch {
        if self.cursor >= self.indices.len() {
            // Restart semantics: a fresh shuffle at each full pass
            self.indices.shuffle(&mut self.rng);
            self.cursor = 0;
        }

        let end = (self.cursor + self.batch_size).min(self.indices.len());
        let slice = &self.indices[self.cursor..end];
        self.cursor = end;

        let mut sequences: Vec<CoordSeq> =
            slice.iter().map(|&i| self.samples[i].clone()).collect();
        let labels: Vec<usize> = slice.iter().map(|&i| self.labels[i]).collect();

        // Batch-level coin toss, then an independent per-sample choice
        if self.augment && self.rng.gen_bool(0.5) {
            for sample in &mut sequences {
                let replacement = match self.rng.gen_range(0..4u8) {
                    0 => Some(jitter(sample, &mut self.rng)),
                    1 => Some(magnitude_scale(sample, &mut self.rng)),
                    2 => Some(time_warp(sample, &mut self.rng)),
                    // no-op: serve the sample as-is
                    _ => None,
                };
                if let Some(augmented) = replacement {
                    *sample = augmented;
                }
            }
        }

        RawBatch { sequences, labels }
    }
}

impl Iterator for BatchGenerator<'_> {
    type Item = RawBatch;

    /// Never returns None — the caller bounds consumption with `take`.
    fn next(&mut self) -> Option<RawBatch> {
        Some(self.next_batch())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data(n: usize, seq_len: usize) -> (Vec<CoordSeq>, Vec<usize>) {
        let samples = (0..n)
            .map(|i| vec![[i as f32, i as f32]; seq_len])
            .collect();
        let labels = (0..n).map(|i| i % 2).collect();
        (samples, labels)
    }

    #[test]
    fn test_one_pass_covers_every_sample_once() {
        let (samples, labels) = toy_data(10, 20);
        let mut gen = BatchGenerator::new(&samples, &labels, 3, false, 0);

        // 3 + 3 + 3 + 1 = one full pass of 10
        let mut seen = Vec::new();
        for _ in 0..4 {
            let batch = gen.next_batch();
            for s in &batch.sequences {
                seen.push(s[0][0] as usize);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_generator_is_infinite_and_restarts() {
        let (samples, labels) = toy_data(4, 10);
        let gen = BatchGenerator::new(&samples, &labels, 2, false, 1);

        // 10 pulls = 5 full passes; the iterator never ends
        let batches: Vec<RawBatch> = gen.take(10).collect();
        assert_eq!(batches.len(), 10);
        for b in &batches {
            assert_eq!(b.len(), 2);
        }
    }

    #[test]
    fn test_validation_batches_are_untouched() {
        let (samples, labels) = toy_data(6, 15);
        let mut gen = BatchGenerator::new(&samples, &labels, 6, false, 2);

        let batch = gen.next_batch();
        for s in &batch.sequences {
            let id = s[0][0] as usize;
            assert_eq!(*s, samples[id]);
        }
    }

    #[test]
    fn test_labels_follow_their_samples() {
        let (samples, labels) = toy_data(8, 10);
        let mut gen = BatchGenerator::new(&samples, &labels, 8, false, 3);

        let batch = gen.next_batch();
        for (s, &l) in batch.sequences.iter().zip(&batch.labels) {
            let id = s[0][0] as usize;
            assert_eq!(l, labels[id]);
        }
    }

    #[test]
    fn test_augmented_batches_keep_shape() {
        let (samples, labels) = toy_data(5, 40);
        let mut gen = BatchGenerator::new(&samples, &labels, 5, true, 4);

        // Augmented or not, every sample keeps its length
        for _ in 0..20 {
            let batch = gen.next_batch();
            for s in &batch.sequences {
                assert_eq!(s.len(), 40);
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let (samples, labels) = toy_data(7, 25);
        let mut a = BatchGenerator::new(&samples, &labels, 3, true, 42);
        let mut b = BatchGenerator::new(&samples, &labels, 3, true, 42);

        for _ in 0..12 {
            let ba = a.next_batch();
            let bb = b.next_batch();
            assert_eq!(ba.sequences, bb.sequences);
            assert_eq!(ba.labels, bb.labels);
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_data_panics() {
        let samples: Vec<CoordSeq> = Vec::new();
        let labels: Vec<usize> = Vec::new();
        let _ = BatchGenerator::new(&samples, &labels, 4, false, 0);
    }
}
