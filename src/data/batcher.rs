// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Converts a RawBatch into tensors the model can consume.
//
// How batching works here:
//   Input:  N samples, each seq_len rows of (x, y)
//   Output: sequences [N, seq_len, 2] and labels [N]
//
//   All (x, y) values are flattened into one long Vec in
//   sample-major, step-major, channel-minor order, then
//   reshaped — the same flatten-then-reshape construction
//   used everywhere tensors are built in this crate.
//
// B is the Burn backend, generic so the same batcher works on
// the autodiff training backend and the plain validation one.

use burn::prelude::*;

use crate::data::generator::RawBatch;

/// A batch ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// Coordinate sequences — shape: [batch_size, seq_len, 2]
    pub sequences: Tensor<B, 3>,

    /// Class index per sample — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land where the model lives.
#[derive(Clone, Debug)]
pub struct SequenceBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SequenceBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack a raw batch into tensors.
    ///
    /// # Panics
    /// Panics on an empty batch; the generator never yields one.
    pub fn batch(&self, raw: &RawBatch) -> SequenceBatch<B> {
        let batch_size = raw.sequences.len();
        assert!(batch_size > 0, "cannot batch zero samples");
        let seq_len = raw.sequences[0].len();

        // Flatten [[x, y]; seq_len] per sample into one contiguous Vec
        let flat: Vec<f32> = raw
            .sequences
            .iter()
            .flat_map(|s| s.iter().flat_map(|p| p.iter().copied()))
            .collect();

        let labels_flat: Vec<i32> = raw.labels.iter().map(|&l| l as i32).collect();

        let sequences = Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len, 2]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels_flat.as_slice(), &self.device);

        SequenceBatch { sequences, labels }
    }
}
