// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code apart
// from the tensor batcher. No other layer builds models or
// computes gradients.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - The architecture is clearly separated from data loading
//     and application logic
//
// What's in this layer:
//
//   model.rs   — The 1D CNN classifier:
//                • three Conv1d + ReLU + MaxPool1d blocks
//                • flatten into a dense hidden layer
//                • dropout regularization
//                • dense classification head (one logit per class)
//
//   trainer.rs — The training loop:
//                batch generation, forward pass, cross-entropy
//                loss, Adam step, per-epoch validation, metrics
//                logging and checkpoint saving
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// The 1D convolutional activity classifier
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;
