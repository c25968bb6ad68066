// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw capture JSON file all the way to the
// tensor batches the training loop consumes.
//
// The pipeline flows in this order:
//
//   face_tracking_data.json
//       │
//       ▼
//   JsonSequenceLoader  → reads all records as recorded
//       │
//       ▼
//   feature builder     → drops inconsistent records, normalizes,
//       │                 encodes labels
//       ▼
//   split_train_val     → shuffles and splits train / validation
//       │
//       ▼
//   apply_augmentation  → offline expansion of the training set
//       │
//       ▼
//   BatchGenerator      → infinite reshuffling batch producer
//       │                 (online augmentation, training only)
//       ▼
//   SequenceBatcher     → stacks raw batches into Burn tensors
//
// Each module is responsible for exactly one step, so each step
// is independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads the capture app's JSON record file
pub mod loader;

/// Validates records and builds the in-memory feature set
pub mod feature;

/// The four offline augmentation techniques
pub mod augment;

/// Infinite restartable batch producer with online augmentation
pub mod generator;

/// Shuffles and splits data into train/validation sets
pub mod splitter;

/// Stacks raw sample batches into Burn tensors
pub mod batcher;
