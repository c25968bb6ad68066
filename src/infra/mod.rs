// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs  — Saving and loading model weights with
//                    Burn's CompactRecorder, plus the training
//                    config JSON so a later process can rebuild
//                    the exact architecture.
//
//   label_store.rs — Persists the label vocabulary next to the
//                    checkpoints. Training and export must agree
//                    on the class ordering, and so must the
//                    mobile app consuming the model.
//
//   metrics.rs     — Epoch-level metrics appended to a CSV file
//                    for later analysis and plotting.
//
//   export.rs      — Produces the mobile artifacts: half-precision
//                    model binary, class-name list, metadata.
//
// Reference: Rust Book §9 (Error Handling)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Label vocabulary persistence
pub mod label_store;

/// Training metrics CSV logger
pub mod metrics;

/// Mobile export: quantized model + label/metadata side files
pub mod export;
