// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types describing the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no tensor backend needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One recorded face-tracking sequence with its activity label
pub mod sequence;

// The ordered activity-label vocabulary and its encodings
pub mod labels;

// Core abstractions (traits) that other layers implement
pub mod traits;
