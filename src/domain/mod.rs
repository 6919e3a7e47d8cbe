// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that name the core concepts
// of adversarial image training.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// What lives here:
//   shape.rs     — ImageShape (rows × cols × channels)
//   image_set.rs — ImageSet, the raw training images in memory
//   metrics.rs   — StepMetrics and TrainingHistory
//   traits.rs    — ImageSource and BackendKind
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Image dimensions shared by the generator output and discriminator input
pub mod shape;

/// Raw training images in channel-first layout
pub mod image_set;

/// Per-step losses/accuracy and the full training history
pub mod metrics;

/// Core abstractions (traits) that other layers implement
pub mod traits;
