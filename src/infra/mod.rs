// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the concerns that touch the filesystem:
//
//   checkpoint.rs  — Saving and loading model weights
//                    Uses Burn's CompactRecorder for both
//                    networks, and keeps TrainConfig as JSON
//                    so `sample` can rebuild the generator.
//
//   metrics.rs     — Training metrics logging
//                    Appends one CSV row per step
//                    (D loss, D accuracy, G loss).
//
//   image_grid.rs  — Sample grid output
//                    Tiles generated images into one PNG.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// PNG writer for sample grids
pub mod image_grid;
