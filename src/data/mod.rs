// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the MNIST archive all the
// way to device-ready tensor batches.
//
// The pipeline flows in this order:
//
//   MNIST training split (Burn vision dataset)
//       │
//       ▼
//   MnistSource        → 28×28 digits centred on the model shape
//       │
//       ▼
//   Preprocessor       → [0, 255] → [-1, 1]
//       │
//       ▼
//   RealBatchSampler   → random batches as [B, C, H, W] tensors
//
// Reference: Burn Book §4 (Datasets)

/// Loads MNIST digits through burn's vision datasets
pub mod mnist;

/// Pixel range conversions and centre padding
pub mod preprocessor;

/// Random real-image batches for the adversarial step
pub mod batcher;
