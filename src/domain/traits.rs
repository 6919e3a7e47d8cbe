// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The training use case programs against these abstractions
// rather than concrete loaders or compute backends.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::image_set::ImageSet;

// ─── ImageSource ──────────────────────────────────────────────────────────────
/// Any component that can provide the real training images.
///
/// Implementations:
///   - MnistSource → handwritten digits via Burn's vision datasets
pub trait ImageSource {
    /// Load every available image, as raw [0, 255] intensities
    fn load_all(&self) -> Result<ImageSet>;
}

// ─── BackendKind ──────────────────────────────────────────────────────────────
/// Which Burn backend runs the tensor math.
///
/// Saved in train_config.json so `sample` picks the same
/// backend that produced the checkpoint by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// GPU through wgpu (Vulkan / Metal / DX12)
    #[default]
    Wgpu,
    /// CPU through ndarray
    NdArray,
}
