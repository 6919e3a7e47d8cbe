// ============================================================
// Layer 4 — MNIST Image Source
// ============================================================
// Provides the handwritten-digit training split through Burn's
// vision datasets. Burn downloads the archive on first use and
// caches it locally, the way other frameworks ship MNIST.
//
// Each 28×28 grayscale digit is centred on the configured image
// shape (32×32 by default), with the gray channel copied into
// every output channel. Labels are discarded — the GAN is
// unconditional.
//
// Reference: Burn Book §4 (Datasets)

use anyhow::{Context, Result};
use burn::data::dataset::{vision::MnistDataset, Dataset};

use crate::data::preprocessor::pad_center;
use crate::domain::{image_set::ImageSet, shape::ImageShape, traits::ImageSource};

/// Side length of an MNIST digit
pub const MNIST_SIDE: usize = 28;

pub struct MnistSource {
    /// Shape each digit is placed into
    target: ImageShape,

    /// Optional cap on how many digits to load (None = all 60,000)
    limit: Option<usize>,
}

impl MnistSource {
    pub fn new(target: ImageShape, limit: Option<usize>) -> Self {
        Self { target, limit }
    }
}

impl ImageSource for MnistSource {
    fn load_all(&self) -> Result<ImageSet> {
        let dataset = MnistDataset::train();
        let count   = self.limit.map_or(dataset.len(), |n| n.min(dataset.len()));
        tracing::info!("Loading {} MNIST digits into {} images", count, self.target);

        let mut pixels = Vec::with_capacity(count * self.target.pixels());
        for index in 0..count {
            let item = dataset
                .get(index)
                .with_context(|| format!("MNIST item {index} missing"))?;

            // [[f32; 28]; 28] → flat row-major buffer
            let flat: Vec<f32> = item.image.iter().flatten().copied().collect();
            pixels.extend(pad_center(&flat, MNIST_SIDE, MNIST_SIDE, self.target)?);
        }

        ImageSet::new(self.target, pixels)
    }
}
