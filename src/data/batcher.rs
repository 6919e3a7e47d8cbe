// ============================================================
// Layer 4 — Real Batch Sampler
// ============================================================
// Turns the in-memory ImageSet into tensor batches for the
// discriminator's "real" update.
//
// Unlike an epoch-based DataLoader, every training step draws
// `batch_size` indices uniformly at random WITH replacement, so
// the same image may appear twice in a batch and a step never
// needs the set to be a multiple of the batch size.
//
// How batching works here:
//   Input:  N random indices into an ImageSet of shape (C, H, W)
//   Output: Tensor of shape [N, C, H, W]
//
//   The chosen images are already channel-first and contiguous,
//   so we concatenate their slices and hand the flat buffer to
//   TensorData with the 4-D shape.

use anyhow::{ensure, Result};
use burn::{prelude::*, tensor::TensorData};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::data::preprocessor::rescale;
use crate::domain::image_set::ImageSet;

pub struct RealBatchSampler {
    /// Training images, already rescaled to [-1, 1]
    images: ImageSet,

    /// Source of batch indices
    rng: StdRng,
}

impl RealBatchSampler {
    /// Rescale raw [0, 255] images and prepare to sample from them.
    /// With `seed = None` the index stream comes from OS entropy.
    pub fn new(raw: &ImageSet, seed: Option<u64>) -> Result<Self> {
        ensure!(!raw.is_empty(), "cannot sample batches from an empty image set");
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        Ok(Self { images: raw.map(rescale), rng })
    }

    /// Number of images available to sample from
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Draw `batch_size` random indices in [0, len)
    pub fn sample_indices(&mut self, batch_size: usize) -> Vec<usize> {
        let len = self.images.len();
        (0..batch_size).map(|_| self.rng.gen_range(0..len)).collect()
    }

    /// Draw a random batch and upload it to `device` as [N, C, H, W]
    pub fn sample<B: Backend>(&mut self, batch_size: usize, device: &B::Device) -> Tensor<B, 4> {
        let indices = self.sample_indices(batch_size);
        self.batch(&indices, device)
    }

    /// Stack the given images into one tensor
    pub fn batch<B: Backend>(&self, indices: &[usize], device: &B::Device) -> Tensor<B, 4> {
        let shape = self.images.shape();
        let flat: Vec<f32> = indices
            .iter()
            .flat_map(|&i| self.images.image(i).iter().copied())
            .collect();

        Tensor::<B, 4>::from_data(
            TensorData::new(flat, shape.dims_nchw(indices.len())),
            device,
        )
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shape::ImageShape;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny_set(count: usize) -> ImageSet {
        let shape = ImageShape::new(2, 2, 1).unwrap();
        let pixels = (0..count).flat_map(|i| vec![(i * 50) as f32; 4]).collect();
        ImageSet::new(shape, pixels).unwrap()
    }

    #[test]
    fn test_indices_stay_in_range() {
        let mut sampler = RealBatchSampler::new(&tiny_set(3), Some(7)).unwrap();
        let indices     = sampler.sample_indices(100);
        assert_eq!(indices.len(), 100);
        assert!(indices.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_batch_larger_than_dataset() {
        // Sampling with replacement allows more draws than images
        let mut sampler = RealBatchSampler::new(&tiny_set(2), Some(1)).unwrap();
        let device      = Default::default();
        let batch       = sampler.sample::<TestBackend>(5, &device);
        assert_eq!(batch.dims(), [5, 1, 2, 2]);
    }

    #[test]
    fn test_batch_is_rescaled() {
        let shape   = ImageShape::new(1, 1, 1).unwrap();
        let raw     = ImageSet::new(shape, vec![0.0, 255.0]).unwrap();
        let sampler = RealBatchSampler::new(&raw, Some(0)).unwrap();
        let device  = Default::default();

        let values: Vec<f32> = sampler
            .batch::<TestBackend>(&[1, 0], &device)
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        assert_eq!(values, vec![1.0, -1.0]);
    }

    #[test]
    fn test_same_seed_same_indices() {
        let mut a = RealBatchSampler::new(&tiny_set(10), Some(42)).unwrap();
        let mut b = RealBatchSampler::new(&tiny_set(10), Some(42)).unwrap();
        assert_eq!(a.sample_indices(16), b.sample_indices(16));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(RealBatchSampler::new(&tiny_set(0), None).is_err());
    }
}
