// ============================================================
// Layer 3 — ImageSet Domain Type
// ============================================================
// The training images held in memory.
//
// Layout: one flat Vec<f32>, image after image, each image in
// channel-first order (C, H, W). Values are raw intensities in
// [0, 255]; rescaling to the generator's [-1, 1] range happens
// in the data layer.

use anyhow::{ensure, Result};

use crate::domain::shape::ImageShape;

#[derive(Debug, Clone)]
pub struct ImageSet {
    shape:  ImageShape,
    pixels: Vec<f32>,
}

impl ImageSet {
    /// Wrap a flat pixel buffer.
    /// The buffer must hold a whole number of images of `shape`.
    pub fn new(shape: ImageShape, pixels: Vec<f32>) -> Result<Self> {
        ensure!(
            pixels.len() % shape.pixels() == 0,
            "pixel buffer of length {} is not a whole number of {} images",
            pixels.len(),
            shape
        );
        Ok(Self { shape, pixels })
    }

    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    /// Number of images in the set
    pub fn len(&self) -> usize {
        self.pixels.len() / self.shape.pixels()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels of the i-th image (C, H, W order).
    /// Panics if `index >= len()`, like slice indexing.
    pub fn image(&self, index: usize) -> &[f32] {
        let size = self.shape.pixels();
        &self.pixels[index * size..(index + 1) * size]
    }

    /// Apply `f` to every pixel, returning a new set with the same shape
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            shape:  self.shape,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_indexing() {
        let shape = ImageShape::new(2, 2, 1).unwrap();
        let set   = ImageSet::new(shape, (0..12).map(|v| v as f32).collect()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.image(1), &[4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_partial_image_rejected() {
        let shape = ImageShape::new(2, 2, 1).unwrap();
        assert!(ImageSet::new(shape, vec![0.0; 6]).is_err());
    }

    #[test]
    fn test_empty_set() {
        let shape = ImageShape::new(2, 2, 1).unwrap();
        let set   = ImageSet::new(shape, Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
