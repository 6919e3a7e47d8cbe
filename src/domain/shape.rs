// ============================================================
// Layer 3 — ImageShape Domain Type
// ============================================================
// Describes a single image: height (rows), width (cols) and
// number of colour channels.
//
// The generator's dense layer projects onto a rows × cols grid
// with 128 feature maps, upsamples twice and downsamples twice,
// so its output always lands back on rows × cols. The same shape
// is the discriminator's input.
//
// Channel counts are limited to what a PNG sample grid can hold:
//   1 = grayscale, 2 = grayscale + alpha, 3 = RGB, 4 = RGBA

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Largest channel count the sample writer understands (RGBA)
pub const MAX_CHANNELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    /// Image height in pixels
    pub rows: usize,

    /// Image width in pixels
    pub cols: usize,

    /// Number of colour channels (1..=4)
    pub channels: usize,
}

impl ImageShape {
    /// Create a validated ImageShape.
    /// Every dimension must be non-zero and channels must fit a PNG.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        ensure!(rows > 0 && cols > 0, "image must be at least 1×1, got {rows}×{cols}");
        ensure!(
            (1..=MAX_CHANNELS).contains(&channels),
            "channels must be between 1 and {MAX_CHANNELS}, got {channels}"
        );
        Ok(Self { rows, cols, channels })
    }

    /// Number of scalar values in one image
    pub fn pixels(&self) -> usize {
        self.rows * self.cols * self.channels
    }

    /// Channel-first tensor dimensions for a batch of images
    pub fn dims_nchw(&self, batch: usize) -> [usize; 4] {
        [batch, self.channels, self.rows, self.cols]
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.cols, self.channels)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_shape() {
        let shape = ImageShape::new(32, 32, 1).unwrap();
        assert_eq!(shape.pixels(), 1024);
        assert_eq!(shape.dims_nchw(8), [8, 1, 32, 32]);
        assert_eq!(shape.to_string(), "32x32x1");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(ImageShape::new(0, 32, 1).is_err());
        assert!(ImageShape::new(32, 0, 1).is_err());
        assert!(ImageShape::new(32, 32, 0).is_err());
    }

    #[test]
    fn test_too_many_channels_rejected() {
        assert!(ImageShape::new(32, 32, 4).is_ok());
        assert!(ImageShape::new(32, 32, 5).is_err());
    }
}
