// ============================================================
// Layer 5 — Sample Generation
// ============================================================
// Produces the rows × cols grid of generated images that is
// written to disk every `sample_interval` steps and by the
// `sample` command.
//
// Fresh standard-normal noise is drawn for every grid, so each
// grid shows new digits. Output values are mapped from the
// generator's [-1, 1] range into [0, 1].

use anyhow::{anyhow, Result};
use burn::{prelude::*, tensor::Distribution};

use crate::data::preprocessor::to_unit;
use crate::domain::shape::ImageShape;
use crate::ml::generator::Generator;

/// Default grid used for periodic samples: 5 × 5 images
pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 5;

/// Generated images laid out for a grid, values in [0, 1].
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub shape:  ImageShape,
    pub rows:   usize,
    pub cols:   usize,
    /// rows·cols images, each channel-first (C, H, W)
    pub pixels: Vec<f32>,
}

impl SampleGrid {
    /// Pixels of the image at grid cell (row, col)
    pub fn cell(&self, row: usize, col: usize) -> &[f32] {
        let size  = self.shape.pixels();
        let index = row * self.cols + col;
        &self.pixels[index * size..(index + 1) * size]
    }
}

/// Run the generator on fresh noise and collect a rows × cols grid.
///
/// Pass an inference-mode generator (`model.valid()`) during
/// training so BatchNorm uses its running statistics.
pub fn generate_grid<B: Backend>(
    generator:  &Generator<B>,
    shape:      ImageShape,
    rows:       usize,
    cols:       usize,
    latent_dim: usize,
    device:     &B::Device,
) -> Result<SampleGrid> {
    let count = rows * cols;
    let noise = Tensor::<B, 2>::random([count, latent_dim], Distribution::Normal(0.0, 1.0), device);
    let images = generator.forward(noise);

    let pixels = images
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("cannot read generated images: {e:?}"))?
        .into_iter()
        .map(to_unit)
        .collect();

    Ok(SampleGrid { shape, rows, cols, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::generator::GeneratorConfig;
    use burn::backend::NdArray;

    #[test]
    fn test_grid_holds_rows_times_cols_images() {
        let device = Default::default();
        let shape  = ImageShape::new(4, 4, 1).unwrap();
        let model: Generator<NdArray> = GeneratorConfig::from_shape(shape, 8).init(&device);

        let grid = generate_grid(&model, shape, 2, 3, 8, &device).unwrap();
        assert_eq!(grid.pixels.len(), 6 * 16);
        assert_eq!(grid.cell(1, 2).len(), 16);
        assert!(grid.pixels.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
