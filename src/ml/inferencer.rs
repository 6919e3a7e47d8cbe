// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Rebuilds the generator from train_config.json, loads the
// latest generator checkpoint, and draws sample grids.
//
// Runs on a plain (non-autodiff) backend, so every BatchNorm
// uses its running statistics.
use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::domain::shape::ImageShape;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::generator::{Generator, GeneratorConfig};
use crate::ml::sampler::{generate_grid, SampleGrid};

pub struct Inferencer<B: Backend> {
    generator:  Generator<B>,
    shape:      ImageShape,
    latent_dim: usize,
    device:     B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg   = ckpt_manager.load_config()?;
        let shape = cfg.image_shape()?;

        let model: Generator<B> = GeneratorConfig::from_shape(shape, cfg.latent_dim).init(&device);
        let generator = ckpt_manager.load_generator(model, &device)?;
        tracing::info!("Generator loaded from checkpoint ({} images)", shape);

        Ok(Self { generator, shape, latent_dim: cfg.latent_dim, device })
    }

    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    /// rows × cols freshly generated images
    pub fn sample_grid(&self, rows: usize, cols: usize) -> Result<SampleGrid> {
        ensure!(rows > 0 && cols > 0, "grid must have at least one row and one column");
        generate_grid(&self.generator, self.shape, rows, cols, self.latent_dim, &self.device)
    }
}
