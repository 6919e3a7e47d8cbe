// ============================================================
// Layer 2 — Sample Use Case
// ============================================================
// Loads the latest generator checkpoint and writes one grid
// of freshly generated images to a PNG file.
//
//   Step 1: Read train_config.json       (Layer 6 - infra)
//   Step 2: Pick the inference backend   (Layer 3 - domain)
//   Step 3: Load the generator           (Layer 5 - ml)
//   Step 4: Generate and save the grid   (Layer 5 + 6)

use anyhow::Result;
use burn::backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, NdArray, Wgpu};
use burn::prelude::Backend;
use std::path::{Path, PathBuf};

use crate::domain::traits::BackendKind;
use crate::infra::{checkpoint::CheckpointManager, image_grid::save_grid};
use crate::ml::inferencer::Inferencer;

pub struct SampleUseCase {
    checkpoint_dir: String,
    backend:        Option<BackendKind>,
}

impl SampleUseCase {
    /// `backend` overrides the one recorded at training time
    pub fn new(checkpoint_dir: String, backend: Option<BackendKind>) -> Self {
        Self { checkpoint_dir, backend }
    }

    /// Write a rows × cols grid to `output` and return its path
    pub fn execute(&self, output: &Path, rows: usize, cols: usize) -> Result<PathBuf> {
        let ckpt    = CheckpointManager::new(&self.checkpoint_dir)?;
        let backend = match self.backend {
            Some(kind) => kind,
            None       => ckpt.load_config()?.backend,
        };

        match backend {
            BackendKind::Wgpu    => sample_on::<Wgpu>(&ckpt, WgpuDevice::default(), output, rows, cols)?,
            BackendKind::NdArray => sample_on::<NdArray>(&ckpt, NdArrayDevice::default(), output, rows, cols)?,
        }

        tracing::info!("Wrote {}x{} sample grid to '{}'", rows, cols, output.display());
        Ok(output.to_path_buf())
    }
}

fn sample_on<B: Backend>(
    ckpt:   &CheckpointManager,
    device: B::Device,
    output: &Path,
    rows:   usize,
    cols:   usize,
) -> Result<()> {
    let inferencer = Inferencer::<B>::from_checkpoint(ckpt, device)?;
    tracing::debug!("Sampling {} images of {}", rows * cols, inferencer.shape());
    let grid       = inferencer.sample_grid(rows, cols)?;
    save_grid(&grid, output)
}
