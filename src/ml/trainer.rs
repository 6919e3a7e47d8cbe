// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Runs `epochs` adversarial steps. As in the classic Keras GAN
// examples, an "epoch" here is ONE batch step, not a full pass
// over the data set.
//
// Per step:
//   1. Draw a random real batch (with replacement)
//   2. Gan::train_step → discriminator ×2, generator ×1
//   3. Print the progress line, record history, append CSV row
//   4. step % sample_interval == 0      → write a 5×5 sample grid
//   5. step % checkpoint_interval == 0  → save both networks
//      (skipped at step 0 and when the interval is 0)
// After the last step the final weights are saved too, unless
// that step was just checkpointed.
//
// Backend notes:
//   - Training runs on Autodiff<Wgpu> or Autodiff<NdArray>
//   - Sampling uses generator.valid() (inner backend, BatchNorm
//     in inference mode), like a Keras predict() call
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{ensure, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    module::AutodiffModule,
    tensor::backend::AutodiffBackend,
};
use std::path::Path;

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::RealBatchSampler;
use crate::domain::{
    image_set::ImageSet,
    metrics::TrainingHistory,
    shape::ImageShape,
    traits::BackendKind,
};
use crate::infra::{checkpoint::CheckpointManager, image_grid::save_grid, metrics::MetricsLogger};
use crate::ml::adversarial::Gan;
use crate::ml::sampler::{generate_grid, GRID_COLS, GRID_ROWS};

type GpuBackend = Autodiff<Wgpu>;
type CpuBackend = Autodiff<NdArray>;

/// Pick the configured backend and run the training loop on it
pub fn run_training(
    cfg:     &TrainConfig,
    images:  &ImageSet,
    ckpt:    &CheckpointManager,
    metrics: &MetricsLogger,
) -> Result<TrainingHistory> {
    match cfg.backend {
        BackendKind::Wgpu => {
            let device = WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            train::<GpuBackend>(cfg, images, ckpt, metrics, device)
        }
        BackendKind::NdArray => {
            let device = NdArrayDevice::default();
            tracing::info!("Using NdArray device: {:?}", device);
            train::<CpuBackend>(cfg, images, ckpt, metrics, device)
        }
    }
}

/// The adversarial training loop, generic over any autodiff backend
pub fn train<B: AutodiffBackend>(
    cfg:     &TrainConfig,
    images:  &ImageSet,
    ckpt:    &CheckpointManager,
    metrics: &MetricsLogger,
    device:  B::Device,
) -> Result<TrainingHistory> {
    let shape = cfg.image_shape()?;
    ensure!(cfg.batch_size > 0, "batch_size must be at least 1");
    ensure!(cfg.sample_interval > 0, "sample_interval must be at least 1");
    ensure!(
        images.shape() == shape,
        "training images are {} but the model expects {}",
        images.shape(),
        shape
    );

    if let Some(seed) = cfg.seed {
        B::seed(&device, seed);
    }
    let mut sampler = RealBatchSampler::new(images, cfg.seed)?;

    // ── Build both networks and their optimisers ──────────────────────────────
    let mut gan: Gan<B> = cfg.gan_config()?.init(&device);
    tracing::info!(
        "Training on {} images of {} for {} steps, batch size {}",
        sampler.len(),
        shape,
        cfg.epochs,
        cfg.batch_size,
    );

    // ── Step loop ─────────────────────────────────────────────────────────────
    let sample_dir  = Path::new(&cfg.sample_dir);
    let mut history = TrainingHistory::with_capacity(cfg.epochs);

    for step in 0..cfg.epochs {
        let real    = sampler.sample::<B>(cfg.batch_size, &device);
        let metrics_row = gan.train_step(step, real);

        println!("{}", metrics_row.progress_line());
        history.push(&metrics_row);
        metrics.log(&metrics_row)?;

        if step % cfg.sample_interval == 0 {
            sample_images(&gan, shape, step, sample_dir, &device)?;
        }

        if is_interval_checkpoint(step, cfg.checkpoint_interval) {
            ckpt.save_models(gan.generator(), gan.discriminator(), step)?;
            tracing::info!("Checkpoint saved for step {}", step);
        }
    }

    if cfg.epochs == 0 {
        tracing::warn!("No training steps requested, nothing to checkpoint");
    } else if let Some(last) = final_checkpoint(cfg.epochs, cfg.checkpoint_interval) {
        ckpt.save_models(gan.generator(), gan.discriminator(), last)?;
        tracing::info!("Final checkpoint saved for step {}", last);
    }

    tracing::info!("Training complete!");
    Ok(history)
}

/// Periodic save: never at step 0, disabled by interval 0
fn is_interval_checkpoint(step: usize, interval: usize) -> bool {
    interval > 0 && step > 0 && step % interval == 0
}

/// Step of the closing save, or None when the loop already saved it
fn final_checkpoint(epochs: usize, interval: usize) -> Option<usize> {
    let last = epochs.checked_sub(1)?;
    (!is_interval_checkpoint(last, interval)).then_some(last)
}

/// Write a GRID_ROWS × GRID_COLS grid to `{sample_dir}/{step}.png`
fn sample_images<B: AutodiffBackend>(
    gan:        &Gan<B>,
    shape:      ImageShape,
    step:       usize,
    sample_dir: &Path,
    device:     &B::Device,
) -> Result<()> {
    let grid = generate_grid(
        &gan.generator().valid(),
        shape,
        GRID_ROWS,
        GRID_COLS,
        gan.latent_dim(),
        device,
    )?;
    save_grid(&grid, &sample_dir.join(format!("{step}.png")))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArrayDevice;

    fn tiny_config(root: &Path, epochs: usize) -> TrainConfig {
        TrainConfig {
            checkpoint_dir:      root.join("ckpt").display().to_string(),
            sample_dir:          root.join("images").display().to_string(),
            img_rows:            4,
            img_cols:            4,
            channels:            1,
            latent_dim:          8,
            epochs,
            batch_size:          4,
            sample_interval:     2,
            checkpoint_interval: 2,
            seed:                Some(3),
            backend:             BackendKind::NdArray,
            ..TrainConfig::default()
        }
    }

    fn tiny_images() -> ImageSet {
        let shape = ImageShape::new(4, 4, 1).unwrap();
        let pixels = (0..10).flat_map(|i| vec![(i * 25) as f32; 16]).collect();
        ImageSet::new(shape, pixels).unwrap()
    }

    #[test]
    fn test_history_samples_and_checkpoints() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = tiny_config(dir.path(), 5);
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir).unwrap();
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();

        let history = train::<CpuBackend>(&cfg, &tiny_images(), &ckpt, &metrics, NdArrayDevice::default())
            .unwrap();

        assert_eq!(history.len(), 5);
        assert!(history.d_acc.iter().all(|a| (0.0..=100.0).contains(a)));

        // Samples at steps 0, 2, 4
        let images = Path::new(&cfg.sample_dir);
        assert!(images.join("0.png").exists());
        assert!(!images.join("1.png").exists());
        assert!(images.join("2.png").exists());
        assert!(images.join("4.png").exists());

        // Interval checkpoints at steps 2 and 4
        assert!(ckpt.dir().join("generator_step_2.mpk").exists());
        assert_eq!(ckpt.latest_step().unwrap(), 4);

        // Header + one row per step
        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_zero_epochs_returns_empty_history() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = tiny_config(dir.path(), 0);
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir).unwrap();
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();

        let history = train::<CpuBackend>(&cfg, &tiny_images(), &ckpt, &metrics, NdArrayDevice::default())
            .unwrap();
        assert!(history.is_empty());
        assert!(ckpt.latest_step().is_err());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let dir     = tempfile::tempdir().unwrap();
        let mut cfg = tiny_config(dir.path(), 1);
        cfg.img_rows = 8;
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir).unwrap();
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();

        let result = train::<CpuBackend>(&cfg, &tiny_images(), &ckpt, &metrics, NdArrayDevice::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_sample_interval_rejected() {
        let dir     = tempfile::tempdir().unwrap();
        let mut cfg = tiny_config(dir.path(), 1);
        cfg.sample_interval = 0;
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir).unwrap();
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();

        let result = train::<CpuBackend>(&cfg, &tiny_images(), &ckpt, &metrics, NdArrayDevice::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_checkpoint_schedule() {
        // interval 2 over steps 0..5 → 2, 4 in the loop, nothing extra at the end
        let in_loop: Vec<usize> = (0..5).filter(|&s| is_interval_checkpoint(s, 2)).collect();
        assert_eq!(in_loop, vec![2, 4]);
        assert_eq!(final_checkpoint(5, 2), None);

        // last step 3 is off the interval → saved once at the end
        assert_eq!(final_checkpoint(4, 2), Some(3));

        // step 0 is never an interval save, so a single step is saved at the end
        assert_eq!(final_checkpoint(1, 2), Some(0));

        // interval 0 disables periodic saves
        assert!(!is_interval_checkpoint(10, 0));
        assert_eq!(final_checkpoint(11, 0), Some(10));
        assert_eq!(final_checkpoint(0, 2), None);
    }
}
