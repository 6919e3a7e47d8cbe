// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the image shape      (Layer 3 - domain)
//   Step 2: Load MNIST digits             (Layer 4 - data)
//   Step 3: Prepare checkpoint directory  (Layer 6 - infra)
//   Step 4: Save config                   (Layer 6 - infra)
//   Step 5: Open the metrics CSV          (Layer 6 - infra)
//   Step 6: Run the adversarial loop      (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::mnist::MnistSource;
use crate::domain::{
    metrics::TrainingHistory,
    shape::ImageShape,
    traits::{BackendKind, ImageSource},
};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::{
    adversarial::GanConfig,
    discriminator::DiscriminatorConfig,
    generator::GeneratorConfig,
    trainer::run_training,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Saved next to the checkpoints so `sample` can rebuild the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub checkpoint_dir:      String,
    pub sample_dir:          String,
    pub img_rows:            usize,
    pub img_cols:            usize,
    pub channels:            usize,
    pub latent_dim:          usize,
    /// Number of training steps (one batch each)
    pub epochs:              usize,
    pub batch_size:          usize,
    pub sample_interval:     usize,
    /// 0 disables periodic checkpoints; the final one is always written
    pub checkpoint_interval: usize,
    pub lr:                  f64,
    pub beta_1:              f32,
    /// Use only the first N training digits
    pub mnist_limit:         Option<usize>,
    pub seed:                Option<u64>,
    pub backend:             BackendKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir:      "checkpoints".to_string(),
            sample_dir:          "images".to_string(),
            img_rows:            32,
            img_cols:            32,
            channels:            1,
            latent_dim:          100,
            epochs:              30_000,
            batch_size:          32,
            sample_interval:     200,
            checkpoint_interval: 1_000,
            lr:                  2e-4,
            beta_1:              0.5,
            mnist_limit:         None,
            seed:                None,
            backend:             BackendKind::Wgpu,
        }
    }
}

impl TrainConfig {
    pub fn image_shape(&self) -> Result<ImageShape> {
        ImageShape::new(self.img_rows, self.img_cols, self.channels)
    }

    /// Network and optimiser settings derived from this run's config
    pub fn gan_config(&self) -> Result<GanConfig> {
        let shape = self.image_shape()?;
        Ok(GanConfig::new(
            GeneratorConfig::from_shape(shape, self.latent_dim),
            DiscriminatorConfig::from_shape(shape),
        )
        .with_lr(self.lr)
        .with_beta_1(self.beta_1))
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingHistory> {
        let cfg = &self.config;

        // ── Step 1: Validate the image shape ──────────────────────────────────
        let shape = cfg.image_shape()?;

        // ── Step 2: Load MNIST, padded to the target shape ────────────────────
        tracing::info!("Loading MNIST training digits as {} images", shape);
        let images = MnistSource::new(shape, cfg.mnist_limit).load_all()?;
        tracing::info!("Loaded {} images", images.len());

        // ── Step 3 + 4: Checkpoint directory and config ───────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir)?;
        ckpt.save_config(cfg)?;
        tracing::info!("Checkpoints go to '{}'", ckpt.dir().display());

        // ── Step 5: Metrics CSV lives next to the checkpoints ─────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        tracing::info!("Step metrics go to '{}'", metrics.csv_path().display());

        // ── Step 6: Run the training loop (Layer 5) ───────────────────────────
        run_training(cfg, &images, &ckpt, &metrics)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.image_shape().unwrap(), ImageShape::new(32, 32, 1).unwrap());
        assert_eq!(cfg.latent_dim, 100);
        assert_eq!(cfg.batch_size, 32);
        assert_eq!(cfg.sample_interval, 200);
        assert_eq!(cfg.backend, BackendKind::Wgpu);
    }

    #[test]
    fn test_gan_config_follows_train_config() {
        let cfg = TrainConfig { img_rows: 8, img_cols: 12, channels: 3, latent_dim: 7, lr: 1e-3, ..TrainConfig::default() };
        let gan = cfg.gan_config().unwrap();

        assert_eq!(gan.generator.rows, 8);
        assert_eq!(gan.generator.cols, 12);
        assert_eq!(gan.generator.latent_dim, 7);
        assert_eq!(gan.discriminator.channels, 3);
        assert_eq!(gan.lr, 1e-3);
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let cfg = TrainConfig { channels: 0, ..TrainConfig::default() };
        assert!(cfg.image_shape().is_err());
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg  = TrainConfig { seed: Some(9), backend: BackendKind::NdArray, ..TrainConfig::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"ndarray\""));

        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(9));
        assert_eq!(back.backend, BackendKind::NdArray);
    }
}
