// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `sample`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::TrainConfig;
use crate::domain::traits::BackendKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the GAN on MNIST digits
    Train(TrainArgs),

    /// Write a grid of generated images from a trained checkpoint
    Sample(SampleArgs),
}

/// Compute backend selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    /// GPU through wgpu
    Wgpu,
    /// CPU through ndarray
    Ndarray,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Wgpu    => BackendKind::Wgpu,
            BackendArg::Ndarray => BackendKind::NdArray,
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory for checkpoints, train_config.json and metrics.csv
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory for the periodic sample grids ({step}.png)
    #[arg(long, default_value = "images")]
    pub sample_dir: String,

    #[arg(long, default_value_t = 32)]
    pub img_rows: usize,

    #[arg(long, default_value_t = 32)]
    pub img_cols: usize,

    /// 1 = grayscale, 3 = RGB
    #[arg(long, default_value_t = 1)]
    pub channels: usize,

    /// Size of the noise vector fed to the generator
    #[arg(long, default_value_t = 100)]
    pub latent_dim: usize,

    /// Number of training steps, one random batch each
    #[arg(long, default_value_t = 30_000)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Write a sample grid every N steps
    #[arg(long, default_value_t = 200)]
    pub sample_interval: usize,

    /// Save both networks every N steps (0 = only at the end)
    #[arg(long, default_value_t = 1_000)]
    pub checkpoint_interval: usize,

    /// Adam learning rate for both networks
    #[arg(long, default_value_t = 2e-4)]
    pub lr: f64,

    /// Adam beta_1 for both networks
    #[arg(long, default_value_t = 0.5)]
    pub beta_1: f32,

    /// Train on the first N MNIST digits only
    #[arg(long)]
    pub mnist_limit: Option<usize>,

    /// Seed for batch sampling and backend noise
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = BackendArg::Wgpu)]
    pub backend: BackendArg,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            checkpoint_dir:      a.checkpoint_dir,
            sample_dir:          a.sample_dir,
            img_rows:            a.img_rows,
            img_cols:            a.img_cols,
            channels:            a.channels,
            latent_dim:          a.latent_dim,
            epochs:              a.epochs,
            batch_size:          a.batch_size,
            sample_interval:     a.sample_interval,
            checkpoint_interval: a.checkpoint_interval,
            lr:                  a.lr,
            beta_1:              a.beta_1,
            mnist_limit:         a.mnist_limit,
            seed:                a.seed,
            backend:             a.backend.into(),
        }
    }
}

/// All arguments for the `sample` command
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// PNG file to write
    #[arg(long, default_value = "samples.png")]
    pub output: String,

    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    #[arg(long, default_value_t = 5)]
    pub cols: usize,

    /// Override the backend recorded at training time
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,
}
