// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`  — trains the GAN on MNIST digits
//   2. `sample` — loads the latest generator and writes a grid
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, SampleArgs, TrainArgs};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "conv-gan",
    version = "0.1.0",
    about = "Train a convolutional GAN on handwritten digits, then sample image grids from it."
)]
pub struct Cli {
    /// The subcommand to run (train or sample)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(args),
            Commands::Sample(args) => run_sample(args),
        }
    }
}

/// Converts CLI args into a TrainConfig and hands off to Layer 2.
fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training, checkpoints in: {}", args.checkpoint_dir);

    let use_case = TrainUseCase::new(args.into());
    let history  = use_case.execute()?;

    if history.is_empty() {
        println!("No training steps were run.");
        return Ok(());
    }

    let d_loss = history.d_losses.last().copied().unwrap_or_default();
    let g_loss = history.g_losses.last().copied().unwrap_or_default();
    println!(
        "Training complete after {} steps. Final D loss: {:.4}, G loss: {:.4}",
        history.len(),
        d_loss,
        g_loss
    );
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    use crate::application::sample_use_case::SampleUseCase;

    let use_case = SampleUseCase::new(args.checkpoint_dir, args.backend.map(Into::into));
    let written  = use_case.execute(Path::new(&args.output), args.rows, args.cols)?;

    println!("Sample grid written to {}", written.display());
    Ok(())
}
