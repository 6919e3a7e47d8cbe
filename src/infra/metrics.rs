// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records per-step adversarial metrics to a CSV file.
//
// Metrics recorded per step:
//   - step:   the zero-based step number
//   - d_loss: mean discriminator loss over real + fake batches
//   - d_acc:  mean discriminator accuracy, fraction in [0, 1]
//   - g_loss: generator loss through the combined model
//
// Output file: checkpoints/metrics.csv
//
// Example CSV output:
//   step,d_loss,d_acc,g_loss
//   0,0.703114,0.468750,0.689201
//   1,0.655020,0.593750,0.701457
//   ...
//
// How to read the metrics:
//   - d_acc pinned near 1.0 with rising g_loss → discriminator
//     is winning and the generator gets little signal
//   - d_loss collapsing to 0 is a sign of training failure
//   - healthy runs hover around d_acc ≈ 0.5–0.8

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::metrics::StepMetrics;

pub const CSV_HEADER: &str = "step,d_loss,d_acc,g_loss";

/// Appends step metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger for one training run.
    /// Any metrics.csv left by an earlier run is replaced.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");

        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{CSV_HEADER}")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one step's metrics as a new row
    pub fn log(&self, m: &StepMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{},{:.6},{:.6},{:.6}", m.step, m.d_loss, m.d_acc, m.g_loss)?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_one_row_per_step() {
        let dir = tempfile::tempdir().unwrap();

        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&StepMetrics { step: 0, d_loss: 0.5, d_acc: 0.25, g_loss: 1.0 }).unwrap();
        logger.log(&StepMetrics { step: 1, d_loss: 0.4, d_acc: 0.75, g_loss: 1.5 }).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec![
            CSV_HEADER,
            "0,0.500000,0.250000,1.000000",
            "1,0.400000,0.750000,1.500000",
        ]);
    }

    #[test]
    fn test_new_run_replaces_previous_rows() {
        let dir = tempfile::tempdir().unwrap();

        let first = MetricsLogger::new(dir.path()).unwrap();
        first.log(&StepMetrics { step: 0, d_loss: 0.5, d_acc: 0.25, g_loss: 1.0 }).unwrap();
        first.log(&StepMetrics { step: 1, d_loss: 0.4, d_acc: 0.75, g_loss: 1.5 }).unwrap();

        let second = MetricsLogger::new(dir.path()).unwrap();
        second.log(&StepMetrics { step: 0, d_loss: 0.9, d_acc: 0.5, g_loss: 0.8 }).unwrap();

        let contents = fs::read_to_string(second.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "0,0.900000,0.500000,0.800000"]);
    }
}
