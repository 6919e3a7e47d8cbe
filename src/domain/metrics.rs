// ============================================================
// Layer 3 — Training Metrics
// ============================================================
// What one adversarial step reports, and what a whole run
// returns to the caller.
//
// Per step:
//   d_loss — mean discriminator loss over the real batch and
//            the fake batch
//   d_acc  — mean binary accuracy over the same two batches,
//            as a fraction in [0, 1]
//   g_loss — loss of the stacked generator → discriminator
//            model against "everything is real" targets
//
// The progress line printed each step looks like:
//   120 [D loss: 0.693147, acc.: 50.00%] [G loss: 0.701234]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Zero-based training step
    pub step: usize,

    /// 0.5 · (loss on real batch + loss on fake batch)
    pub d_loss: f64,

    /// 0.5 · (accuracy on real batch + accuracy on fake batch)
    pub d_acc: f64,

    /// Combined model loss after the generator update's forward pass
    pub g_loss: f64,
}

impl StepMetrics {
    /// Format the one-line progress report
    pub fn progress_line(&self) -> String {
        format!(
            "{} [D loss: {:.6}, acc.: {:.2}%] [G loss: {:.6}]",
            self.step,
            self.d_loss,
            100.0 * self.d_acc,
            self.g_loss,
        )
    }
}

/// Loss and accuracy curves for a full run, one entry per step.
/// `d_acc` is stored in percent, as printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub d_losses: Vec<f64>,
    pub d_acc:    Vec<f64>,
    pub g_losses: Vec<f64>,
}

impl TrainingHistory {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            d_losses: Vec::with_capacity(steps),
            d_acc:    Vec::with_capacity(steps),
            g_losses: Vec::with_capacity(steps),
        }
    }

    /// Record one step
    pub fn push(&mut self, m: &StepMetrics) {
        self.d_losses.push(m.d_loss);
        self.d_acc.push(100.0 * m.d_acc);
        self.g_losses.push(m.g_loss);
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.d_losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.d_losses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_format() {
        let m = StepMetrics { step: 7, d_loss: 0.5, d_acc: 0.8125, g_loss: 1.25 };
        assert_eq!(
            m.progress_line(),
            "7 [D loss: 0.500000, acc.: 81.25%] [G loss: 1.250000]"
        );
    }

    #[test]
    fn test_history_stores_accuracy_in_percent() {
        let mut history = TrainingHistory::with_capacity(2);
        history.push(&StepMetrics { step: 0, d_loss: 0.7, d_acc: 0.5, g_loss: 0.9 });
        history.push(&StepMetrics { step: 1, d_loss: 0.6, d_acc: 0.75, g_loss: 1.1 });

        assert_eq!(history.len(), 2);
        assert_eq!(history.d_acc, vec![50.0, 75.0]);
        assert_eq!(history.g_losses, vec![0.9, 1.1]);
    }
}
