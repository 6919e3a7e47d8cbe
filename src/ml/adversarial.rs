// ============================================================
// Layer 5 — Adversarial Model and GAN Step
// ============================================================
// Two optimisation problems share one training step:
//
//   Discriminator: tell real images (target 1) from generated
//                  images (target 0)
//   Generator:     make the discriminator answer 1 for generated
//                  images
//
// The generator is trained through the "combined" model
//   noise → generator → discriminator → validity
// in which the discriminator is frozen: its parameters do not
// require gradients, and only the generator's gradients are
// handed to the generator's optimiser.
//
// One step, in order:
//   1. fake = generator(noise)           (inference mode, no grad)
//   2. discriminator update on real, target 1
//   3. discriminator update on fake, target 0
//   4. generator update through the combined model on fresh
//      noise, target 1
//
// Loss:     binary cross-entropy on the discriminator's logits
// Accuracy: (validity > 0.5) == target, averaged over the batch
//
// Reference: Goodfellow et al. (2014) Generative Adversarial Nets
//            Burn Book §5 (Custom Training Loop)

use burn::{
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, Distribution},
};

use crate::domain::metrics::StepMetrics;
use crate::ml::discriminator::{Discriminator, DiscriminatorConfig};
use crate::ml::generator::{Generator, GeneratorConfig};

/// Adam epsilon matching the Keras default
const ADAM_EPSILON: f32 = 1e-7;

// ─── GanConfig ────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct GanConfig {
    pub generator:     GeneratorConfig,
    pub discriminator: DiscriminatorConfig,
    #[config(default = 2e-4)]
    pub lr: f64,
    #[config(default = 0.5)]
    pub beta_1: f32,
}

impl GanConfig {
    fn optimizer(&self) -> AdamConfig {
        AdamConfig::new()
            .with_beta_1(self.beta_1)
            .with_epsilon(ADAM_EPSILON)
    }

    pub fn init<B: AutodiffBackend>(&self, device: &B::Device) -> Gan<B> {
        let generator:     Generator<B>     = self.generator.init(device);
        let discriminator: Discriminator<B> = self.discriminator.init(device);

        tracing::info!(
            "Generator: {} parameters, Discriminator: {} parameters",
            generator.num_params(),
            discriminator.num_params(),
        );

        Gan {
            generator,
            discriminator,
            optim_gen:  self.optimizer().init(),
            optim_disc: self.optimizer().init(),
            lr:         self.lr,
            latent_dim: self.generator.latent_dim,
            device:     device.clone(),
        }
    }
}

// ─── AdversarialModel ─────────────────────────────────────────────────────────
/// Generator stacked on a frozen copy of the discriminator.
///
/// The generator copy shares parameter ids with the original,
/// so gradients collected here apply to the original generator.
pub struct AdversarialModel<B: Backend> {
    generator:     Generator<B>,
    discriminator: Discriminator<B>,
}

impl<B: Backend> AdversarialModel<B> {
    pub fn stack(generator: &Generator<B>, discriminator: &Discriminator<B>) -> Self {
        Self {
            generator:     generator.clone(),
            discriminator: discriminator.clone().no_grad(),
        }
    }

    /// noise: [batch, latent_dim] → validity: [batch, 1]
    #[cfg(test)]
    pub(crate) fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        self.discriminator.forward(self.generator.forward(noise))
    }

    /// noise: [batch, latent_dim] → pre-sigmoid validity: [batch, 1]
    pub fn forward_logits(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        self.discriminator.forward_logits(self.generator.forward(noise))
    }
}

// ─── Gan ──────────────────────────────────────────────────────────────────────
/// Both networks plus one Adam optimiser each.
pub struct Gan<B: AutodiffBackend> {
    generator:     Generator<B>,
    discriminator: Discriminator<B>,
    optim_gen:     OptimizerAdaptor<Adam, Generator<B>, B>,
    optim_disc:    OptimizerAdaptor<Adam, Discriminator<B>, B>,
    lr:            f64,
    latent_dim:    usize,
    device:        B::Device,
}

/// Loss and accuracy of one discriminator update
#[derive(Debug, Clone, Copy, PartialEq)]
struct BatchResult {
    loss:     f64,
    accuracy: f64,
}

impl BatchResult {
    /// Equal-weight mean of the real-batch and fake-batch results
    fn mean(self, other: BatchResult) -> BatchResult {
        BatchResult {
            loss:     0.5 * (self.loss + other.loss),
            accuracy: 0.5 * (self.accuracy + other.accuracy),
        }
    }
}

impl<B: AutodiffBackend> Gan<B> {
    pub fn generator(&self) -> &Generator<B> {
        &self.generator
    }

    pub fn discriminator(&self) -> &Discriminator<B> {
        &self.discriminator
    }

    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    /// Standard normal latent vectors: [batch, latent_dim]
    pub fn noise<BN: Backend<Device = B::Device>>(&self, batch: usize) -> Tensor<BN, 2> {
        Tensor::random([batch, self.latent_dim], Distribution::Normal(0.0, 1.0), &self.device)
    }

    /// Run one full adversarial step on a batch of real images
    /// (already rescaled to [-1, 1]).
    pub fn train_step(&mut self, step: usize, real: Tensor<B, 4>) -> StepMetrics {
        let [batch, _, _, _] = real.dims();

        // ── Generate a batch of fake images ───────────────────────────────────
        // valid() drops autodiff and switches BatchNorm to running stats,
        // so no gradient can reach the generator from the discriminator update
        let noise = self.noise::<B::InnerBackend>(batch);
        let fake  = Tensor::<B, 4>::from_inner(self.generator.valid().forward(noise));

        // ── Train the discriminator: real → 1, fake → 0 ───────────────────────
        let on_real = self.update_discriminator(real, true);
        let on_fake = self.update_discriminator(fake, false);

        // ── Train the generator to have fakes labelled real ───────────────────
        let g_loss = self.update_generator(batch);
        let d      = on_real.mean(on_fake);

        StepMetrics { step, d_loss: d.loss, d_acc: d.accuracy, g_loss }
    }

    /// One optimiser step of the discriminator on a single labelled batch.
    /// Reported loss/accuracy come from the forward pass before the update.
    fn update_discriminator(&mut self, images: Tensor<B, 4>, is_real: bool) -> BatchResult {
        let [batch, _, _, _] = images.dims();
        let logits  = self.discriminator.forward_logits(images);
        let targets = validity_targets::<B>(batch, is_real, &self.device);

        let accuracy = binary_accuracy(logits.clone().detach(), is_real);
        let loss     = bce_with_logits(logits, targets);
        let loss_val = loss.clone().into_scalar().elem::<f64>();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.discriminator);
        self.discriminator = self.optim_disc.step(self.lr, self.discriminator.clone(), grads);

        BatchResult { loss: loss_val, accuracy }
    }

    /// One optimiser step of the generator through the combined model
    fn update_generator(&mut self, batch: usize) -> f64 {
        let combined = AdversarialModel::stack(&self.generator, &self.discriminator);
        let logits   = combined.forward_logits(self.noise::<B>(batch));
        let targets  = validity_targets::<B>(batch, true, &self.device);

        let loss     = bce_with_logits(logits, targets);
        let loss_val = loss.clone().into_scalar().elem::<f64>();

        // Only generator parameters are collected — the discriminator stays frozen
        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.generator);
        self.generator = self.optim_gen.step(self.lr, self.generator.clone(), grads);

        loss_val
    }
}

/// All-ones (real) or all-zeros (fake) targets: [batch, 1]
fn validity_targets<B: Backend>(batch: usize, is_real: bool, device: &B::Device) -> Tensor<B, 2, Int> {
    if is_real {
        Tensor::ones([batch, 1], device)
    } else {
        Tensor::zeros([batch, 1], device)
    }
}

/// Mean binary cross-entropy of sigmoid(logits) against integer targets
pub fn bce_with_logits<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2, Int>) -> Tensor<B, 1> {
    BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(&logits.device())
        .forward(logits, targets)
}

/// Fraction of samples classified as `is_real` (logit > 0 ⇔ validity > 0.5)
pub fn binary_accuracy<B: Backend>(logits: Tensor<B, 2>, is_real: bool) -> f64 {
    let predicted_real = logits.greater_elem(0.0);
    let hits = if is_real { predicted_real } else { predicted_real.bool_not() };
    hits.float().mean().into_scalar().elem::<f64>()
}
