// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Everything that builds, trains, or runs a network lives here.
//
// What's in this layer:
//
//   layers.rs        — Keras-style helpers: "same" convolutions
//                      and BatchNorm with Keras momentum
//
//   generator.rs     — noise → image
//                      Dense → 4 conv blocks with two ×2
//                      upsamplings → two stride-2 convs → tanh
//
//   discriminator.rs — image → validity
//                      4 conv blocks (LeakyReLU, dropout) →
//                      dense head → one logit
//
//   adversarial.rs   — the combined model (generator + frozen
//                      discriminator) and the GAN training step
//
//   trainer.rs       — the step loop: progress output, sample
//                      grids, checkpoints, metrics CSV
//
//   sampler.rs       — draws a grid of generated images
//
//   inferencer.rs    — restores the generator from disk for
//                      the `sample` command
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Radford et al. (2016) DCGAN

/// Keras-compatible convolution and BatchNorm builders
pub mod layers;

/// Generator network
pub mod generator;

/// Discriminator network
pub mod discriminator;

/// Combined model and one adversarial training step
pub mod adversarial;

/// Sample grid generation
pub mod sampler;

/// Full training loop with sampling and checkpointing
pub mod trainer;

/// Loads a trained generator for sampling
pub mod inferencer;
