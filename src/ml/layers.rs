// ============================================================
// Layer 5 — Layer Builders
// ============================================================
// Small constructors shared by the generator and discriminator
// so both networks translate Keras-style layer settings into
// Burn configs the same way.
//
// "same" padding:
//   Burn's PaddingConfig2d::Same only supports odd kernels at
//   stride 1. We use explicit symmetric padding of (k-1)/2
//   instead, which gives:
//     k=3, s=1 → output = input
//     k=3, s=2 → output = ceil(input / 2)
//     k=4, s=2 → output = input / 2   (even inputs)
//
// BatchNorm momentum:
//   Keras:  running = momentum · running + (1 - momentum) · batch
//   Burn:   running = (1 - momentum) · running + momentum · batch
//   so a Keras momentum m becomes a Burn momentum of 1 - m.
//   Keras' default epsilon (1e-3) is kept as well.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        BatchNorm, BatchNormConfig, PaddingConfig2d,
    },
    prelude::*,
};

/// Keras' BatchNormalization epsilon
pub const KERAS_BN_EPSILON: f64 = 1e-3;

/// Keras' default BatchNormalization momentum
pub const KERAS_BN_DEFAULT_MOMENTUM: f64 = 0.99;

/// Negative slope used by every LeakyReLU in both networks
pub const LEAKY_SLOPE: f64 = 0.2;

/// 2-D convolution with "same"-style padding
pub fn conv_same<B: Backend>(
    in_channels:  usize,
    out_channels: usize,
    kernel:       usize,
    stride:       usize,
    device:       &B::Device,
) -> Conv2d<B> {
    let pad = (kernel - 1) / 2;
    Conv2dConfig::new([in_channels, out_channels], [kernel, kernel])
        .with_stride([stride, stride])
        .with_padding(PaddingConfig2d::Explicit(pad, pad))
        .init(device)
}

/// Batch normalisation configured from a Keras momentum value
pub fn batch_norm<B: Backend>(
    num_features:   usize,
    keras_momentum: f64,
    device:         &B::Device,
) -> BatchNorm<B> {
    BatchNormConfig::new(num_features)
        .with_momentum(1.0 - keras_momentum)
        .with_epsilon(KERAS_BN_EPSILON)
        .init(device)
}

/// Spatial size after a conv_same layer
pub fn conv_same_out(input: usize, kernel: usize, stride: usize) -> usize {
    let pad = (kernel - 1) / 2;
    (input + 2 * pad - kernel) / stride + 1
}
