// ============================================================
// Layer 5 — Generator Network
// ============================================================
// Maps a latent noise vector to an image in [-1, 1].
//
// Topology (H × W = configured image rows × cols):
//
//   z [batch, latent_dim]
//     Dense → 128·H·W, ReLU
//     Reshape → [128, H, W]
//     BatchNorm(0.8)
//     Conv 128 k3        ReLU  BatchNorm(0.8)
//     Conv  64 k3        ReLU  BatchNorm(0.8)
//     Upsample ×2
//     Conv  32 k3        ReLU  BatchNorm(0.8)      [2H × 2W]
//     Upsample ×2
//     Conv  16 k3        ReLU  BatchNorm(0.8)      [4H × 4W]
//     Conv  16 k4 s2     LeakyReLU(0.2)            [2H × 2W]
//     Conv  16 k4 s2     LeakyReLU(0.2)            [H × W]
//     Conv   C k3        tanh
//   image [batch, C, H, W]
//
// Reference: Burn Book §3 (Building Blocks)
//            Radford et al. (2016) DCGAN

use burn::{
    nn::{
        conv::Conv2d,
        interpolate::{Interpolate2d, Interpolate2dConfig, InterpolateMode},
        BatchNorm, Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{leaky_relu, relu, tanh},
};

use crate::domain::shape::ImageShape;
use crate::ml::layers::{batch_norm, conv_same, LEAKY_SLOPE};

/// Feature maps produced by the dense projection
const BASE_FEATURES: usize = 128;

/// Keras momentum of every generator BatchNorm
const GEN_BN_MOMENTUM: f64 = 0.8;

#[derive(Config, Debug)]
pub struct GeneratorConfig {
    pub rows:     usize,
    pub cols:     usize,
    pub channels: usize,
    #[config(default = 100)]
    pub latent_dim: usize,
}

impl GeneratorConfig {
    pub fn from_shape(shape: ImageShape, latent_dim: usize) -> Self {
        Self::new(shape.rows, shape.cols, shape.channels).with_latent_dim(latent_dim)
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> Generator<B> {
        let upsample = Interpolate2dConfig::new()
            .with_scale_factor(Some([2.0, 2.0]))
            .with_mode(InterpolateMode::Nearest)
            .init();

        Generator {
            dense: LinearConfig::new(self.latent_dim, BASE_FEATURES * self.rows * self.cols)
                .init(device),
            bn_dense: batch_norm(BASE_FEATURES, GEN_BN_MOMENTUM, device),

            conv1: conv_same(BASE_FEATURES, 128, 3, 1, device),
            bn1:   batch_norm(128, GEN_BN_MOMENTUM, device),
            conv2: conv_same(128, 64, 3, 1, device),
            bn2:   batch_norm(64, GEN_BN_MOMENTUM, device),
            conv3: conv_same(64, 32, 3, 1, device),
            bn3:   batch_norm(32, GEN_BN_MOMENTUM, device),
            conv4: conv_same(32, 16, 3, 1, device),
            bn4:   batch_norm(16, GEN_BN_MOMENTUM, device),

            down1: conv_same(16, 16, 4, 2, device),
            down2: conv_same(16, 16, 4, 2, device),
            to_image: conv_same(16, self.channels, 3, 1, device),

            upsample,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    dense:    Linear<B>,
    bn_dense: BatchNorm<B>,
    conv1:    Conv2d<B>,
    bn1:      BatchNorm<B>,
    conv2:    Conv2d<B>,
    bn2:      BatchNorm<B>,
    conv3:    Conv2d<B>,
    bn3:      BatchNorm<B>,
    conv4:    Conv2d<B>,
    bn4:      BatchNorm<B>,
    down1:    Conv2d<B>,
    down2:    Conv2d<B>,
    to_image: Conv2d<B>,
    upsample: Interpolate2d,
    rows:     usize,
    cols:     usize,
}

impl<B: Backend> Generator<B> {
    /// noise: [batch, latent_dim] → images: [batch, channels, rows, cols]
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 4> {
        let [batch, _] = noise.dims();

        let x = relu(self.dense.forward(noise));
        let x = x.reshape([batch, BASE_FEATURES, self.rows, self.cols]);
        let x = self.bn_dense.forward(x);

        let x = self.bn1.forward(relu(self.conv1.forward(x)));
        let x = self.bn2.forward(relu(self.conv2.forward(x)));

        let x = self.upsample.forward(x);
        let x = self.bn3.forward(relu(self.conv3.forward(x)));

        let x = self.upsample.forward(x);
        let x = self.bn4.forward(relu(self.conv4.forward(x)));

        let x = leaky_relu(self.down1.forward(x), LEAKY_SLOPE);
        let x = leaky_relu(self.down2.forward(x), LEAKY_SLOPE);

        tanh(self.to_image.forward(x))
    }

    /// Weights of the final convolution, for update checks in tests
    #[cfg(test)]
    pub(crate) fn output_weights(&self) -> Vec<f32> {
        self.to_image.weight.val().into_data().to_vec::<f32>().unwrap()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray;

    #[test]
    fn test_output_shape_matches_image_shape() {
        let device = Default::default();
        let shape  = ImageShape::new(4, 6, 1).unwrap();
        let model: Generator<TestBackend> = GeneratorConfig::from_shape(shape, 8).init(&device);

        let noise  = Tensor::<TestBackend, 2>::random([3, 8], Distribution::Normal(0.0, 1.0), &device);
        let images = model.forward(noise);
        assert_eq!(images.dims(), [3, 1, 4, 6]);
    }

    #[test]
    fn test_output_in_tanh_range() {
        let device = Default::default();
        let shape  = ImageShape::new(4, 4, 3).unwrap();
        let model: Generator<TestBackend> = GeneratorConfig::from_shape(shape, 8).init(&device);

        let noise  = Tensor::<TestBackend, 2>::random([2, 8], Distribution::Normal(0.0, 1.0), &device);
        let values = model.forward(noise).into_data().to_vec::<f32>().unwrap();
        assert_eq!(values.len(), 2 * 3 * 4 * 4);
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_dense_layer_scales_with_image_area() {
        let device = Default::default();
        let small: Generator<TestBackend> = GeneratorConfig::new(2, 2, 1).with_latent_dim(4).init(&device);
        let large: Generator<TestBackend> = GeneratorConfig::new(4, 4, 1).with_latent_dim(4).init(&device);

        // Only the dense projection depends on rows × cols:
        // (4 inputs + 1 bias) · 128 · (16 - 4) extra parameters
        assert_eq!(large.num_params() - small.num_params(), 5 * 128 * 12);
    }
}
