// ============================================================
// Layer 5 — Discriminator Network
// ============================================================
// Maps an image to a validity score in (0, 1):
// 1 = "this looks real", 0 = "this was generated".
//
// Topology (input [batch, C, H, W]):
//
//   Conv  16 k3 s1   BatchNorm(0.99)  LeakyReLU(0.2)  Dropout(0.25)
//   Conv  32 k3 s2                    LeakyReLU(0.2)  Dropout(0.25)
//   Conv  64 k3 s2                    LeakyReLU(0.2)  Dropout(0.25)  BatchNorm(0.8)
//   Conv 128 k3 s1                    LeakyReLU(0.2)  Dropout(0.25)
//   Flatten
//   Dense 128 ReLU → Dense 64 ReLU → Dense 16 ReLU → Dense 1 sigmoid
//
// Burn's Dropout and BatchNorm switch behaviour on the backend:
// on an Autodiff backend they run in training mode, after
// model.valid() they run in inference mode.
//
// forward_logits() stops before the final sigmoid so the loss can
// use the numerically stable "with logits" binary cross-entropy.

use burn::{
    nn::{conv::Conv2d, BatchNorm, Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::{leaky_relu, relu},
};

use crate::domain::shape::ImageShape;
use crate::ml::layers::{
    batch_norm, conv_same, conv_same_out, KERAS_BN_DEFAULT_MOMENTUM, LEAKY_SLOPE,
};

/// Feature maps after the last convolution
const LAST_FEATURES: usize = 128;

#[derive(Config, Debug)]
pub struct DiscriminatorConfig {
    pub rows:     usize,
    pub cols:     usize,
    pub channels: usize,
    #[config(default = 0.25)]
    pub dropout: f64,
}

impl DiscriminatorConfig {
    pub fn from_shape(shape: ImageShape) -> Self {
        Self::new(shape.rows, shape.cols, shape.channels)
    }

    /// Number of features entering the dense head
    pub fn flat_features(&self) -> usize {
        // Two stride-2 convolutions (layers 2 and 3)
        let rows = conv_same_out(conv_same_out(self.rows, 3, 2), 3, 2);
        let cols = conv_same_out(conv_same_out(self.cols, 3, 2), 3, 2);
        rows * cols * LAST_FEATURES
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        Discriminator {
            conv1: conv_same(self.channels, 16, 3, 1, device),
            bn1:   batch_norm(16, KERAS_BN_DEFAULT_MOMENTUM, device),
            conv2: conv_same(16, 32, 3, 2, device),
            conv3: conv_same(32, 64, 3, 2, device),
            bn3:   batch_norm(64, 0.8, device),
            conv4: conv_same(64, LAST_FEATURES, 3, 1, device),

            dense1:   LinearConfig::new(self.flat_features(), 128).init(device),
            dense2:   LinearConfig::new(128, 64).init(device),
            dense3:   LinearConfig::new(64, 16).init(device),
            validity: LinearConfig::new(16, 1).init(device),

            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    conv1:    Conv2d<B>,
    bn1:      BatchNorm<B>,
    conv2:    Conv2d<B>,
    conv3:    Conv2d<B>,
    bn3:      BatchNorm<B>,
    conv4:    Conv2d<B>,
    dense1:   Linear<B>,
    dense2:   Linear<B>,
    dense3:   Linear<B>,
    validity: Linear<B>,
    dropout:  Dropout,
}

impl<B: Backend> Discriminator<B> {
    /// images: [batch, C, H, W] → validity: [batch, 1] in (0, 1)
    #[cfg(test)]
    pub(crate) fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        burn::tensor::activation::sigmoid(self.forward_logits(images))
    }

    /// images: [batch, C, H, W] → pre-sigmoid scores: [batch, 1]
    pub fn forward_logits(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.bn1.forward(self.conv1.forward(images));
        let x = self.dropout.forward(leaky_relu(x, LEAKY_SLOPE));

        let x = self.dropout.forward(leaky_relu(self.conv2.forward(x), LEAKY_SLOPE));

        let x = self.dropout.forward(leaky_relu(self.conv3.forward(x), LEAKY_SLOPE));
        let x = self.bn3.forward(x);

        let x = self.dropout.forward(leaky_relu(self.conv4.forward(x), LEAKY_SLOPE));

        let [batch, channels, height, width] = x.dims();
        let x = x.reshape([batch, channels * height * width]);

        let x = relu(self.dense1.forward(x));
        let x = relu(self.dense2.forward(x));
        let x = relu(self.dense3.forward(x));
        self.validity.forward(x)
    }

    /// Weights of the final dense layer, for update checks in tests
    #[cfg(test)]
    pub(crate) fn output_weights(&self) -> Vec<f32> {
        self.validity.weight.val().into_data().to_vec::<f32>().unwrap()
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
    fn test_flat_features() {
        let cfg = DiscriminatorConfig::new(32, 32, 1);
        // 32 → 16 → 8
        assert_eq!(cfg.flat_features(), 8 * 8 * 128);

        let odd = DiscriminatorConfig::new(7, 5, 3);
        // 7 → 4 → 2, 5 → 3 → 2
        assert_eq!(odd.flat_features(), 2 * 2 * 128);
    }

    #[test]
    fn test_validity_shape_and_range() {
        let device = Default::default();
        let shape  = ImageShape::new(8, 8, 1).unwrap();
        let model: Discriminator<TestBackend> = DiscriminatorConfig::from_shape(shape).init(&device);

        let images = Tensor::<TestBackend, 4>::random([5, 1, 8, 8], Distribution::Uniform(-1.0, 1.0), &device);
        let scores = model.forward(images);
        assert_eq!(scores.dims(), [5, 1]);

        let values = scores.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| *v >= 0.0 && *v <= 1.0));
    }

    #[test]
    fn test_odd_sized_images() {
        let device = Default::default();
        let shape  = ImageShape::new(7, 5, 3).unwrap();
        let model: Discriminator<TestBackend> = DiscriminatorConfig::from_shape(shape).init(&device);

        let images = Tensor::<TestBackend, 4>::zeros([2, 3, 7, 5], &device);
        assert_eq!(model.forward_logits(images).dims(), [2, 1]);
    }
}
