// ============================================================
// Layer 4 — Pixel Preprocessor
// ============================================================
// Converts between the three value ranges the pipeline uses:
//
//   raw pixels      [0, 255]   — as stored in ImageSet
//   model range     [-1, 1]    — generator tanh output,
//                                discriminator input
//   display range   [0, 1]     — written to sample PNGs
//
// Also places a smaller image into the centre of a larger
// canvas (MNIST digits are 28×28, the default model is 32×32).

use anyhow::{ensure, Result};

use crate::domain::shape::ImageShape;

/// Map a raw [0, 255] intensity into the model's [-1, 1] range
pub fn rescale(pixel: f32) -> f32 {
    pixel / 127.5 - 1.0
}

/// Map a model-range value back into [0, 1] for display.
/// Values outside [-1, 1] are clamped.
pub fn to_unit(value: f32) -> f32 {
    (0.5 * value + 0.5).clamp(0.0, 1.0)
}

/// Copy a single-channel `from_rows × from_cols` image into the
/// centre of a zero-filled canvas of shape `to`, replicating the
/// gray values across every output channel.
///
/// Output is channel-first (C, H, W). Fails when the source does
/// not fit inside the target.
pub fn pad_center(
    image:     &[f32],
    from_rows: usize,
    from_cols: usize,
    to:        ImageShape,
) -> Result<Vec<f32>> {
    ensure!(
        image.len() == from_rows * from_cols,
        "expected {} pixels for a {from_rows}x{from_cols} image, got {}",
        from_rows * from_cols,
        image.len()
    );
    ensure!(
        from_rows <= to.rows && from_cols <= to.cols,
        "a {from_rows}x{from_cols} image does not fit into {to}"
    );

    let top  = (to.rows - from_rows) / 2;
    let left = (to.cols - from_cols) / 2;
    let plane = to.rows * to.cols;

    let mut out = vec![0.0f32; to.pixels()];
    for c in 0..to.channels {
        for r in 0..from_rows {
            let src = &image[r * from_cols..(r + 1) * from_cols];
            let dst = c * plane + (top + r) * to.cols + left;
            out[dst..dst + from_cols].copy_from_slice(src);
        }
    }
    Ok(out)
}
