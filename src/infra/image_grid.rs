// ============================================================
// Layer 6 — Sample Grid Writer
// ============================================================
// Tiles a SampleGrid into one PNG file using the `image` crate.
//
// Layout: rows × cols tiles separated (and surrounded) by a
// white gutter of GUTTER pixels:
//
//   width  = cols · W + (cols + 1) · GUTTER
//   height = rows · H + (rows + 1) · GUTTER
//
// Colour handling by channel count:
//   1, 2 → grayscale, drawn from the first channel
//   3    → RGB
//   4    → RGBA

use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use std::{fs, path::Path};

use crate::ml::sampler::SampleGrid;

/// White space between and around tiles, in pixels
pub const GUTTER: usize = 2;

/// Size of the tiled image in pixels: (width, height)
pub fn grid_dimensions(grid: &SampleGrid) -> (u32, u32) {
    let width  = grid.cols * grid.shape.cols + (grid.cols + 1) * GUTTER;
    let height = grid.rows * grid.shape.rows + (grid.rows + 1) * GUTTER;
    (width as u32, height as u32)
}

/// Render the grid into an in-memory image
pub fn render_grid(grid: &SampleGrid) -> Result<DynamicImage> {
    let shape = grid.shape;
    let (width, height) = grid_dimensions(grid);

    // Fewer than three channels are shown as grayscale of channel 0
    let out_channels = if shape.channels < 3 { 1 } else { shape.channels };
    let mut buf = vec![u8::MAX; width as usize * height as usize * out_channels];

    let plane = shape.rows * shape.cols;
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let tile = grid.cell(row, col);
            let top  = GUTTER + row * (shape.rows + GUTTER);
            let left = GUTTER + col * (shape.cols + GUTTER);

            for y in 0..shape.rows {
                for x in 0..shape.cols {
                    let dst = ((top + y) * width as usize + left + x) * out_channels;
                    for c in 0..out_channels {
                        let value = tile[c * plane + y * shape.cols + x];
                        buf[dst + c] = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
                    }
                }
            }
        }
    }

    let image = match out_channels {
        1 => GrayImage::from_raw(width, height, buf).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, buf).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, buf).map(DynamicImage::ImageRgba8),
        n => return Err(anyhow!("cannot render images with {n} channels")),
    };
    image.ok_or_else(|| anyhow!("grid buffer does not match {width}x{height}"))
}

/// Render the grid and write it as a PNG, creating parent directories
pub fn save_grid(grid: &SampleGrid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create sample directory '{}'", parent.display()))?;
    }

    render_grid(grid)?
        .save(path)
        .with_context(|| format!("Failed to write sample grid to '{}'", path.display()))?;

    tracing::debug!("Saved sample grid '{}'", path.display());
    Ok(())
}
