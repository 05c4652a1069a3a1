//! Image-backed textures.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use whitted_math::Color;
use whitted_raytrace::Texture;

/// An RGB image sampled with nearest-neighbour lookup.
#[derive(Debug, Clone)]
pub struct ImageTexture {
    image: RgbImage,
}

impl ImageTexture {
    /// Wrap a decoded image. Fails on an empty image.
    pub fn new(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            anyhow::bail!("texture image is empty");
        }
        Ok(Self { image })
    }

    /// Decode a BMP or PNG file.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgb8();
        Self::new(image)
    }
}

impl Texture for ImageTexture {
    fn color_at(&self, u: f64, v: f64) -> Color {
        let (w, h) = self.image.dimensions();
        let x = (u.rem_euclid(1.0) * f64::from(w)) as u32;
        // Image rows run top to bottom, v runs bottom to top
        let y = ((1.0 - v.clamp(0.0, 1.0)) * f64::from(h)) as u32;
        let pixel = self.image.get_pixel(x.min(w - 1), y.min(h - 1));
        Color::new(
            f64::from(pixel[0]) / 255.0,
            f64::from(pixel[1]) / 255.0,
            f64::from(pixel[2]) / 255.0,
        )
    }
}
