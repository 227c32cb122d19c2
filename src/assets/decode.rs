use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::NameplateResult;

/// Decoded raster image, straight-alpha RGBA8 exactly as stored in the asset file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    pub pixels: Arc<image::RgbaImage>,
}

impl PreparedImage {
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: Arc::new(img),
        }
    }

    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }
}

pub fn decode_image(bytes: &[u8]) -> NameplateResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PreparedImage::from_rgba_image(dyn_img.to_rgba8()))
}
