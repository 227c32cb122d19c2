use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    foundation::error::NameplateResult,
    layout::strategy::{CenteredRow, Compositor},
};

/// A finished image in straight-alpha RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
    image: image::RgbaImage,
}

impl Composite {
    /// Start from a private copy of `background`; the cached original is never written to.
    pub fn from_background(background: &PreparedImage) -> Self {
        Self::from_image(background.pixels().clone())
    }

    pub fn from_image(image: image::RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }

    /// Alpha-composite `src` with its top-left corner at `(x, y)`.
    ///
    /// Coordinates may be negative or run past the canvas; the out-of-bounds part is clipped.
    /// Only pixels under `src` are touched, and fully transparent source pixels leave the canvas
    /// as it was.
    pub fn draw_over(&mut self, src: &PreparedImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.image, src.pixels(), x, y);
    }

    pub fn encode_png(&self) -> NameplateResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode composite as png")?;
        Ok(buf)
    }
}

/// Everything needed to place one row of glyphs on a background.
#[derive(Clone, Debug)]
pub struct LayoutSpec<'a> {
    pub background: &'a PreparedImage,
    pub glyphs: Vec<&'a PreparedImage>,
    /// Horizontal gap between neighbouring glyphs, in pixels.
    pub spacing: i64,
    /// Top edge of every glyph, in pixels.
    pub vertical_offset: i64,
}

impl<'a> LayoutSpec<'a> {
    /// `sum(widths) + spacing * (n - 1)`; zero for an empty row.
    pub fn total_width(&self) -> i64 {
        let n = self.glyphs.len() as i64;
        if n == 0 {
            return 0;
        }
        let widths: i64 = self.glyphs.iter().map(|g| i64::from(g.width)).sum();
        widths + self.spacing * (n - 1)
    }

    /// Left edge that centers the row; floor division, negative when the row overflows.
    pub fn x_start(&self) -> i64 {
        (i64::from(self.background.width) - self.total_width()).div_euclid(2)
    }

    /// Top-left corner of every glyph, left to right.
    pub fn placements(&self) -> Vec<(i64, i64)> {
        let mut x = self.x_start();
        self.glyphs
            .iter()
            .map(|g| {
                let at = (x, self.vertical_offset);
                x += i64::from(g.width) + self.spacing;
                at
            })
            .collect()
    }
}

/// Center `glyphs` on a copy of `background`.
///
/// Returns `None` when there is nothing to draw.
pub fn compose(
    background: &PreparedImage,
    glyphs: &[&PreparedImage],
    spacing: i64,
    vertical_offset: i64,
) -> Option<Composite> {
    let spec = LayoutSpec {
        background,
        glyphs: glyphs.to_vec(),
        spacing,
        vertical_offset,
    };
    CenteredRow.compose(&spec)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compose.rs"]
mod tests;
