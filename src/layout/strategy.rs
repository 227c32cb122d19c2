use std::fmt;

use crate::{
    assets::decode::PreparedImage,
    glyph::{
        key::{BaseSymbol, GlyphKey, PositionalKey, SizeClass},
        resolver::GlyphResolver,
    },
    layout::compose::{Composite, LayoutSpec},
};

/// Placement strategy, chosen once when the engine is configured.
pub trait Compositor: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Artwork for `c`, the character at `position` (counted from 1) in a row of `size` glyphs.
    ///
    /// `Err` describes the asset that was looked for and not found.
    fn select<'a>(
        &self,
        resolver: &mut GlyphResolver<'a>,
        position: usize,
        c: char,
        size: SizeClass,
    ) -> Result<&'a PreparedImage, String>;

    /// Draw `spec` onto a copy of its background. `None` means no renderable content.
    fn compose(&self, spec: &LayoutSpec<'_>) -> Option<Composite>;
}

/// Glyphs side by side, horizontally centered, separated by `spacing`.
///
/// Repeated letters cycle through their variants.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenteredRow;

impl Compositor for CenteredRow {
    fn name(&self) -> &'static str {
        "centered_row"
    }

    fn select<'a>(
        &self,
        resolver: &mut GlyphResolver<'a>,
        _position: usize,
        c: char,
        size: SizeClass,
    ) -> Result<&'a PreparedImage, String> {
        resolver
            .next_for_char(c, size)
            .ok_or_else(|| GlyphKey::new(BaseSymbol::from_char(c), size).to_string())
    }

    fn compose(&self, spec: &LayoutSpec<'_>) -> Option<Composite> {
        if spec.glyphs.is_empty() {
            return None;
        }
        let mut canvas = Composite::from_background(spec.background);
        for (glyph, (x, y)) in spec.glyphs.iter().zip(spec.placements()) {
            canvas.draw_over(glyph, x, y);
        }
        Some(canvas)
    }
}

/// Canvas-sized `{position}_{symbol}` layers whose placement is baked into the artwork.
///
/// Each layer lands at `(0, vertical_offset)`; spacing and size class are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stacked;

impl Compositor for Stacked {
    fn name(&self) -> &'static str {
        "stacked"
    }

    fn select<'a>(
        &self,
        resolver: &mut GlyphResolver<'a>,
        position: usize,
        c: char,
        _size: SizeClass,
    ) -> Result<&'a PreparedImage, String> {
        resolver
            .layer_for_char(position, c)
            .ok_or_else(|| PositionalKey::new(position, BaseSymbol::from_char(c)).to_string())
    }

    fn compose(&self, spec: &LayoutSpec<'_>) -> Option<Composite> {
        if spec.glyphs.is_empty() {
            return None;
        }
        let mut canvas = Composite::from_background(spec.background);
        for glyph in &spec.glyphs {
            canvas.draw_over(glyph, 0, spec.vertical_offset);
        }
        Some(canvas)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    CenteredRow,
    Stacked,
}

impl LayoutMode {
    pub fn compositor(self) -> Box<dyn Compositor> {
        match self {
            Self::CenteredRow => Box::new(CenteredRow),
            Self::Stacked => Box::new(Stacked),
        }
    }
}
