use crate::{
    assets::{decode::PreparedImage, naming::BackgroundKey},
    config::EngineConfig,
    foundation::error::Diagnostic,
    glyph::resolver::GlyphResolver,
    layout::{
        compose::{Composite, LayoutSpec},
        strategy::Compositor,
    },
};

/// One produced image and the identifier it is published under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    pub id: String,
    /// Progressive step index; `None` for a single-shot render.
    pub step: Option<usize>,
    /// The text drawn on this image.
    pub text: String,
    pub background: BackgroundKey,
    pub image: Composite,
}

/// Resolve `text` glyph by glyph through `compositor` and composite the row onto `background`.
///
/// Size class and spacing follow `text.len()`. Characters without any variant are skipped and
/// reported; `None` means nothing at all could be drawn.
pub(crate) fn render_row<'a>(
    config: &EngineConfig,
    compositor: &dyn Compositor,
    resolver: &mut GlyphResolver<'a>,
    text: &[char],
    background: &'a PreparedImage,
    warnings: &mut Vec<Diagnostic>,
) -> Option<Composite> {
    let size = config.size_class_for(text.len());
    let spacing = config.spacing_for(text.len());

    let mut glyphs = Vec::with_capacity(text.len());
    for (i, &c) in text.iter().enumerate() {
        match compositor.select(resolver, i + 1, c, size) {
            Ok(img) => glyphs.push(img),
            Err(asset) => {
                warnings.push(Diagnostic::asset_missing(asset, "not loaded, skipped").logged());
            }
        }
    }

    compositor.compose(&LayoutSpec {
        background,
        glyphs,
        spacing,
        vertical_offset: config.vertical_offset,
    })
}
