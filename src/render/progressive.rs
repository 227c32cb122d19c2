use crate::{
    assets::{naming::BackgroundKey, store::AssetStore},
    config::EngineConfig,
    foundation::error::Diagnostic,
    glyph::resolver::GlyphResolver,
    layout::strategy::Compositor,
    render::row::{RenderResult, render_row},
};

/// Letter-by-letter reveal: one image per proper prefix of a name.
#[derive(Debug)]
pub struct Sequencer<'a> {
    store: &'a AssetStore,
    config: &'a EngineConfig,
    compositor: &'a dyn Compositor,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        store: &'a AssetStore,
        config: &'a EngineConfig,
        compositor: &'a dyn Compositor,
    ) -> Self {
        Self {
            store,
            config,
            compositor,
        }
    }

    /// Steps `1..len` in order; step `i` shows the first `i` characters.
    ///
    /// The background of step `i` announces character `i` (the next one to appear). Each step
    /// sizes and spaces its glyphs by its own length. A step with nothing to draw is skipped and
    /// reported without stopping the sequence. Names shorter than two characters yield nothing.
    pub fn run(&self, name: &str) -> (Vec<RenderResult>, Vec<Diagnostic>) {
        let chars: Vec<char> = name.chars().collect();
        let mut steps = Vec::new();
        let mut warnings = Vec::new();
        if chars.len() < 2 {
            return (steps, warnings);
        }

        // One resolver for the whole name: repeated letters keep cycling across steps.
        let mut resolver = GlyphResolver::new(self.store);

        for step in 1..chars.len() {
            let text = &chars[..step];
            let wanted = BackgroundKey::for_next_char(chars[step]);
            let Some((used, background)) = self.store.background_or_fallback(wanted) else {
                warnings.push(
                    Diagnostic::asset_missing(
                        wanted.to_string(),
                        format!("no default or fallback background, step {step} skipped"),
                    )
                    .logged(),
                );
                continue;
            };
            if used != wanted {
                tracing::debug!(step, wanted = %wanted, used = %used, "lookahead background fell back");
            }

            let Some(image) = render_row(
                self.config,
                self.compositor,
                &mut resolver,
                text,
                background,
                &mut warnings,
            ) else {
                let prefix: String = text.iter().collect();
                warnings.push(Diagnostic::no_renderable_content(prefix).logged());
                continue;
            };

            steps.push(RenderResult {
                id: self.config.output.step_id(name, step),
                step: Some(step),
                text: text.iter().collect(),
                background: used,
                image,
            });
        }

        (steps, warnings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progressive.rs"]
mod tests;
