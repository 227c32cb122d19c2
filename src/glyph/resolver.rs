use std::collections::HashMap;

use crate::{
    assets::{decode::PreparedImage, store::AssetStore},
    glyph::key::{BaseSymbol, GlyphKey, SizeClass},
};

/// Round-robin variant picker scoped to a single render call.
///
/// Cursors live here, not in the store, so two names rendered independently (or concurrently)
/// never observe each other's cycling state.
#[derive(Debug)]
pub struct GlyphResolver<'a> {
    store: &'a AssetStore,
    cursors: HashMap<GlyphKey, usize>,
}

impl<'a> GlyphResolver<'a> {
    pub fn new(store: &'a AssetStore) -> Self {
        Self {
            store,
            cursors: HashMap::new(),
        }
    }

    /// Next variant for `symbol` in `size`, wrapping after the last one.
    ///
    /// Returns `None` when no variant exists; the cursor is left untouched in that case.
    pub fn next_variant(&mut self, symbol: BaseSymbol, size: SizeClass) -> Option<&'a PreparedImage> {
        let store: &'a AssetStore = self.store;
        let variants = store.variants_for(symbol, size);
        if variants.is_empty() {
            return None;
        }
        let cursor = self.cursors.entry(GlyphKey::new(symbol, size)).or_insert(0);
        let chosen = &variants[*cursor % variants.len()];
        *cursor += 1;
        Some(&chosen.image)
    }

    /// Resolve a name character, mapping `-` to the hyphen glyph and uppercasing the rest.
    pub fn next_for_char(&mut self, c: char, size: SizeClass) -> Option<&'a PreparedImage> {
        self.next_variant(BaseSymbol::from_char(c), size)
    }

    /// Positional layer for the character at `position` (from 1). Layers have no variants.
    pub fn layer_for_char(&self, position: usize, c: char) -> Option<&'a PreparedImage> {
        let store: &'a AssetStore = self.store;
        store.layer_for(position, BaseSymbol::from_char(c))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/resolver.rs"]
mod tests;
