use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    assets::{
        decode::{PreparedImage, decode_image},
        naming::{BackgroundKey, NamingRules},
        source::AssetSource,
    },
    foundation::error::Diagnostic,
    glyph::key::{BaseSymbol, GlyphKey, PositionalKey, SizeClass},
};

/// Folders scanned by [`AssetStore::load`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    pub backgrounds: PathBuf,
    pub glyphs_normal: PathBuf,
    pub glyphs_small: PathBuf,
    /// Canvas-sized `{position}_{symbol}` layers for the stacked layout; not scanned when `None`.
    pub glyphs_positional: Option<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            backgrounds: PathBuf::from("assets/backgrounds"),
            glyphs_normal: PathBuf::from("assets/letters"),
            glyphs_small: PathBuf::from("assets/letters_small"),
            glyphs_positional: None,
        }
    }
}

/// One alternate image for a glyph.
#[derive(Clone, Debug)]
pub struct GlyphVariant {
    /// Numeric suffix from the filename; `0` for the base variant.
    pub variant: u32,
    pub file_name: String,
    pub image: PreparedImage,
}

/// Immutable index of backgrounds and glyph variants.
///
/// Built once from an [`AssetSource`]; nothing reads from the source afterwards. Shared by
/// reference between render calls; compositing always copies a background before drawing on it.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    backgrounds: HashMap<BackgroundKey, PreparedImage>,
    glyphs: HashMap<GlyphKey, Vec<GlyphVariant>>,
    layers: HashMap<PositionalKey, PreparedImage>,
    total_loaded: usize,
}

impl AssetStore {
    /// Scan `paths` and decode every recognized image.
    ///
    /// Missing folders and unreadable files are skipped and reported as
    /// [`Diagnostic::AssetMissing`]; loading itself never fails.
    #[tracing::instrument(skip_all)]
    pub fn load(
        paths: &AssetPaths,
        source: &dyn AssetSource,
        naming: &NamingRules,
    ) -> (Self, Vec<Diagnostic>) {
        let mut store = Self::default();
        let mut warnings = Vec::new();

        store.load_backgrounds(&paths.backgrounds, source, naming, &mut warnings);
        store.load_glyph_folder(
            &paths.glyphs_normal,
            SizeClass::Normal,
            source,
            naming,
            &mut warnings,
        );
        // One shared folder holds both sets, told apart by the size suffix.
        if paths.glyphs_small != paths.glyphs_normal {
            store.load_glyph_folder(
                &paths.glyphs_small,
                SizeClass::Small,
                source,
                naming,
                &mut warnings,
            );
        }

        if let Some(dir) = &paths.glyphs_positional {
            store.load_layers(dir, source, naming, &mut warnings);
        }

        for variants in store.glyphs.values_mut() {
            variants.sort_by(|a, b| {
                a.variant
                    .cmp(&b.variant)
                    .then_with(|| a.file_name.cmp(&b.file_name))
            });
        }

        tracing::info!(
            backgrounds = store.backgrounds.len(),
            glyph_keys = store.glyphs.len(),
            layers = store.layers.len(),
            total = store.total_loaded,
            "asset store loaded"
        );
        (store, warnings)
    }

    pub fn background_for(&self, key: BackgroundKey) -> Option<&PreparedImage> {
        self.backgrounds.get(&key)
    }

    /// Look up `preferred`, then the default background, then the fallback background.
    ///
    /// `Background_fallback` only answers when `Background` itself is absent. Returns the key
    /// that was actually used.
    pub fn background_or_fallback(
        &self,
        preferred: BackgroundKey,
    ) -> Option<(BackgroundKey, &PreparedImage)> {
        [preferred, BackgroundKey::Default, BackgroundKey::Fallback]
            .into_iter()
            .find_map(|key| self.background_for(key).map(|img| (key, img)))
    }

    /// Variants for `symbol` in `size`, ordered by ascending numeric suffix.
    pub fn variants_for(&self, symbol: BaseSymbol, size: SizeClass) -> &[GlyphVariant] {
        self.glyphs
            .get(&GlyphKey::new(symbol, size))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Positional layer for `symbol` at `position`.
    pub fn layer_for(&self, position: usize, symbol: BaseSymbol) -> Option<&PreparedImage> {
        self.layers.get(&PositionalKey::new(position, symbol))
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of images decoded during [`AssetStore::load`].
    pub fn total_loaded(&self) -> usize {
        self.total_loaded
    }

    pub fn background_count(&self) -> usize {
        self.backgrounds.len()
    }

    fn load_backgrounds(
        &mut self,
        dir: &Path,
        source: &dyn AssetSource,
        naming: &NamingRules,
        warnings: &mut Vec<Diagnostic>,
    ) {
        let Some(files) = list_folder(dir, source, warnings) else {
            return;
        };
        for file_name in files {
            let Some(key) = naming.parse_background(&file_name) else {
                tracing::debug!(file = %file_name, "not a background name, skipped");
                continue;
            };
            if let Some(image) = read_image(dir, &file_name, source, warnings) {
                self.backgrounds.insert(key, image);
                self.total_loaded += 1;
            }
        }
    }

    fn load_glyph_folder(
        &mut self,
        dir: &Path,
        folder_class: SizeClass,
        source: &dyn AssetSource,
        naming: &NamingRules,
        warnings: &mut Vec<Diagnostic>,
    ) {
        let Some(files) = list_folder(dir, source, warnings) else {
            return;
        };
        for file_name in files {
            let Some(parsed) = naming.parse_glyph(&file_name, folder_class) else {
                tracing::debug!(file = %file_name, "not a glyph name, skipped");
                continue;
            };
            if let Some(image) = read_image(dir, &file_name, source, warnings) {
                self.glyphs.entry(parsed.key).or_default().push(GlyphVariant {
                    variant: parsed.variant,
                    file_name,
                    image,
                });
                self.total_loaded += 1;
            }
        }
    }

    fn load_layers(
        &mut self,
        dir: &Path,
        source: &dyn AssetSource,
        naming: &NamingRules,
        warnings: &mut Vec<Diagnostic>,
    ) {
        let Some(files) = list_folder(dir, source, warnings) else {
            return;
        };
        for file_name in files {
            let Some(key) = naming.parse_positional(&file_name) else {
                tracing::debug!(file = %file_name, "not a positional layer name, skipped");
                continue;
            };
            if let Some(image) = read_image(dir, &file_name, source, warnings) {
                self.layers.insert(key, image);
                self.total_loaded += 1;
            }
        }
    }
}

fn list_folder(
    dir: &Path,
    source: &dyn AssetSource,
    warnings: &mut Vec<Diagnostic>,
) -> Option<Vec<String>> {
    match source.list(dir) {
        Ok(files) => Some(files),
        Err(e) => {
            warnings.push(
                Diagnostic::asset_missing(format!("folder '{}'", dir.display()), e.to_string())
                    .logged(),
            );
            None
        }
    }
}

fn read_image(
    dir: &Path,
    file_name: &str,
    source: &dyn AssetSource,
    warnings: &mut Vec<Diagnostic>,
) -> Option<PreparedImage> {
    match source.read(dir, file_name).and_then(|bytes| decode_image(&bytes)) {
        Ok(image) => Some(image),
        Err(e) => {
            warnings.push(Diagnostic::asset_missing(file_name, format!("{e:#}")).logged());
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
