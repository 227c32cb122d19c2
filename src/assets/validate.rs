use crate::{
    assets::{naming::BackgroundKey, naming::NamingRules, store::AssetStore},
    foundation::error::Diagnostic,
    glyph::key::{BaseSymbol, GlyphKey, SizeClass},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    LetterBackgrounds,
    FallbackBackground,
    HyphenBackground,
    DefaultBackground,
    NormalLetters,
    SmallLetters,
    SmallHyphen,
}

/// Expected-versus-found count for one asset group. Informational only.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationFinding {
    pub check: ValidationCheck,
    pub expected: usize,
    pub found: usize,
    pub satisfied: bool,
    /// Canonical filenames that were not found.
    pub missing: Vec<String>,
}

/// Outcome of warming the asset cache.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CacheReport {
    pub total_assets_loaded: usize,
    pub findings: Vec<ValidationFinding>,
    /// Assets that could not be loaded.
    pub load_warnings: Vec<Diagnostic>,
}

impl CacheReport {
    pub fn all_satisfied(&self) -> bool {
        self.findings.iter().all(|f| f.satisfied)
    }
}

fn latin_letters() -> impl Iterator<Item = char> {
    'A'..='Z'
}

/// Check the store against the asset set a complete theme ships with.
pub fn validate(store: &AssetStore, naming: &NamingRules) -> Vec<ValidationFinding> {
    let background = |keys: Vec<BackgroundKey>, check| {
        let missing = keys
            .iter()
            .filter(|k| store.background_for(**k).is_none())
            .map(|k| naming.background_file_name(*k))
            .collect();
        finding(check, keys.len(), missing)
    };
    let glyphs = |keys: Vec<GlyphKey>, check| {
        let missing = keys
            .iter()
            .filter(|k| store.variants_for(k.symbol, k.size).is_empty())
            .map(|k| naming.glyph_file_name(*k))
            .collect();
        finding(check, keys.len(), missing)
    };
    let letters = |size| {
        latin_letters()
            .map(|c| GlyphKey::new(BaseSymbol::Char(c), size))
            .collect::<Vec<_>>()
    };

    vec![
        background(
            latin_letters().map(BackgroundKey::Symbol).collect(),
            ValidationCheck::LetterBackgrounds,
        ),
        background(
            vec![BackgroundKey::Fallback],
            ValidationCheck::FallbackBackground,
        ),
        background(vec![BackgroundKey::Hyphen], ValidationCheck::HyphenBackground),
        background(vec![BackgroundKey::Default], ValidationCheck::DefaultBackground),
        glyphs(letters(SizeClass::Normal), ValidationCheck::NormalLetters),
        glyphs(letters(SizeClass::Small), ValidationCheck::SmallLetters),
        glyphs(
            vec![GlyphKey::new(BaseSymbol::Hyphen, SizeClass::Small)],
            ValidationCheck::SmallHyphen,
        ),
    ]
}

fn finding(check: ValidationCheck, expected: usize, missing: Vec<String>) -> ValidationFinding {
    let found = expected - missing.len();
    ValidationFinding {
        check,
        expected,
        found,
        satisfied: missing.is_empty(),
        missing,
    }
}
