use std::fmt;

use crate::glyph::key::{BaseSymbol, GlyphKey, PositionalKey, SizeClass};

const BACKGROUND_STEM: &str = "Background";
const FALLBACK_NAME: &str = "fallback";

/// Identity of a background canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackgroundKey {
    /// `Background.{ext}`: the single-shot canvas and the stand-in for absent lookahead backgrounds.
    Default,
    /// `Background_fallback.{ext}`: used only when `Default` is absent too.
    Fallback,
    /// `Background_hyphen.{ext}`.
    Hyphen,
    /// `Background_<C>.{ext}` for an uppercased character.
    Symbol(char),
}

impl BackgroundKey {
    /// Background that announces `next` as the upcoming character.
    pub fn for_next_char(next: char) -> Self {
        match BaseSymbol::from_char(next) {
            BaseSymbol::Hyphen => Self::Hyphen,
            BaseSymbol::Char(c) => Self::Symbol(c),
        }
    }

    pub fn file_stem(self) -> String {
        match self {
            Self::Default => BACKGROUND_STEM.to_string(),
            Self::Fallback => format!("{BACKGROUND_STEM}_{FALLBACK_NAME}"),
            Self::Hyphen => format!("{BACKGROUND_STEM}_{}", BaseSymbol::HYPHEN_NAME),
            Self::Symbol(c) => format!("{BACKGROUND_STEM}_{c}"),
        }
    }
}

impl fmt::Display for BackgroundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "background '{}'", self.file_stem())
    }
}

/// A glyph filename decoded into its structured identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedGlyph {
    pub key: GlyphKey,
    /// Embedded numeric suffix; `0` for the unsuffixed base variant.
    pub variant: u32,
}

/// Filename conventions shared by the loader and the validation report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingRules {
    pub small_suffix: String,
    /// Accepted image extensions, lowercase, without the dot. The first one is canonical.
    pub extensions: Vec<String>,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            small_suffix: "_small".to_string(),
            extensions: vec!["png".to_string()],
        }
    }
}

impl NamingRules {
    /// Return the stem when `file_name` carries an accepted image extension.
    pub fn image_stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
            .then_some(stem)
    }

    pub fn parse_background(&self, file_name: &str) -> Option<BackgroundKey> {
        let stem = self.image_stem(file_name)?;
        if stem == BACKGROUND_STEM {
            return Some(BackgroundKey::Default);
        }
        let rest = stem.strip_prefix(BACKGROUND_STEM)?.strip_prefix('_')?;
        if rest == BaseSymbol::HYPHEN_NAME {
            return Some(BackgroundKey::Hyphen);
        }
        if rest == FALLBACK_NAME {
            return Some(BackgroundKey::Fallback);
        }
        let c = single_char(rest)?;
        Some(BackgroundKey::for_next_char(c))
    }

    /// Parse `{symbol}{digits?}{small_suffix?}.{ext}`.
    ///
    /// A present size suffix forces [`SizeClass::Small`]; otherwise `folder_class` applies.
    pub fn parse_glyph(&self, file_name: &str, folder_class: SizeClass) -> Option<ParsedGlyph> {
        let stem = self.image_stem(file_name)?;

        let (stem, size) = match stem.strip_suffix(self.small_suffix.as_str()) {
            Some(s) if !self.small_suffix.is_empty() => (s, SizeClass::Small),
            _ => (stem, folder_class),
        };

        let base = stem.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &stem[base.len()..];
        let variant = if digits.is_empty() {
            0
        } else {
            digits.parse::<u32>().ok()?
        };

        let symbol = parse_symbol(base)?;
        Some(ParsedGlyph {
            key: GlyphKey::new(symbol, size),
            variant,
        })
    }

    /// Parse `{position}_{symbol}.{ext}`, the layer naming used by the stacked layout.
    ///
    /// Positions start at 1.
    pub fn parse_positional(&self, file_name: &str) -> Option<PositionalKey> {
        let stem = self.image_stem(file_name)?;
        let (digits, rest) = stem.split_once('_')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let position = digits.parse::<usize>().ok().filter(|p| *p >= 1)?;
        Some(PositionalKey::new(position, parse_symbol(rest)?))
    }

    /// Canonical filename for a background.
    pub fn background_file_name(&self, key: BackgroundKey) -> String {
        format!("{}.{}", key.file_stem(), self.canonical_ext())
    }

    /// Canonical filename for the base variant of a glyph.
    pub fn glyph_file_name(&self, key: GlyphKey) -> String {
        let suffix = match key.size {
            SizeClass::Normal => "",
            SizeClass::Small => self.small_suffix.as_str(),
        };
        format!(
            "{}{suffix}.{}",
            key.symbol.file_token(),
            self.canonical_ext()
        )
    }

    pub fn positional_file_name(&self, key: PositionalKey) -> String {
        format!(
            "{}_{}.{}",
            key.position,
            key.symbol.file_token(),
            self.canonical_ext()
        )
    }

    fn canonical_ext(&self) -> &str {
        self.extensions.first().map(String::as_str).unwrap_or("png")
    }
}

/// `hyphen` (any case) or a single character other than `-`.
fn parse_symbol(token: &str) -> Option<BaseSymbol> {
    if token.eq_ignore_ascii_case(BaseSymbol::HYPHEN_NAME) {
        return Some(BaseSymbol::Hyphen);
    }
    match single_char(token)? {
        '-' => None,
        c => Some(BaseSymbol::from_char(c)),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/naming.rs"]
mod tests;
