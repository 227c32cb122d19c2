use std::fmt;

/// Canonical identity of a glyph, independent of variant number and size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum BaseSymbol {
    /// An uppercased character.
    Char(char),
    /// A literal `-`, stored under the symbolic name `hyphen`.
    Hyphen,
}

impl BaseSymbol {
    pub const HYPHEN_NAME: &'static str = "hyphen";

    /// Map a name character to its glyph identity.
    ///
    /// `-` becomes [`BaseSymbol::Hyphen`]. Other characters are uppercased, except ones whose
    /// uppercase form is more than one character (e.g. `ß`), which are kept unchanged.
    pub fn from_char(c: char) -> Self {
        if c == '-' {
            return Self::Hyphen;
        }
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => Self::Char(u),
            _ => Self::Char(c),
        }
    }

    /// Token used in asset filenames.
    pub fn file_token(self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Hyphen => Self::HYPHEN_NAME.to_string(),
        }
    }
}

impl fmt::Display for BaseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Hyphen => f.write_str("hyphen"),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize,
)]
pub enum SizeClass {
    #[default]
    Normal,
    Small,
}

impl SizeClass {
    /// Size class for a name (or prefix) of `len` characters under the default rule.
    pub fn for_length(len: usize) -> Self {
        SizeClassRule::default().classify(len)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Small => "small",
        })
    }
}

/// Inclusive length range that switches rendering to [`SizeClass::Small`].
///
/// Lengths outside the range (including very short and very long names) use `Normal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeClassRule {
    pub small_min: usize,
    pub small_max: usize,
}

impl Default for SizeClassRule {
    fn default() -> Self {
        Self {
            small_min: 8,
            small_max: 12,
        }
    }
}

impl SizeClassRule {
    pub fn classify(&self, len: usize) -> SizeClass {
        if (self.small_min..=self.small_max).contains(&len) {
            SizeClass::Small
        } else {
            SizeClass::Normal
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphKey {
    pub symbol: BaseSymbol,
    pub size: SizeClass,
}

impl GlyphKey {
    pub fn new(symbol: BaseSymbol, size: SizeClass) -> Self {
        Self { symbol, size }
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glyph {} ({})", self.symbol, self.size)
    }
}

/// A canvas-sized layer drawn for `symbol` when it sits at `position` (counted from 1) in the
/// name. The artwork carries its own placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionalKey {
    pub position: usize,
    pub symbol: BaseSymbol,
}

impl PositionalKey {
    pub fn new(position: usize, symbol: BaseSymbol) -> Self {
        Self { position, symbol }
    }
}

impl fmt::Display for PositionalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {} at position {}", self.symbol, self.position)
    }
}
