use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::{naming::NamingRules, store::AssetPaths},
    foundation::error::{Diagnostic, NameplateError, NameplateResult},
    glyph::key::{SizeClass, SizeClassRule},
    layout::strategy::LayoutMode,
};

pub const DEFAULT_SPACING_PX: i64 = 20;

/// Layer folder assumed by the stacked layout when `paths.glyphs_positional` is absent.
pub const DEFAULT_POSITIONAL_DIR: &str = "assets/positional";

/// Serialized configuration. Every field is optional; see [`EngineConfig::from_file`].
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsFile>,
    pub spacing_per_length: Option<BTreeMap<String, i64>>,
    pub default_spacing: Option<i64>,
    pub small_suffix: Option<String>,
    pub vertical_offset: Option<i64>,
    /// Inclusive `[min, max]` name length rendered with small glyphs.
    pub small_lengths: Option<[usize; 2]>,
    pub layout: Option<LayoutMode>,
    pub output: Option<OutputFile>,
    pub image_extensions: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct PathsFile {
    pub backgrounds: Option<PathBuf>,
    pub glyphs_normal: Option<PathBuf>,
    pub glyphs_small: Option<PathBuf>,
    pub glyphs_positional: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct OutputFile {
    pub single_prefix: Option<String>,
    pub progressive_prefix: Option<String>,
    pub extension: Option<String>,
}

/// Deterministic output identifiers: `{prefix}_{name}[_step{n}].{ext}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    pub single_prefix: String,
    pub progressive_prefix: String,
    pub extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            single_prefix: "Background".to_string(),
            progressive_prefix: "Progressive".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl OutputNaming {
    pub fn single_id(&self, name: &str) -> String {
        format!("{}_{name}.{}", self.single_prefix, self.extension)
    }

    pub fn step_id(&self, name: &str, step: usize) -> String {
        format!(
            "{}_{name}_step{step}.{}",
            self.progressive_prefix, self.extension
        )
    }
}

/// Resolved engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub paths: AssetPaths,
    /// Where hosts persist rendered images. The engine itself never writes here.
    pub output_dir: PathBuf,
    /// Per-length spacing overrides, keyed by the decimal length.
    pub spacing_per_length: BTreeMap<String, i64>,
    pub default_spacing: i64,
    pub vertical_offset: i64,
    pub size_rule: SizeClassRule,
    pub layout: LayoutMode,
    pub naming: NamingRules,
    pub output: OutputNaming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            paths: AssetPaths::default(),
            output_dir: PathBuf::from("generated-preview"),
            spacing_per_length: BTreeMap::new(),
            default_spacing: DEFAULT_SPACING_PX,
            vertical_offset: 0,
            size_rule: SizeClassRule::default(),
            layout: LayoutMode::default(),
            naming: NamingRules::default(),
            output: OutputNaming::default(),
        }
    }
}

impl EngineConfig {
    /// Spacing for a row of `len` glyphs: the table entry if present, else the default.
    pub fn spacing_for(&self, len: usize) -> i64 {
        self.spacing_per_length
            .get(&len.to_string())
            .copied()
            .unwrap_or(self.default_spacing)
    }

    pub fn size_class_for(&self, len: usize) -> SizeClass {
        self.size_rule.classify(len)
    }

    pub fn from_json_str(s: &str) -> NameplateResult<(Self, Vec<Diagnostic>)> {
        let file: ConfigFile = serde_json::from_str(s).context("parse config JSON")?;
        Self::from_file(file)
    }

    pub fn from_path(path: &Path) -> NameplateResult<(Self, Vec<Diagnostic>)> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Fill absent entries with defaults.
    ///
    /// Missing asset paths, spacing table and default spacing are reported as
    /// [`Diagnostic::ConfigIncomplete`]. Only contradictory values are errors.
    pub fn from_file(file: ConfigFile) -> NameplateResult<(Self, Vec<Diagnostic>)> {
        let defaults = Self::default();
        let mut warnings = Vec::new();
        let mut incomplete = |field: &str, fallback: String| {
            warnings.push(Diagnostic::config_incomplete(field, fallback).logged());
        };

        let layout = file.layout.unwrap_or(defaults.layout);
        let paths_file = file.paths.unwrap_or_default();
        let mut path_or_default = |value: Option<PathBuf>, field: &str, fallback: &Path| {
            value.unwrap_or_else(|| {
                incomplete(field, format!("'{}'", fallback.display()));
                fallback.to_path_buf()
            })
        };
        let paths = AssetPaths {
            backgrounds: path_or_default(
                paths_file.backgrounds,
                "paths.backgrounds",
                &defaults.paths.backgrounds,
            ),
            glyphs_normal: path_or_default(
                paths_file.glyphs_normal,
                "paths.glyphs_normal",
                &defaults.paths.glyphs_normal,
            ),
            glyphs_small: path_or_default(
                paths_file.glyphs_small,
                "paths.glyphs_small",
                &defaults.paths.glyphs_small,
            ),
            // Only the stacked layout needs layers; other layouts scan them when named.
            glyphs_positional: match (paths_file.glyphs_positional, layout) {
                (None, LayoutMode::Stacked) => Some(path_or_default(
                    None,
                    "paths.glyphs_positional",
                    Path::new(DEFAULT_POSITIONAL_DIR),
                )),
                (dir, _) => dir,
            },
        };

        let spacing_per_length = file.spacing_per_length.unwrap_or_else(|| {
            incomplete("spacing_per_length", "an empty table".to_string());
            BTreeMap::new()
        });
        let default_spacing = file.default_spacing.unwrap_or_else(|| {
            incomplete("default_spacing", format!("{DEFAULT_SPACING_PX}px"));
            DEFAULT_SPACING_PX
        });

        let size_rule = match file.small_lengths {
            Some([small_min, small_max]) if small_min > small_max => {
                return Err(NameplateError::config(format!(
                    "small_lengths [{small_min}, {small_max}] is an empty range"
                )));
            }
            Some([small_min, small_max]) => SizeClassRule {
                small_min,
                small_max,
            },
            None => defaults.size_rule,
        };

        let extensions = match file.image_extensions {
            Some(exts) if exts.is_empty() => {
                return Err(NameplateError::config("image_extensions must not be empty"));
            }
            Some(exts) => exts
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            None => defaults.naming.extensions,
        };

        let output_file = file.output.unwrap_or_default();
        let output = OutputNaming {
            single_prefix: output_file
                .single_prefix
                .unwrap_or(defaults.output.single_prefix),
            progressive_prefix: output_file
                .progressive_prefix
                .unwrap_or(defaults.output.progressive_prefix),
            extension: output_file.extension.unwrap_or(defaults.output.extension),
        };

        let config = Self {
            paths,
            output_dir: paths_file.output.unwrap_or(defaults.output_dir),
            spacing_per_length,
            default_spacing,
            vertical_offset: file.vertical_offset.unwrap_or(defaults.vertical_offset),
            size_rule,
            layout,
            naming: NamingRules {
                small_suffix: file.small_suffix.unwrap_or(defaults.naming.small_suffix),
                extensions,
            },
            output,
        };
        Ok((config, warnings))
    }
}
