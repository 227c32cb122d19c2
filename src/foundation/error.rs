pub type NameplateResult<T> = Result<T, NameplateError>;

/// Hard failures: the caller asked for something that cannot be done at all.
///
/// Recoverable engine conditions (missing assets, empty names, incomplete config) are reported as
/// [`Diagnostic`] values instead and never surface through this type.
#[derive(thiserror::Error, Debug)]
pub enum NameplateError {
    #[error("config error: {0}")]
    Config(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("output error: {0}")]
    Output(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NameplateError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Non-fatal condition collected during loading or rendering.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A background or glyph file is absent or could not be decoded.
    #[error("asset missing: {asset} ({detail})")]
    AssetMissing { asset: String, detail: String },

    /// Nothing could be composited for `subject`.
    #[error("no renderable content for '{subject}'")]
    NoRenderableContent { subject: String },

    /// A configuration entry was absent and a default was substituted.
    #[error("config incomplete: '{field}' missing, using {fallback}")]
    ConfigIncomplete { field: String, fallback: String },
}

impl Diagnostic {
    pub fn asset_missing(asset: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AssetMissing {
            asset: asset.into(),
            detail: detail.into(),
        }
    }

    pub fn no_renderable_content(subject: impl Into<String>) -> Self {
        Self::NoRenderableContent {
            subject: subject.into(),
        }
    }

    pub fn config_incomplete(field: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self::ConfigIncomplete {
            field: field.into(),
            fallback: fallback.into(),
        }
    }

    /// Log through `tracing` and hand the diagnostic back for collection.
    pub(crate) fn logged(self) -> Self {
        tracing::warn!("{self}");
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
