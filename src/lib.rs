//! Nameplate renders personalized name images by compositing per-character glyph artwork onto a
//! background canvas.
//!
//! The public API is engine-oriented:
//!
//! - Build an [`EngineConfig`] (usually from a JSON file)
//! - Create an [`Engine`] over an [`AssetSource`]
//! - Render a name once with [`Engine::render_single`], or as a letter-by-letter reveal with
//!   [`Engine::render_progressive`], handing images to an [`OutputSink`]
//!
//! Missing assets, empty names and incomplete configuration never fail a render: they come back
//! as [`Diagnostic`] warnings next to whatever could be produced.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod config;
pub mod glyph;
pub mod layout;
pub mod render;

pub use crate::foundation::error::{Diagnostic, NameplateError, NameplateResult};

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::naming::{BackgroundKey, NamingRules};
pub use crate::assets::source::{AssetSource, FsSource, MemorySource};
pub use crate::assets::store::{AssetPaths, AssetStore, GlyphVariant};
pub use crate::assets::validate::{CacheReport, ValidationCheck, ValidationFinding};
pub use crate::config::{EngineConfig, OutputNaming};
pub use crate::glyph::key::{BaseSymbol, GlyphKey, PositionalKey, SizeClass, SizeClassRule};
pub use crate::glyph::resolver::GlyphResolver;
pub use crate::layout::compose::{Composite, LayoutSpec, compose};
pub use crate::layout::strategy::{CenteredRow, Compositor, LayoutMode, Stacked};
pub use crate::render::engine::{Engine, ProgressiveRender, SingleRender};
pub use crate::render::row::RenderResult;
pub use crate::render::sink::{InMemorySink, OutputSink, PngDirSink};
