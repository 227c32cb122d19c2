use std::sync::OnceLock;

use crate::{
    assets::{
        naming::BackgroundKey,
        source::{AssetSource, FsSource},
        store::AssetStore,
        validate::{CacheReport, validate},
    },
    config::EngineConfig,
    foundation::error::{Diagnostic, NameplateResult},
    glyph::resolver::GlyphResolver,
    layout::strategy::Compositor,
    render::{
        progressive::Sequencer,
        row::{RenderResult, render_row},
        sink::OutputSink,
    },
};

/// Result of [`Engine::render_single`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SingleRender {
    /// Identifier handed to the sink; `None` when nothing was produced.
    pub output: Option<String>,
    pub warnings: Vec<Diagnostic>,
}

/// Result of [`Engine::render_progressive`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProgressiveRender {
    /// Identifiers handed to the sink, in step order.
    pub outputs: Vec<String>,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug)]
struct Warmed {
    store: AssetStore,
    report: CacheReport,
}

/// Glyph compositing engine.
///
/// Owns the configuration, the raw asset source and the compositor chosen from
/// [`EngineConfig::layout`]. The asset store is built from the source at most once (explicitly via
/// [`Engine::warm_cache`] or lazily on first render) and then shared read-only, so an `Engine` can
/// be used from many threads at once. Each render call gets its own glyph resolver.
#[derive(Debug)]
pub struct Engine<S: AssetSource = FsSource> {
    config: EngineConfig,
    source: S,
    compositor: Box<dyn Compositor>,
    warm: OnceLock<Warmed>,
}

impl<S: AssetSource> Engine<S> {
    pub fn new(config: EngineConfig, source: S) -> Self {
        let compositor = config.layout.compositor();
        tracing::debug!(layout = compositor.name(), "engine configured");
        Self {
            config,
            source,
            compositor,
            warm: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compositor(&self) -> &dyn Compositor {
        self.compositor.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load and validate every asset. Later calls return the first report without loading again.
    pub fn warm_cache(&self) -> &CacheReport {
        if let Some(w) = self.warm.get() {
            tracing::debug!("asset cache already initialized");
            return &w.report;
        }
        &self.warmed().report
    }

    /// The warmed asset store.
    pub fn store(&self) -> &AssetStore {
        &self.warmed().store
    }

    fn warmed(&self) -> &Warmed {
        self.warm.get_or_init(|| {
            tracing::info!("initializing asset cache");
            let (store, load_warnings) =
                AssetStore::load(&self.config.paths, &self.source, &self.config.naming);
            let findings = validate(&store, &self.config.naming);
            for f in findings.iter().filter(|f| !f.satisfied) {
                tracing::warn!(
                    check = ?f.check,
                    expected = f.expected,
                    found = f.found,
                    "asset validation unsatisfied"
                );
            }
            let report = CacheReport {
                total_assets_loaded: store.total_loaded(),
                findings,
                load_warnings,
            };
            tracing::info!(total = report.total_assets_loaded, "asset cache ready");
            Warmed { store, report }
        })
    }

    /// Composite the whole name onto the default background without publishing it.
    pub fn compose_single(&self, name: &str) -> (Option<RenderResult>, Vec<Diagnostic>) {
        let mut warnings = Vec::new();
        let chars: Vec<char> = name.chars().collect();
        if chars.is_empty() {
            warnings.push(Diagnostic::no_renderable_content(name).logged());
            return (None, warnings);
        }

        let store = self.store();
        let Some((used, background)) = store.background_or_fallback(BackgroundKey::Default)
        else {
            warnings.push(
                Diagnostic::asset_missing(
                    BackgroundKey::Default.to_string(),
                    "no default or fallback background",
                )
                .logged(),
            );
            return (None, warnings);
        };

        let mut resolver = GlyphResolver::new(store);
        let image = render_row(
            &self.config,
            self.compositor(),
            &mut resolver,
            &chars,
            background,
            &mut warnings,
        );
        let Some(image) = image else {
            warnings.push(Diagnostic::no_renderable_content(name).logged());
            return (None, warnings);
        };

        let result = RenderResult {
            id: self.config.output.single_id(name),
            step: None,
            text: name.to_string(),
            background: used,
            image,
        };
        (Some(result), warnings)
    }

    /// All progressive steps for `name` without publishing them.
    pub fn sequence(&self, name: &str) -> (Vec<RenderResult>, Vec<Diagnostic>) {
        Sequencer::new(self.store(), &self.config, self.compositor()).run(name)
    }

    /// Render `name` once and hand the image to `sink`.
    ///
    /// Engine conditions come back as warnings; only sink failures are errors.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_single(
        &self,
        name: &str,
        sink: &mut dyn OutputSink,
    ) -> NameplateResult<SingleRender> {
        let (result, warnings) = self.compose_single(name);
        let output = match result {
            Some(r) => {
                sink.write(&r.id, &r.image)?;
                Some(r.id)
            }
            None => None,
        };
        Ok(SingleRender { output, warnings })
    }

    /// Render every progressive step of `name` and hand each image to `sink` in step order.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_progressive(
        &self,
        name: &str,
        sink: &mut dyn OutputSink,
    ) -> NameplateResult<ProgressiveRender> {
        let (steps, warnings) = self.sequence(name);
        let mut outputs = Vec::with_capacity(steps.len());
        for step in steps {
            sink.write(&step.id, &step.image)?;
            outputs.push(step.id);
        }
        Ok(ProgressiveRender { outputs, warnings })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
