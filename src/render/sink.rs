use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{NameplateError, NameplateResult},
    layout::compose::Composite,
};

/// Receives finished images under their output identifiers.
///
/// Ordering contract: progressive steps arrive in ascending step order.
pub trait OutputSink: Send {
    fn write(&mut self, id: &str, image: &Composite) -> NameplateResult<()>;
}

/// In-memory sink for tests and hosts that stream bytes themselves.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) images: Vec<(String, Composite)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured images in write order.
    pub fn images(&self) -> &[(String, Composite)] {
        &self.images
    }

    pub fn get(&self, id: &str) -> Option<&Composite> {
        self.images
            .iter()
            .find_map(|(k, img)| (k == id).then_some(img))
    }
}

impl OutputSink for InMemorySink {
    fn write(&mut self, id: &str, image: &Composite) -> NameplateResult<()> {
        self.images.push((id.to_string(), image.clone()));
        Ok(())
    }
}

/// Writes each image as a PNG file named by its identifier inside `dir`.
#[derive(Clone, Debug)]
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for PngDirSink {
    fn write(&mut self, id: &str, image: &Composite) -> NameplateResult<()> {
        check_file_id(id)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;

        let path = self.dir.join(id);
        let bytes = image.encode_png()?;
        std::fs::write(&path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote output");
        Ok(())
    }
}

/// Identifiers become file names, so they must stay inside the output directory.
pub fn check_file_id(id: &str) -> NameplateResult<()> {
    if id.is_empty() {
        return Err(NameplateError::output("output id must be non-empty"));
    }
    if id.contains(['/', '\\']) {
        return Err(NameplateError::output(format!(
            "output id '{id}' must not contain path separators"
        )));
    }
    if id == "." || id == ".." {
        return Err(NameplateError::output(format!(
            "output id '{id}' is not a file name"
        )));
    }
    Ok(())
}
