use std::{
    collections::BTreeMap,
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{NameplateError, NameplateResult};

/// Raw asset provider consulted once, while the asset store is loading.
pub trait AssetSource: Send + Sync {
    /// File names directly inside `dir`, in ascending order.
    fn list(&self, dir: &Path) -> NameplateResult<Vec<String>>;

    /// Encoded bytes of `dir/file_name`.
    fn read(&self, dir: &Path, file_name: &str) -> NameplateResult<Vec<u8>>;
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn list(&self, dir: &Path) -> NameplateResult<Vec<String>> {
        (**self).list(dir)
    }

    fn read(&self, dir: &Path, file_name: &str) -> NameplateResult<Vec<u8>> {
        (**self).read(dir, file_name)
    }
}

/// Filesystem source. Relative folders resolve against `root`.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsSource {
    fn list(&self, dir: &Path) -> NameplateResult<Vec<String>> {
        let path = self.root.join(dir);
        let rd = std::fs::read_dir(&path)
            .with_context(|| format!("list asset folder '{}'", path.display()))?;

        let mut out = Vec::new();
        for entry in rd.flatten() {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                out.push(name);
            }
        }
        out.sort();
        Ok(out)
    }

    fn read(&self, dir: &Path, file_name: &str) -> NameplateResult<Vec<u8>> {
        let path = self.root.join(dir).join(file_name);
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(NameplateError::from)
    }
}

/// In-memory source for tests and embedding hosts.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    folders: BTreeMap<PathBuf, BTreeMap<String, Vec<u8>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty folder so that listing it succeeds.
    pub fn add_folder(&mut self, dir: impl Into<PathBuf>) {
        self.folders.entry(dir.into()).or_default();
    }

    pub fn insert(&mut self, dir: impl Into<PathBuf>, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.folders
            .entry(dir.into())
            .or_default()
            .insert(file_name.into(), bytes);
    }

    /// Encode `img` as PNG and register it.
    pub fn insert_png(
        &mut self,
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        img: &image::RgbaImage,
    ) -> NameplateResult<()> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png for memory source")?;
        self.insert(dir, file_name, buf);
        Ok(())
    }
}

impl AssetSource for MemorySource {
    fn list(&self, dir: &Path) -> NameplateResult<Vec<String>> {
        self.folders
            .get(dir)
            .map(|files| files.keys().cloned().collect())
            .ok_or_else(|| NameplateError::asset(format!("no such folder '{}'", dir.display())))
    }

    fn read(&self, dir: &Path, file_name: &str) -> NameplateResult<Vec<u8>> {
        self.folders
            .get(dir)
            .and_then(|files| files.get(file_name))
            .cloned()
            .ok_or_else(|| {
                NameplateError::asset(format!(
                    "no such file '{}'",
                    dir.join(file_name).display()
                ))
            })
    }
}
