//! Output directories holding exported bundle resource files

use crate::export::ExportError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of exported resource files
pub const RESOURCE_FILE_EXTENSION: &str = "yml";

/// A directory of `<key>.yml` resource files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDir {
    path: PathBuf,
}

impl BundleDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the file a resource key is written to
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.path.join(format!("{}.{}", key, RESOURCE_FILE_EXTENSION))
    }

    /// Remove every file in the directory, whatever its content or name
    ///
    /// Subdirectories are left alone. A missing directory counts as empty.
    pub fn clear(&self) -> Result<usize, ExportError> {
        Ok(self.remove_files(|_| true)?.len())
    }

    /// Remove every file except the one named `keep`
    pub fn prune_except(&self, keep: &str) -> Result<Vec<PathBuf>, ExportError> {
        self.remove_files(|name| name != keep)
    }

    /// Write a resource file, creating the directory if needed
    pub fn write(&self, key: &str, content: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.path).map_err(|e| ExportError::io(&self.path, e))?;

        let file_path = self.file_path(key);
        std::fs::write(&file_path, content).map_err(|e| ExportError::io(&file_path, e))?;
        debug!("Wrote {}", file_path.display());

        Ok(file_path)
    }

    /// File names currently in the directory, sorted
    pub fn list_files(&self) -> Result<Vec<String>, ExportError> {
        let mut names: Vec<String> = self
            .files()?
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn files(&self) -> Result<Vec<PathBuf>, ExportError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.path).map_err(|e| ExportError::io(&self.path, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ExportError::io(&self.path, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn remove_files<F>(&self, should_remove: F) -> Result<Vec<PathBuf>, ExportError>
    where
        F: Fn(&str) -> bool,
    {
        let mut removed = Vec::new();
        for path in self.files()? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !should_remove(&name) {
                continue;
            }
            std::fs::remove_file(&path).map_err(|e| ExportError::io(&path, e))?;
            debug!("Removed {}", path.display());
            removed.push(path);
        }
        Ok(removed)
    }
}
