use std::fs;
use std::io::Write;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use tempfile::Builder;

use crate::error::PrepError;
use crate::reference::ReferenceKind;

/// Local cache of downloaded reference tables.
#[derive(Debug, Clone)]
pub struct Store {
    cache_root: Utf8PathBuf,
}

impl Store {
    pub fn new() -> Result<Self, PrepError> {
        let cache_root = BaseDirs::new()
            .and_then(|dirs| {
                Utf8PathBuf::from_path_buf(dirs.home_dir().join(".cache").join("gisaid-prep"))
                    .ok()
            })
            .ok_or_else(|| {
                PrepError::Filesystem("unable to resolve cache directory".to_string())
            })?;
        Ok(Self { cache_root })
    }

    pub fn new_with_root(cache_root: Utf8PathBuf) -> Self {
        Self { cache_root }
    }

    pub fn cache_root(&self) -> &Utf8Path {
        &self.cache_root
    }

    pub fn reference_path(&self, kind: ReferenceKind) -> Utf8PathBuf {
        self.cache_root.join("reference").join(kind.file_name())
    }

    pub fn ensure_cache_root(&self) -> Result<(), PrepError> {
        fs::create_dir_all(self.cache_root.as_std_path())
            .map_err(|err| PrepError::Filesystem(err.to_string()))
    }

    pub fn has_reference(&self, kind: ReferenceKind) -> bool {
        self.reference_path(kind).as_std_path().exists()
    }

    /// Writes through a temporary sibling file and renames it over `path`.
    pub fn write_bytes_atomic(path: &Path, content: &[u8]) -> Result<(), PrepError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| PrepError::Filesystem(err.to_string()))?;
        let mut temp = Builder::new()
            .prefix(".gisaid-prep")
            .tempfile_in(parent)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        temp.write_all(content)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        temp.persist(path)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        Ok(())
    }
}
