use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Path-addressable blob storage: existence checks, path resolution, byte reads.
///
/// Passed explicitly to the archive builder instead of being reached through
/// a process-wide facade, so callers can substitute their own backend.
pub trait BlobStore {
    fn exists(&self, name: &str) -> bool;

    /// Resolve a blob name to the absolute path of its content.
    fn resolve(&self, name: &str) -> PathBuf;

    fn read(&self, name: &str) -> Result<Vec<u8>>;
}

/// Filesystem-backed blob store rooted at a single directory.
///
/// Blob names are slash-separated paths relative to the root.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a blob, creating any missing parent directories.
    pub fn put(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(())
    }
}

impl BlobStore for DiskStore {
    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name);
        if !path.is_file() {
            return Err(Error::SourceNotFound(name.to_string()));
        }
        Ok(fs::read(&path)?)
    }
}
