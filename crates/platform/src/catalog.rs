//! Workspace file catalog seam.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::{PlatformError, Result};

/// Registry of named products in the active workspace.
///
/// Product names are plain file names; the catalog maps them to local
/// paths and tracks which ones have been published.
pub trait FileCatalog {
    /// Publish a product, optionally into a named collection
    /// (e.g. a visualization style group).
    fn register(&self, name: &str, collection: Option<&str>) -> Result<()>;

    /// Remove a product from the workspace, deleting its local file.
    fn delete(&self, name: &str) -> Result<()>;

    /// Resolve a product name to its local path. The file may not exist
    /// yet; writers resolve paths before creating products.
    fn local_path(&self, name: &str) -> PathBuf;
}

/// Filesystem-backed catalog rooted at a workspace directory.
pub struct LocalCatalog {
    root: PathBuf,
    registered: Mutex<BTreeSet<String>>,
}

impl LocalCatalog {
    /// Create a catalog over an existing workspace directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            registered: Mutex::new(BTreeSet::new()),
        }
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether a product has been registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered
            .lock()
            .map(|set| set.contains(name))
            .unwrap_or(false)
    }
}

impl FileCatalog for LocalCatalog {
    fn register(&self, name: &str, collection: Option<&str>) -> Result<()> {
        let path = self.local_path(name);
        if !path.exists() {
            return Err(PlatformError::Catalog(format!(
                "cannot register '{name}': no file at {}",
                path.display()
            )));
        }

        self.registered
            .lock()
            .map_err(|_| PlatformError::Catalog("catalog lock poisoned".to_string()))?
            .insert(name.to_string());

        info!(product = %name, collection = ?collection, "Registered product");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.local_path(name);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        self.registered
            .lock()
            .map_err(|_| PlatformError::Catalog("catalog lock poisoned".to_string()))?
            .remove(name);

        debug!(product = %name, "Deleted product");
        Ok(())
    }

    fn local_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());

        assert!(catalog.register("missing.ngr", None).is_err());

        std::fs::write(dir.path().join("present.ngr"), b"x").unwrap();
        assert!(catalog.register("present.ngr", Some("styles")).is_ok());
        assert!(catalog.is_registered("present.ngr"));
    }

    #[test]
    fn test_delete_removes_file_and_registration() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());

        let path = dir.path().join("tmp.ngr");
        std::fs::write(&path, b"x").unwrap();
        catalog.register("tmp.ngr", None).unwrap();

        catalog.delete("tmp.ngr").unwrap();
        assert!(!path.exists());
        assert!(!catalog.is_registered("tmp.ngr"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalCatalog::new(dir.path());
        assert!(catalog.delete("never-existed.ngr").is_ok());
    }

    #[test]
    fn test_local_path_joins_root() {
        let catalog = LocalCatalog::new("/workspace");
        assert_eq!(
            catalog.local_path("flood.ngr"),
            PathBuf::from("/workspace/flood.ngr")
        );
    }
}
