//! Workspace fixture: a temp directory with a live file catalog.

use std::path::{Path, PathBuf};

use platform::LocalCatalog;
use raster_core::RasterGrid;
use tempfile::TempDir;

/// A disposable workspace directory plus a catalog rooted at it.
///
/// The directory is removed when the fixture is dropped.
pub struct Workspace {
    dir: TempDir,
    catalog: LocalCatalog,
}

impl Workspace {
    /// Create a fresh workspace.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create workspace temp dir");
        let catalog = LocalCatalog::new(dir.path());
        Self { dir, catalog }
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The catalog rooted at this workspace.
    pub fn catalog(&self) -> &LocalCatalog {
        &self.catalog
    }

    /// Resolve a product name inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a grid product into the workspace and return its path.
    pub fn write_grid(&self, name: &str, grid: &RasterGrid) -> PathBuf {
        let path = self.path(name);
        raster_codec::write_grid(&path, grid).expect("failed to write fixture grid");
        path
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
