//! Holds the currently published catalog snapshot.
//!
//! Queries capture one snapshot through `current()` and keep it for their
//! whole run. Reloads build a complete replacement first and swap it in
//! under the write lock, so a query never observes a mix of old and new
//! records.

use crate::catalog::error::LoadError;
use crate::catalog::snapshot::CatalogSnapshot;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Process-wide holder for the active `CatalogSnapshot`.
#[derive(Debug)]
pub struct CatalogStore {
    source: PathBuf,
    current: RwLock<CatalogSnapshot>,
}

impl CatalogStore {
    /// Load `path` and publish it as the first snapshot.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let snapshot = CatalogSnapshot::load(path)?;
        Ok(Self::with_snapshot(path, snapshot))
    }

    /// Wrap an already-built snapshot; `source` is what `reload` re-reads.
    pub fn with_snapshot(source: &Path, snapshot: CatalogSnapshot) -> Self {
        Self {
            source: source.to_path_buf(),
            current: RwLock::new(snapshot),
        }
    }

    /// The configured catalog source.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Capture the published snapshot.
    pub fn current(&self) -> CatalogSnapshot {
        self.current
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    /// Swap in `snapshot`, returning the one it replaced.
    pub fn publish(&self, snapshot: CatalogSnapshot) -> CatalogSnapshot {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|err| err.into_inner());
        std::mem::replace(&mut *guard, snapshot)
    }

    /// Re-read the source and publish it.
    ///
    /// On failure nothing is published and the previous snapshot keeps
    /// serving.
    pub fn reload(&self) -> Result<CatalogSnapshot, LoadError> {
        let snapshot = CatalogSnapshot::load(&self.source)?;
        self.publish(snapshot.clone());
        Ok(snapshot)
    }
}
