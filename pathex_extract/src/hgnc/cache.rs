//! Persistent HGNC id → gene symbol store.
//!
//! One JSON object per file. The store is owned by a single resolver and
//! written back only when asked; concurrent writers from other processes are
//! not supported.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::CacheError;

#[derive(Debug, Clone, Default)]
pub struct HgncCache {
    path: PathBuf,
    entries: BTreeMap<u32, String>,
}

impl HgncCache {
    /// An empty cache that will be dumped to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Load the cache stored at `path`; a missing file gives an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No HGNC cache at {}, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let entries: BTreeMap<u32, String> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(source) => return Err(CacheError::Serde { path, source }),
        };
        info!(
            "Loaded {} HGNC symbols from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { path, entries })
    }

    /// Overwrite the cache file with the current contents.
    pub fn dump(&self) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            CacheError::Serde {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            "Wrote {} HGNC symbols to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    #[must_use]
    pub fn get(&self, hgnc_id: u32) -> Option<&str> {
        self.entries.get(&hgnc_id).map(String::as_str)
    }

    pub fn insert(&mut self, hgnc_id: u32, symbol: impl Into<String>) {
        self.entries.insert(hgnc_id, symbol.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
