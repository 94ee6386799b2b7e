//! Dataset cache keyed by path and content signature.
//!
//! An explicit object owned by the loader — not hidden module state — so
//! the upload flow can invalidate it deliberately. A stale table surviving
//! an overwrite of the source file is a correctness bug, not a
//! performance detail.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::table::SalesTable;

struct CacheEntry {
    signature: String,
    table: Arc<SalesTable>,
}

/// In-memory cache of loaded tables.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content signature of the raw file bytes.
    pub fn signature(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    /// Cached table for `path`, only when the signature still matches the
    /// current file content.
    pub fn get(&self, path: &Path, signature: &str) -> Option<Arc<SalesTable>> {
        self.entries
            .get(path)
            .filter(|entry| entry.signature == signature)
            .map(|entry| Arc::clone(&entry.table))
    }

    /// Store a freshly parsed table and return the shared handle.
    pub fn put(&mut self, path: &Path, signature: String, table: SalesTable) -> Arc<SalesTable> {
        let table = Arc::new(table);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                signature,
                table: Arc::clone(&table),
            },
        );
        table
    }

    /// Drop the entry for one path. Called by the upload flow after the
    /// underlying file is overwritten.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
