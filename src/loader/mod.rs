//! Data loading: CSV ingestion, type coercion, product normalization and
//! the dataset cache. The loader exclusively owns the lifecycle of the
//! normalized table; reports receive it read-only.

pub mod cache;
pub mod csv_reader;
pub mod table;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use walkdir::WalkDir;

use self::cache::TableCache;
use self::table::SalesTable;

/// Result of a load attempt.
///
/// Loading never fails hard: a missing or unreadable file degrades to an
/// empty table with the failure message attached, so the caller can show a
/// "no data" state instead of crashing.
pub struct LoadOutcome {
    pub table: Arc<SalesTable>,
    pub error: Option<String>,
    pub from_cache: bool,
}

/// Owns the cache and mediates every dataset load.
#[derive(Default)]
pub struct Loader {
    cache: TableCache,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a sales CSV, served from cache when the file content is
    /// unchanged since the previous load of the same path.
    pub fn load(&mut self, path: &Path) -> LoadOutcome {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                return LoadOutcome {
                    table: Arc::new(SalesTable::empty()),
                    error: Some(format!("Failed to read {}: {}", path.display(), err)),
                    from_cache: false,
                }
            }
        };

        let signature = TableCache::signature(&bytes);
        if let Some(table) = self.cache.get(path, &signature) {
            return LoadOutcome {
                table,
                error: None,
                from_cache: true,
            };
        }

        match csv_reader::parse_table(&bytes) {
            Ok(parsed) => LoadOutcome {
                table: self.cache.put(path, signature, parsed),
                error: None,
                from_cache: false,
            },
            // Failed parses are not cached: a later fix to the file must
            // be picked up immediately
            Err(err) => LoadOutcome {
                table: Arc::new(SalesTable::empty()),
                error: Some(format!("{:#}", err)),
                from_cache: false,
            },
        }
    }

    /// Forget the cached table for one path.
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.invalidate(path);
    }

    /// Forget every cached table.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

/// Newest CSV file under a data directory, by modification time.
pub fn discover_latest_csv(dir: &Path) -> Option<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            if let Ok(modified) = meta.modified() {
                let is_newer = newest
                    .as_ref()
                    .map(|(best, _)| modified > *best)
                    .unwrap_or(true);
                if is_newer {
                    newest = Some((modified, path.to_path_buf()));
                }
            }
        }
    }

    newest.map(|(_, path)| path)
}
