//! Parsed-ledger cache
//!
//! Memoizes [`ImportService::load_path`] by source identity (the canonical
//! path). A changed file length or modification time counts as a re-upload
//! and triggers a reload; callers can also drop entries explicitly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use super::import::ImportService;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Ledger;

/// What we know about a source file at load time
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceFingerprint {
    fn read(path: &Path) -> LedgerResult<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| LedgerError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CachedLedger {
    fingerprint: SourceFingerprint,
    ledger: Arc<Ledger>,
}

/// Cache of parsed ledgers keyed by canonical source path
#[derive(Debug, Default)]
pub struct LedgerCache {
    entries: HashMap<PathBuf, CachedLedger>,
}

impl LedgerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached ledger for `path`, loading it on a miss or when
    /// the file changed on disk since it was cached
    pub fn get_or_load(
        &mut self,
        path: &Path,
        loader: &ImportService,
    ) -> LedgerResult<Arc<Ledger>> {
        let key = canonical(path)?;
        let fingerprint = SourceFingerprint::read(&key)?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.fingerprint == fingerprint {
                debug!(path = %key.display(), "Ledger cache hit");
                return Ok(Arc::clone(&entry.ledger));
            }
            debug!(path = %key.display(), "Ledger source changed on disk; reloading");
        } else {
            debug!(path = %key.display(), "Ledger cache miss");
        }

        let ledger = Arc::new(loader.load_path(&key)?);
        self.entries.insert(
            key,
            CachedLedger {
                fingerprint,
                ledger: Arc::clone(&ledger),
            },
        );
        Ok(ledger)
    }

    /// Drop the entry for `path`; returns whether one was present
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = canonical(path).unwrap_or_else(|_| path.to_path_buf());
        let removed = self.entries.remove(&key).is_some();
        debug!(path = %key.display(), removed, "Ledger cache invalidated");
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        canonical(path)
            .map(|key| self.entries.contains_key(&key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical(path: &Path) -> LedgerResult<PathBuf> {
    path.canonicalize()
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHEET: &str = "Date,Name of Customer,Frequency,Debit,Collection,Interest Paid,Overdue Flag\n\
                         2024-01-01,Asha,Weekly,100,80,5,Overdue\n";

    fn write_sheet(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("loans.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_hit_returns_same_ledger() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, SHEET);
        let loader = ImportService::default();
        let mut cache = LedgerCache::new();

        let first = cache.get_or_load(&path, &loader).unwrap();
        let second = cache.get_or_load(&path, &loader).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&path));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, SHEET);
        let loader = ImportService::default();
        let mut cache = LedgerCache::new();

        let first = cache.get_or_load(&path, &loader).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.contains(&path));
        assert!(!cache.invalidate(&path));

        let second = cache.get_or_load(&path, &loader).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_changed_file_reloads() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, SHEET);
        let loader = ImportService::default();
        let mut cache = LedgerCache::new();

        let first = cache.get_or_load(&path, &loader).unwrap();
        assert_eq!(first.len(), 1);

        // A different length changes the fingerprint even on coarse mtime clocks
        write_sheet(
            &dir,
            &format!("{}2024-01-02,Ravi,Daily,10,10,1,Not Overdue\n", SHEET),
        );
        let second = cache.get_or_load(&path, &loader).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, "Date,Debit\n2024-01-01,1\n");
        let mut cache = LedgerCache::new();

        assert!(cache.get_or_load(&path, &ImportService::default()).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, SHEET);
        let mut cache = LedgerCache::new();
        cache.get_or_load(&path, &ImportService::default()).unwrap();

        cache.clear();
        assert!(cache.is_empty());
    }
}
