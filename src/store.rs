//! Process-wide cache of loaded databases.

use quick_cache::sync::Cache;
use std::sync::Arc;

use crate::binary::Database;
use crate::source::DataSource;
use crate::{Error, Result};

/// Outcome of a load that leaves nothing in the cache.
enum Load {
    Missing,
    Failed(Error),
}

/// Loads each distinct database once and shares it read-only.
///
/// Missing files are not remembered, so a shard added later is picked up
/// on the next query.
pub struct DatabaseStore {
    source: Box<dyn DataSource>,
    loaded: Cache<String, Arc<Database>>,
}

impl DatabaseStore {
    pub fn new(source: Box<dyn DataSource>, capacity: usize) -> Self {
        Self {
            source,
            loaded: Cache::new(capacity.max(1)),
        }
    }

    /// Get a database by relative path, loading it on first use.
    ///
    /// Concurrent callers for the same path wait for a single load.
    pub fn get(&self, path: &str) -> Result<Option<Arc<Database>>> {
        let loaded = self.loaded.get_or_insert_with(path, || match self.source.fetch(path) {
            Ok(Some(db)) => {
                log::info!(
                    "Loaded {} from {} ({} bytes)",
                    path,
                    self.source.describe(),
                    db.len()
                );
                Ok(Arc::new(db))
            }
            Ok(None) => Err(Load::Missing),
            Err(e) => Err(Load::Failed(e)),
        });

        match loaded {
            Ok(db) => Ok(Some(db)),
            Err(Load::Missing) => {
                log::debug!("{} not present in {}", path, self.source.describe());
                Ok(None)
            }
            Err(Load::Failed(e)) => {
                log::warn!("Failed to load {}: {}", path, e);
                Err(e)
            }
        }
    }

    /// Forget every loaded database; the next query reloads from the source.
    pub fn clear(&self) {
        self.loaded.clear();
    }

    /// Number of databases currently loaded.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.len() == 0
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingSource {
        inner: MemorySource,
        fetches: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl DataSource for CountingSource {
        fn fetch(&self, path: &str) -> Result<Option<Database>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            self.inner.fetch(path)
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    fn slow_store(delay: Duration) -> (DatabaseStore, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: MemorySource::new().with_file("mac.bin", vec![0, 0, 0, 4]),
            fetches: Arc::clone(&fetches),
            delay,
        };
        (DatabaseStore::new(Box::new(source), 64), fetches)
    }

    fn store() -> (DatabaseStore, Arc<AtomicUsize>) {
        slow_store(Duration::ZERO)
    }

    #[test]
    fn test_loads_once() {
        let (store, fetches) = store();
        let a = store.get("mac.bin").unwrap().unwrap();
        let b = store.get("mac.bin").unwrap().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_not_remembered() {
        let (store, fetches) = store();
        assert!(store.get("ip/1.bin").unwrap().is_none());
        assert!(store.get("ip/1.bin").unwrap().is_none());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_reloads() {
        let (store, fetches) = store();
        store.get("mac.bin").unwrap();
        store.clear();
        store.get("mac.bin").unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_gets_share_one_load() {
        let (store, fetches) = slow_store(Duration::from_millis(50));

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| assert!(store.get("mac.bin").unwrap().is_some()));
            }
        });

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_error_not_remembered() {
        let source = MemorySource::new().with_file("ip/9.bin", vec![0, 0]);
        let store = DatabaseStore::new(Box::new(source), 64);

        assert!(matches!(store.get("ip/9.bin"), Err(Error::CorruptData { .. })));
        assert!(store.is_empty());
    }
}
