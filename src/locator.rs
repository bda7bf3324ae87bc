//! Query interface: expansion, deduplication and dispatch of lookups.

use ahash::AHashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::binary::{ip_index, ip_shard_path, mac_index, MAC_DB_PATH};
use crate::cache::LookupCache;
use crate::expand::{expand_ip, expand_mac, parse_ipv4, parse_mac_prefix};
use crate::source::{DataSource, DirectorySource, HttpSource};
use crate::store::DatabaseStore;
use crate::{AddressKind, LookupConfig, LookupResult};

/// Resolves IP and MAC queries against a data source.
///
/// Lookups are independent: an invalid entry, a missing shard or an
/// unreachable source only affects the results it belongs to.
///
/// # Example
///
/// ```ignore
/// use netlookup::Locator;
///
/// let locator = Locator::open_dir("data");
/// for result in locator.lookup_ip("8.8.8.0/30, 1.1.1.1") {
///     println!("{}", result);
/// }
/// ```
pub struct Locator {
    store: DatabaseStore,
    ip_cache: Option<LookupCache>,
    mac_cache: Option<LookupCache>,
    config: LookupConfig,
}

impl Locator {
    /// Create a locator over `source` with the default configuration.
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self::with_config(source, LookupConfig::default())
    }

    pub fn with_config(source: impl DataSource + 'static, config: LookupConfig) -> Self {
        let enabled = config.cache_enabled;
        Self {
            store: DatabaseStore::new(Box::new(source), config.store_capacity),
            ip_cache: enabled.then(LookupCache::new),
            mac_cache: enabled.then(LookupCache::new),
            config,
        }
    }

    /// Locator over a local data directory (`<dir>/ip/*.bin`, `<dir>/mac.bin`).
    pub fn open_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(DirectorySource::new(dir))
    }

    /// Locator over an HTTP base URL, using the configured timeout.
    pub fn open_url(base_url: &str, config: LookupConfig) -> Self {
        let source = HttpSource::with_timeout(base_url, config.http_timeout);
        Self::with_config(source, config)
    }

    /// Look up every address denoted by `input` (single, list, range or CIDR).
    ///
    /// Returns one result per distinct address, in first-appearance order.
    pub fn lookup_ip(&self, input: &str) -> Vec<LookupResult> {
        self.run_batch(expand_ip(input), self.ip_cache.as_ref(), |key| {
            self.resolve_ip(key)
        })
    }

    /// Look up every MAC address in `input` (single or list).
    pub fn lookup_mac(&self, input: &str) -> Vec<LookupResult> {
        self.run_batch(expand_mac(input), self.mac_cache.as_ref(), |key| {
            self.resolve_mac(key)
        })
    }

    /// Look up one canonical IP address, bypassing expansion and the cache.
    pub fn resolve_ip(&self, addr: &str) -> LookupResult {
        let Some(ip) = parse_ipv4(addr) else {
            return LookupResult::invalid(addr, AddressKind::Ip);
        };

        let path = ip_shard_path(ip.octets()[0]);
        let found = self
            .store
            .get(&path)
            .and_then(|shard| match shard {
                Some(shard) => ip_index::lookup(&shard, ip),
                None => Ok(None),
            });

        match found {
            Ok(Some(m)) => LookupResult::from_ip_match(addr, m),
            Ok(None) => LookupResult::not_found(addr),
            Err(e) => LookupResult::failed(addr, e),
        }
    }

    /// Look up one normalized MAC address, bypassing the cache.
    pub fn resolve_mac(&self, mac: &str) -> LookupResult {
        let Some(prefix) = parse_mac_prefix(mac) else {
            return LookupResult::invalid(mac, AddressKind::Mac);
        };

        let found = self.store.get(MAC_DB_PATH).and_then(|db| match db {
            Some(db) => mac_index::lookup(&db, prefix),
            None => Ok(None),
        });

        match found {
            Ok(Some(name)) => LookupResult::manufacturer(mac, name),
            Ok(None) => LookupResult::not_found(mac),
            Err(e) => LookupResult::failed(mac, e),
        }
    }

    /// Forget a cached result so the next query for `key` looks it up again.
    pub fn forget(&self, kind: AddressKind, key: &str) -> bool {
        self.cache_for(kind).map_or(false, |cache| cache.remove(key))
    }

    /// Clear both result caches.
    pub fn clear_cache(&self) {
        for cache in [&self.ip_cache, &self.mac_cache].into_iter().flatten() {
            cache.clear();
        }
    }

    pub fn cache_for(&self, kind: AddressKind) -> Option<&LookupCache> {
        match kind {
            AddressKind::Ip => self.ip_cache.as_ref(),
            AddressKind::Mac => self.mac_cache.as_ref(),
        }
    }

    pub fn store(&self) -> &DatabaseStore {
        &self.store
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn run_batch<F>(&self, keys: Vec<String>, cache: Option<&LookupCache>, resolve: F) -> Vec<LookupResult>
    where
        F: Fn(&str) -> LookupResult + Sync,
    {
        let mut seen = AHashSet::with_capacity(keys.len());
        let keys: Vec<String> = keys.into_iter().filter(|k| seen.insert(k.clone())).collect();

        let mut results: Vec<Option<LookupResult>> = keys
            .iter()
            .map(|key| cache.and_then(|c| c.get(key)))
            .collect();
        let pending: Vec<usize> = (0..keys.len()).filter(|&i| results[i].is_none()).collect();

        log::debug!(
            "batch of {}: {} cached, {} to resolve",
            keys.len(),
            keys.len() - pending.len(),
            pending.len()
        );

        let lookup = |key: &str| match cache {
            Some(cache) => {
                let (entry, _) = cache.get_or_create(key);
                let result = entry.get_or_init(|| resolve(key)).clone();
                // Unavailable results are retried on the next query.
                if result.is_unavailable() {
                    cache.discard(key, &entry);
                }
                result
            }
            None => resolve(key),
        };

        let workers = self.config.max_concurrency.clamp(1, pending.len().max(1));
        if workers == 1 {
            for &i in &pending {
                results[i] = Some(lookup(&keys[i]));
            }
        } else {
            // Results arrive in completion order and are slotted by index.
            let next = AtomicUsize::new(0);
            let (tx, rx) = mpsc::channel();
            thread::scope(|scope| {
                for _ in 0..workers {
                    let tx = tx.clone();
                    let (next, pending, keys, lookup) = (&next, &pending, &keys, &lookup);
                    scope.spawn(move || loop {
                        let Some(&i) = pending.get(next.fetch_add(1, Ordering::Relaxed)) else {
                            break;
                        };
                        if tx.send((i, lookup(&keys[i]))).is_err() {
                            break;
                        }
                    });
                }
            });
            drop(tx);
            for (i, result) in rx {
                results[i] = Some(result);
            }
        }

        keys.iter()
            .zip(results)
            .map(|(key, result)| result.unwrap_or_else(|| LookupResult::not_found(key)))
            .collect()
    }
}
