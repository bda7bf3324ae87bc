//! Locator configuration.

use std::time::Duration;

use crate::source::DEFAULT_HTTP_TIMEOUT;
use crate::{Error, Result};

/// Default number of databases kept loaded: every IP shard plus `mac.bin`.
const DEFAULT_STORE_CAPACITY: usize = 257;

/// Configuration for a [`Locator`](crate::Locator).
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Maximum number of loaded databases kept in memory.
    pub store_capacity: usize,
    /// Whether query results are memoized per key.
    pub cache_enabled: bool,
    /// Upper bound on concurrent lookups within one batch.
    pub max_concurrency: usize,
    /// Timeout for HTTP sources built from this configuration.
    pub http_timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            store_capacity: DEFAULT_STORE_CAPACITY,
            cache_enabled: true,
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl LookupConfig {
    /// Create a configuration keeping at most `capacity` databases loaded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store_capacity: capacity,
            ..Self::default()
        }
    }

    /// Create a configuration with result caching disabled.
    pub fn no_cache() -> Self {
        Self {
            cache_enabled: false,
            ..Self::default()
        }
    }

    pub fn max_concurrency(mut self, workers: usize) -> Self {
        self.max_concurrency = workers;
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Reject settings no locator can run with.
    pub fn validate(&self) -> Result<()> {
        if self.store_capacity == 0 {
            return Err(Error::Config("store capacity must be at least 1".to_string()));
        }
        if self.max_concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }
        if self.http_timeout.is_zero() {
            return Err(Error::Config("HTTP timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
