//! Transports that fetch database files by relative path.
//!
//! Every source distinguishes three outcomes: the file exists (`Ok(Some)`),
//! the file does not exist (`Ok(None)`, reported to callers as "not found"),
//! and the store cannot be reached (`Err(Error::Unavailable)`).

use ahash::AHashMap;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::binary::Database;
use crate::{Error, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A place database files are loaded from.
pub trait DataSource: Send + Sync {
    /// Fetch the file at `path` (e.g. `ip/10.bin` or `mac.bin`).
    fn fetch(&self, path: &str) -> Result<Option<Database>>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn fetch(&self, path: &str) -> Result<Option<Database>> {
        (**self).fetch(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Loads databases from a local directory.
///
/// Files are memory-mapped. When `<path>` is missing, a gzip-compressed
/// `<path>.gz` is tried and decompressed into memory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unavailable(&self, path: &Path, err: std::io::Error) -> Error {
        Error::Unavailable(format!("{}: {}", path.display(), err))
    }
}

impl DataSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Option<Database>> {
        if !self.root.is_dir() {
            return Err(Error::Unavailable(format!(
                "data directory {} does not exist",
                self.root.display()
            )));
        }

        let full = self.root.join(path);
        match File::open(&full) {
            Ok(file) => return Database::map(path, &file).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(self.unavailable(&full, e)),
        }

        let compressed = self.root.join(format!("{}.gz", path));
        match File::open(&compressed) {
            Ok(file) => {
                let mut data = Vec::new();
                GzDecoder::new(file)
                    .read_to_end(&mut data)
                    .map_err(|e| Error::corrupt(path, format!("gzip: {}", e)))?;
                log::debug!("decompressed {:?}: {} bytes", compressed, data.len());
                Database::from_bytes(path, data).map(Some)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(&compressed, e)),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Loads databases over HTTP from `<base_url>/<path>`.
///
/// 404 means the file does not exist; any other failure means the server
/// is unavailable.
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl DataSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<Option<Database>> {
        let url = self.url_for(path);
        log::debug!("GET {}", url);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::Unavailable(format!("{}: HTTP {}", url, code)))
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(Error::Unavailable(format!("{}: {}", url, t)))
            }
        };

        let mut data = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut data)
            .map_err(|e| Error::Unavailable(format!("{}: {}", url, e)))?;

        Database::from_bytes(path, data).map(Some)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// In-memory files, for embedding databases or testing.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: AHashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.insert(path.to_string(), data);
    }

    pub fn with_file(mut self, path: &str, data: Vec<u8>) -> Self {
        self.insert(path, data);
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<Option<Database>> {
        self.files
            .get(path)
            .map(|data| Database::from_bytes(path, data.clone()))
            .transpose()
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}
