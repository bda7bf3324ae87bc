//! Immutable database buffers.

use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use super::codec::{bytes_to_uint, read_cstring};
use super::format::HEADER_SIZE;
use crate::{Error, Result};

enum Storage {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Storage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Mapped(mmap) => &mmap[..],
            Storage::Owned(data) => &data[..],
        }
    }
}

/// A loaded IP shard or MAC database.
///
/// The buffer is never mutated after load, so a `Database` can be shared
/// across threads behind an `Arc` without locking.
pub struct Database {
    name: String,
    data: Storage,
    names_offset: usize,
}

impl Database {
    /// Open and memory-map a database file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::map(&path.display().to_string(), &file)
    }

    /// Memory-map an already opened file.
    pub fn map(name: &str, file: &File) -> Result<Self> {
        // Zero-length files cannot be mapped on every platform.
        if file.metadata()?.len() < HEADER_SIZE as u64 {
            return Err(Error::corrupt(name, "file shorter than header"));
        }
        let mmap = unsafe { Mmap::map(file)? };
        Self::new(name, Storage::Mapped(mmap))
    }

    /// Wrap an owned byte buffer.
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        Self::new(name, Storage::Owned(data))
    }

    fn new(name: &str, data: Storage) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::corrupt(name, "file shorter than header"));
        }

        let names_offset = bytes_to_uint(&data[..HEADER_SIZE], true) as usize;
        if names_offset < HEADER_SIZE || names_offset > data.len() {
            return Err(Error::corrupt(
                name,
                format!(
                    "names table offset {} outside buffer of {} bytes",
                    names_offset,
                    data.len()
                ),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            data,
            names_offset,
        })
    }

    /// Name the database was loaded under (relative path or file path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start of the names blob; the record region is `[HEADER_SIZE, names_offset)`.
    pub fn names_offset(&self) -> usize {
        self.names_offset
    }

    /// Raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked fixed-size read.
    pub(crate) fn record<const N: usize>(&self, offset: usize) -> Result<&[u8; N]> {
        offset
            .checked_add(N)
            .and_then(|end| self.data.get(offset..end))
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| {
                Error::corrupt(
                    &self.name,
                    format!("record at {} overruns buffer of {} bytes", offset, self.len()),
                )
            })
    }

    /// Read a name referenced by a pointer into the names blob.
    pub(crate) fn name_at(&self, pointer: u32, max_len: usize) -> Result<String> {
        let start = self.names_offset.saturating_add(pointer as usize);
        read_cstring(&self.data, start, max_len).ok_or_else(|| {
            Error::corrupt(
                &self.name,
                format!("name pointer {} outside buffer of {} bytes", pointer, self.len()),
            )
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("names_offset", &self.names_offset)
            .finish()
    }
}
