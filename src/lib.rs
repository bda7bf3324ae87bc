//! netlookup - IP geolocation and MAC vendor lookups over compact binary databases.
//!
//! This crate resolves IPv4 addresses against per-first-octet shard files
//! and MAC addresses against a sorted OUI prefix table, returning names,
//! country codes and coordinates.
//!
//! # Features
//!
//! - **Flexible input**: single addresses, `;`/`,` lists, dash ranges and CIDR blocks
//! - **Sharded IP data**: only the shard for the first octet is ever loaded
//! - **Binary-searched OUI table**: manufacturer lookup for MAC addresses
//! - **Pluggable sources**: local directory (memory-mapped, optional gzip) or HTTP
//! - **Thread-safe**: a `Locator` can be shared; batches run concurrently
//!
//! # Quick Start
//!
//! ```ignore
//! use netlookup::Locator;
//!
//! let locator = Locator::open_dir("data");
//!
//! for result in locator.lookup_ip("192.168.0.0/30; 8.8.8.8") {
//!     println!("{}", result);
//! }
//!
//! let vendor = &locator.lookup_mac("00:17:F2:01:02:03")[0];
//! println!("{}", vendor.display_name());
//! ```
//!
//! # Data Layout
//!
//! ```text
//! data/
//!   ip/0.bin .. ip/255.bin    one shard per first octet
//!   mac.bin                   OUI prefix table
//! ```
//!
//! See [`binary`] for the record formats.
//!
//! # Errors
//!
//! Per-address problems never abort a batch. Each [`LookupResult`] is either
//! found, not found, or carries a [`LookupFailure`]: an invalid address, an
//! unavailable source, or corrupt data.

mod cache;
mod config;
mod error;
mod expand;
mod locator;
mod result;
mod store;

pub mod binary;
pub mod source;

// Re-export core types
pub use error::{Error, Result};
pub use result::{AddressKind, Coordinates, LookupFailure, LookupResult};

pub use binary::Database;
pub use cache::{CacheEntry, LookupCache};
pub use config::LookupConfig;
pub use expand::{expand_ip, expand_mac, normalize_mac, parse_ipv4, parse_mac_prefix, MAX_RANGE_LEN};
pub use locator::Locator;
pub use source::{DataSource, DirectorySource, HttpSource, MemorySource};
pub use store::DatabaseStore;
