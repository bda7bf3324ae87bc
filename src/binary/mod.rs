//! Binary database formats for IP geolocation and MAC vendor lookups.
//!
//! Both file kinds share the same outer structure:
//!
//! ```text
//! +------------------+
//! |  NAMES OFFSET    |  4 bytes, u32 big-endian
//! +------------------+
//! |     RECORDS      |  26-byte IP ranges or 7-byte OUI prefixes
//! +------------------+
//! |   NAMES BLOB     |  NUL-terminated strings referenced by pointer
//! +------------------+
//! ```
//!
//! IP data is sharded by first octet (`ip/<octet>.bin`) and scanned
//! linearly; the MAC database (`mac.bin`) is sorted by prefix and binary
//! searched.

pub mod codec;
mod database;
mod format;
pub mod ip_index;
pub mod mac_index;


pub use database::Database;
pub use format::*;
pub use ip_index::IpMatch;
