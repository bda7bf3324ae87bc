//! Binary database layout constants and record structures.

use super::codec::{bytes_to_uint, decode_f32_le};

/// Size of the `namesTableOffset` header shared by both file kinds.
pub const HEADER_SIZE: usize = 4;

/// Width of an IP range record.
pub const IP_RECORD_SIZE: usize = 26;

/// Width of a MAC prefix record.
pub const MAC_RECORD_SIZE: usize = 7;

/// Maximum length of a name read from an IP shard.
pub const IP_NAME_MAX_LEN: usize = 256;

/// Maximum length of a manufacturer name read from the MAC database.
pub const MAC_NAME_MAX_LEN: usize = 512;

/// Sentinel used for absent country codes and names.
pub const ABSENT: &str = "--";

/// Relative path of the MAC database.
pub const MAC_DB_PATH: &str = "mac.bin";

/// Relative path of the IP shard holding every address whose first octet is `octet`.
pub fn ip_shard_path(octet: u8) -> String {
    format!("ip/{}.bin", octet)
}

/// IP range record (26 bytes).
///
/// ```text
/// [0..2)   from marker (third octet, then second octet)
/// [2..4)   to marker, same order
/// [4..6)   country code (ASCII, "--" when absent)
/// [6..18)  three name pointers (u32 big-endian, relative to the names table)
/// [18..22) latitude (f32 little-endian)
/// [22..26) longitude (f32 little-endian)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IpRangeRecord {
    pub from_mid: [u8; 2],
    pub to_mid: [u8; 2],
    pub country_code: [u8; 2],
    pub name_ptrs: [u32; 3],
    pub lat: f32,
    pub lon: f32,
}

impl IpRangeRecord {
    /// Decode a record from exactly [`IP_RECORD_SIZE`] bytes.
    pub fn parse(bytes: &[u8; IP_RECORD_SIZE]) -> Self {
        let ptr = |at: usize| bytes_to_uint(&bytes[at..at + 4], true);
        Self {
            from_mid: [bytes[0], bytes[1]],
            to_mid: [bytes[2], bytes[3]],
            country_code: [bytes[4], bytes[5]],
            name_ptrs: [ptr(6), ptr(10), ptr(14)],
            lat: decode_f32_le([bytes[18], bytes[19], bytes[20], bytes[21]]),
            lon: decode_f32_le([bytes[22], bytes[23], bytes[24], bytes[25]]),
        }
    }

    /// Inclusive address interval covered by this record inside the shard
    /// for `first_octet`.
    pub fn bounds(&self, first_octet: u8) -> (u32, u32) {
        let from = bytes_to_uint(&[0x00, self.from_mid[0], self.from_mid[1], first_octet], false);
        let to = bytes_to_uint(&[0xFF, self.to_mid[0], self.to_mid[1], first_octet], false);
        (from, to)
    }

    /// Check whether `target` falls inside this record's interval.
    pub fn contains(&self, first_octet: u8, target: u32) -> bool {
        let (from, to) = self.bounds(first_octet);
        from <= target && target <= to
    }

    /// Country code, or `None` for the absence sentinel.
    pub fn country(&self) -> Option<String> {
        let code: String = self.country_code.iter().map(|&b| b as char).collect();
        if code == ABSENT {
            None
        } else {
            Some(code)
        }
    }

    /// Coordinates, present only when both are non-zero.
    pub fn coordinates(&self) -> Option<(f32, f32)> {
        if self.lat != 0.0 && self.lon != 0.0 {
            Some((self.lat, self.lon))
        } else {
            None
        }
    }
}

/// MAC prefix record (7 bytes): 3-byte big-endian OUI followed by a
/// big-endian name pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacPrefixRecord {
    pub prefix: u32,
    pub name_ptr: u32,
}

impl MacPrefixRecord {
    /// Decode a record from exactly [`MAC_RECORD_SIZE`] bytes.
    pub fn parse(bytes: &[u8; MAC_RECORD_SIZE]) -> Self {
        Self {
            prefix: bytes_to_uint(&bytes[0..3], true),
            name_ptr: bytes_to_uint(&bytes[3..7], true),
        }
    }
}
