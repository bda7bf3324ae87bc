//! Database fixtures shared by the integration tests and benchmarks.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// One range record: marker bytes as stored (third octet, then second),
/// country and names.
pub struct Range {
    pub from: [u8; 2],
    pub to: [u8; 2],
    pub country: &'static str,
    pub names: [&'static str; 3],
    pub coords: (f32, f32),
}

pub fn range(from: [u8; 2], to: [u8; 2], country: &'static str, names: [&'static str; 3]) -> Range {
    Range {
        from,
        to,
        country,
        names,
        coords: (0.0, 0.0),
    }
}

fn intern(blob: &mut Vec<u8>, name: &str) -> u32 {
    let offset = blob.len() as u32;
    blob.extend_from_slice(name.as_bytes());
    blob.push(0);
    offset
}

fn assemble(table: Vec<u8>, blob: Vec<u8>) -> Vec<u8> {
    let mut out = ((4 + table.len()) as u32).to_be_bytes().to_vec();
    out.extend(table);
    out.extend(blob);
    out
}

pub fn ip_shard(ranges: &[Range]) -> Vec<u8> {
    let (mut table, mut blob) = (Vec::new(), Vec::new());
    for r in ranges {
        table.extend_from_slice(&r.from);
        table.extend_from_slice(&r.to);
        table.extend_from_slice(r.country.as_bytes());
        for name in r.names {
            table.extend_from_slice(&intern(&mut blob, name).to_be_bytes());
        }
        table.extend_from_slice(&r.coords.0.to_le_bytes());
        table.extend_from_slice(&r.coords.1.to_le_bytes());
    }
    assemble(table, blob)
}

/// Entries must be sorted by prefix.
pub fn mac_db(entries: &[(u32, &str)]) -> Vec<u8> {
    let (mut table, mut blob) = (Vec::new(), Vec::new());
    for (prefix, name) in entries {
        table.extend_from_slice(&prefix.to_be_bytes()[1..]);
        table.extend_from_slice(&intern(&mut blob, name).to_be_bytes());
    }
    assemble(table, blob)
}

/// Write a data directory with the given shards and MAC entries.
pub fn write_data_dir(root: &Path, shards: &[(u8, Vec<u8>)], mac: Option<Vec<u8>>) {
    fs::create_dir_all(root.join("ip")).unwrap();
    for (octet, data) in shards {
        fs::write(root.join(format!("ip/{}.bin", octet)), data).unwrap();
    }
    if let Some(mac) = mac {
        fs::write(root.join("mac.bin"), mac).unwrap();
    }
}
