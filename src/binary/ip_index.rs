//! IP range lookup over a single per-first-octet shard.

use std::net::Ipv4Addr;

use super::database::Database;
use super::format::{IpRangeRecord, ABSENT, HEADER_SIZE, IP_NAME_MAX_LEN, IP_RECORD_SIZE};
use crate::Result;

/// Metadata decoded from a matching range record.
#[derive(Debug, Clone, PartialEq)]
pub struct IpMatch {
    pub country_code: Option<String>,
    pub names: Vec<String>,
    pub coordinates: Option<(f32, f32)>,
}

/// Find the range containing `ip` in `shard`.
///
/// The shard must be the one selected by `ip`'s first octet. Records are
/// scanned front to back and the first containing interval wins; the table
/// is not assumed to be sorted.
pub fn lookup(shard: &Database, ip: Ipv4Addr) -> Result<Option<IpMatch>> {
    let first_octet = ip.octets()[0];
    let target = u32::from(ip);

    let mut index = HEADER_SIZE;
    while index < shard.names_offset() {
        let record = IpRangeRecord::parse(shard.record::<IP_RECORD_SIZE>(index)?);
        if record.contains(first_octet, target) {
            log::trace!("{} matched record at {} in {}", ip, index, shard.name());
            return resolve(shard, &record).map(Some);
        }
        index += IP_RECORD_SIZE;
    }

    Ok(None)
}

fn resolve(shard: &Database, record: &IpRangeRecord) -> Result<IpMatch> {
    let mut names = Vec::with_capacity(3);
    for (i, &pointer) in record.name_ptrs.iter().enumerate() {
        let name = shard.name_at(pointer, IP_NAME_MAX_LEN)?;
        if i > 0 && name == ABSENT {
            continue;
        }
        names.push(name);
    }

    Ok(IpMatch {
        country_code: record.country(),
        names,
        coordinates: record.coordinates(),
    })
}
