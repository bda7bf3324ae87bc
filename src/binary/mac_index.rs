//! OUI prefix lookup over the MAC database.

use super::database::Database;
use super::format::{MacPrefixRecord, HEADER_SIZE, MAC_NAME_MAX_LEN, MAC_RECORD_SIZE};
use crate::Result;

/// Binary search for the manufacturer registered under `prefix` (24 bits).
///
/// The pivot is snapped with `pivot - pivot % 7 + 4` rather than by stride
/// multiplication, and the search stops once the window is one record wide.
/// As a result the first record is never probed when the table holds two or
/// more records, and a single-record table reports not found.
pub fn lookup(db: &Database, prefix: u32) -> Result<Option<String>> {
    let mut low = HEADER_SIZE;
    let mut high = db.names_offset();

    loop {
        let mut pivot = (low + high) / 2;
        pivot = pivot - pivot % MAC_RECORD_SIZE + HEADER_SIZE;

        // Probes past the record region would decode the names blob.
        if pivot + MAC_RECORD_SIZE > db.names_offset() {
            log::debug!("pivot {} outside record region of {}", pivot, db.name());
            return Ok(None);
        }

        let record = MacPrefixRecord::parse(db.record::<MAC_RECORD_SIZE>(pivot)?);
        if record.prefix == prefix {
            log::trace!("{:06X} matched record at {} in {}", prefix, pivot, db.name());
            return db.name_at(record.name_ptr, MAC_NAME_MAX_LEN).map(Some);
        }

        if prefix < record.prefix {
            high = pivot;
        } else {
            low = pivot;
        }

        if high - low <= MAC_RECORD_SIZE {
            return Ok(None);
        }
    }
}
