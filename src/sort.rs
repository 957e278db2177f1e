/*!
 * Deterministic ordering of file records
 */

use std::cmp::Ordering;

use crate::types::{FileRecord, SortDirection, SortKey};

/// Sort records in place by `key` with the requested direction
///
/// The comparator is total and stable: equal primary values fall back to
/// the file stem ascending (case-insensitive), regardless of direction. Descending
/// reverses only the primary comparison, never the tie-break; rename
/// numbering therefore always has one well-defined order.
pub fn order(records: &mut [FileRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let primary = match key {
            SortKey::Name => a.stem.to_lowercase().cmp(&b.stem.to_lowercase()),
            SortKey::Extension => a.extension.cmp(&b.extension),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Modified => a.modified.cmp(&b.modified),
        };
        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.stem.to_lowercase().cmp(&b.stem.to_lowercase()),
            ordering => ordering,
        }
    });
}
