/*!
 * Plan construction for groupby and batchrename
 *
 * The builders map filtered, sorted records to destinations without
 * touching the filesystem. A plan is only handed to the executor after
 * every destination has been checked for collisions, so all fatal errors
 * surface before the first move.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Result, TidyFsError};
use crate::types::{
    FileRecord, GroupBy, GroupMapping, OperationPlan, PlanEntry, RenameSpec, SkippedEntry,
};

impl GroupMapping {
    /// Resolve the destination bucket for a record, or None to skip it
    ///
    /// Extension buckets use the mapping when one is supplied; with no
    /// mapping at all, the extension itself names the bucket. Unmapped
    /// extensions (and files without one) fall back to the default bucket
    /// when configured.
    pub fn bucket(&self, record: &FileRecord) -> Option<String> {
        match self.by {
            GroupBy::Date => {
                let mtime = DateTime::<Local>::from(record.modified);
                Some(mtime.format(&self.date_format).to_string())
            }
            GroupBy::Ext => {
                if let Some(name) = self.map.get(&record.extension) {
                    return Some(name.clone());
                }
                if self.map.is_empty() && !record.extension.is_empty() {
                    return Some(record.extension.clone());
                }
                self.default_bucket.clone()
            }
        }
    }
}

impl RenameSpec {
    /// File name for the `index`-th record in sort order
    fn file_name(&self, index: usize, extension: &str) -> String {
        let number = self.start as usize + index;
        let number = format!("{:0width$}", number, width = self.pad);
        let stem = if self.number_first {
            format!("{}{}{}", number, self.separator, self.name)
        } else {
            format!("{}{}{}", self.name, self.separator, number)
        };
        if extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, extension)
        }
    }
}

/// Build a move-to-subfolder plan for the `groupby` operation
///
/// Records without a resolvable bucket are reported as skipped, not
/// treated as errors.
pub fn build_groupby(
    root: &Path,
    records: &[FileRecord],
    mapping: &GroupMapping,
) -> Result<OperationPlan> {
    let mut plan = OperationPlan::default();

    for record in records {
        let Some(bucket) = mapping.bucket(record) else {
            plan.skipped.push(SkippedEntry {
                record: record.clone(),
                reason: "no matching bucket".to_string(),
            });
            continue;
        };
        let destination = root.join(&bucket).join(&record.name);
        push_entry(&mut plan, record, destination);
    }

    validate(&plan)?;
    Ok(plan)
}

/// Build a rename-in-place plan for the `batchrename` operation
///
/// Sequence numbers follow the order of `records`, which is why the sort
/// stage must be deterministic: it directly decides the resulting names.
pub fn build_batchrename(records: &[FileRecord], spec: &RenameSpec) -> Result<OperationPlan> {
    let mut plan = OperationPlan::default();

    for (index, record) in records.iter().enumerate() {
        let file_name = spec.file_name(index, &record.extension);
        let destination = match record.path.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        };
        push_entry(&mut plan, record, destination);
    }

    validate(&plan)?;
    Ok(plan)
}

/// Add one resolved entry, folding self-collisions into skips
fn push_entry(plan: &mut OperationPlan, record: &FileRecord, destination: PathBuf) {
    if destination == record.path {
        plan.skipped.push(SkippedEntry {
            record: record.clone(),
            reason: "already at destination".to_string(),
        });
        return;
    }
    plan.entries.push(PlanEntry {
        source: record.clone(),
        destination,
    });
}

/// Reject the whole plan if any two entries share a destination, or a
/// destination is already occupied on disk
///
/// An occupied destination is tolerated only when the occupant is itself a
/// plan source that moves away earlier in plan order; anything else would
/// overwrite it.
fn validate(plan: &OperationPlan) -> Result<()> {
    let source_order: HashMap<&Path, usize> = plan
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.source.path.as_path(), i))
        .collect();

    let mut claimed: HashMap<&Path, &PlanEntry> = HashMap::new();
    for (index, entry) in plan.entries.iter().enumerate() {
        if let Some(previous) = claimed.insert(entry.destination.as_path(), entry) {
            return Err(TidyFsError::Collision {
                first: previous.source.path.clone(),
                second: entry.source.path.clone(),
                destination: entry.destination.clone(),
            });
        }
        if entry.destination.exists() {
            let vacated_earlier = source_order
                .get(entry.destination.as_path())
                .is_some_and(|&occupant| occupant < index);
            if !vacated_earlier {
                return Err(TidyFsError::Collision {
                    first: entry.source.path.clone(),
                    second: entry.destination.clone(),
                    destination: entry.destination.clone(),
                });
            }
        }
    }
    Ok(())
}
