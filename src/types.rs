/*!
 * Core types and data structures for the tidyfs application
 */

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

use clap::ValueEnum;
use strum::Display;

/// Kind of filesystem entry captured by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Regular file (or symlink to one)
    File,
    /// Directory
    Directory,
}

/// Immutable snapshot of one filesystem entry at scan time
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// File name including extension
    pub name: String,
    /// File name without extension
    pub stem: String,
    /// Extension, lowercase, without the leading dot; empty if none
    pub extension: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Entry kind
    pub kind: RecordKind,
}

impl FileRecord {
    pub fn is_file(&self) -> bool {
        self.kind == RecordKind::File
    }
}

/// Metadata key used to order records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    /// File name (case-insensitive)
    Name,
    /// Extension (case-insensitive)
    Extension,
    /// Size in bytes
    Size,
    /// Last modification time
    Modified,
}

/// Direction of the primary comparison; ties stay name-ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Metadata value files are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GroupBy {
    /// Group by file extension
    Ext,
    /// Group by last modification date
    Date,
}

/// Bucket resolution rules for the `groupby` operation
#[derive(Debug, Clone)]
pub struct GroupMapping {
    /// Metadata value to group by
    pub by: GroupBy,
    /// Extension -> subfolder name overrides (keys lowercase)
    pub map: HashMap<String, String>,
    /// Bucket for extensions absent from the map; None drops them from
    /// the plan
    pub default_bucket: Option<String>,
    /// strftime format used for date buckets
    pub date_format: String,
}

/// Naming rules for the `batchrename` operation
#[derive(Debug, Clone)]
pub struct RenameSpec {
    /// New name stem shared by all renamed files
    pub name: String,
    /// Separator placed between the name and the number
    pub separator: String,
    /// First value of the sequence number
    pub start: u32,
    /// Place the number before the name instead of after
    pub number_first: bool,
    /// Zero-pad the number to this width (0 disables padding)
    pub pad: usize,
}

/// One planned move/rename, resolved but not yet applied
#[derive(Debug, Clone)]
pub struct PlanEntry {
    /// Record being moved or renamed
    pub source: FileRecord,
    /// Fully resolved destination path
    pub destination: PathBuf,
}

/// A record excluded from the plan, with the reason shown in the report
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub record: FileRecord,
    pub reason: String,
}

/// Fully resolved, pre-validated list of operations
#[derive(Debug, Clone, Default)]
pub struct OperationPlan {
    /// Entries in execution order
    pub entries: Vec<PlanEntry>,
    /// Records left out of the plan (no bucket, already in place)
    pub skipped: Vec<SkippedEntry>,
}

impl OperationPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
