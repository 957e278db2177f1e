/*!
 * TidyFS - Organize directory contents by file metadata
 *
 * This library implements a filter-sort-transform pipeline over local
 * files: records are scanned into immutable snapshots, filtered by
 * declarative predicates, ordered deterministically, mapped to a
 * destination plan, and only then applied to the filesystem.
 */

pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod plan;
pub mod report;
pub mod scanner;
pub mod sort;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, Command, GroupRequest, RenameRequest, Request, ShowRequest};
pub use error::{Result, TidyFsError};
pub use executor::Executor;
pub use filter::{Filter, FilterSpec, Predicate};
pub use report::{ExecutionReport, ReportFormat, Reporter};
pub use scanner::Scanner;
pub use sort::order;
pub use types::{
    FileRecord, GroupBy, GroupMapping, OperationPlan, PlanEntry, RecordKind, RenameSpec,
    SortDirection, SortKey,
};
pub use utils::{convert_date_format, format_file_size};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
