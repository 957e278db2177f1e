/*!
 * Command-line arguments and request construction for tidyfs
 *
 * Arguments are parsed once into an immutable request structure that is
 * threaded through scan, filter, sort, plan and execute; no stage reads
 * ambient state.
 */

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::bail;
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::types::{GroupBy, GroupMapping, RecordKind, RenameSpec, SortDirection, SortKey};
use crate::utils::convert_date_format;

static MAPPING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^>]+>[^>]+$").unwrap());
static DATE_FORMAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s.-]+$").unwrap());

/// Command-line arguments for tidyfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "tidyfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Group, batch-rename and list directory contents by file metadata",
    long_about = "A file organisation tool: groups files into subfolders by extension or \
                  modification date, batch-renames files with sequence numbering, and lists \
                  directory contents with filtering and sorting."
)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Subcommands of the tidyfs CLI
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Display the contents of a directory
    Show {
        /// Directory to list (default: current working directory)
        dir: Option<PathBuf>,

        /// Metric to sort the listing by
        #[clap(long, short = 's', value_enum)]
        sort_by: Option<SortKey>,

        /// Comma-separated list of extensions to show
        #[clap(long, short = 'e')]
        extensions: Option<String>,

        /// Show only folders
        #[clap(long, short = 'd')]
        dirs: bool,

        /// Show only files
        #[clap(long, short = 'f')]
        files: bool,

        /// Sort in descending order
        #[clap(long)]
        desc: bool,

        /// Descend into subdirectories
        #[clap(long, short = 'r')]
        recurse: bool,
    },

    /// Group files into subfolders by a metadata value
    Groupby {
        /// Metadata value to group by
        #[clap(value_enum)]
        by: GroupBy,

        /// Directory to organize (default: current working directory)
        dir: Option<PathBuf>,

        /// Extension-to-subfolder mapping, "extension>folder_name"; may be
        /// given multiple times
        #[clap(long = "map", short = 'm')]
        mappings: Vec<String>,

        /// Subfolder for files whose extension has no mapping; without it
        /// such files are skipped
        #[clap(long)]
        default: Option<String>,

        /// Date format for subfolder names when grouping by date
        /// (wildcards: d, D, m, M, y, Y, month, Month)
        #[clap(long = "format", short = 'f', default_value = "D-M-Y")]
        date_format: String,

        /// Comma-separated list of extensions to group
        #[clap(long, short = 'e')]
        extensions: Option<String>,

        /// Only group files modified at or after this time
        /// (d-m-Y_H:M:S or d-m-Y)
        #[clap(long, short = 'a')]
        after: Option<String>,

        /// Only group files modified at or before this time
        #[clap(long, short = 'b')]
        before: Option<String>,

        /// Descend into subdirectories
        #[clap(long, short = 'r')]
        recurse: bool,
    },

    /// Rename all matching files with sequence numbering applied
    Batchrename {
        /// New name to use while renaming
        name: String,

        /// Directory to organize (default: current working directory)
        dir: Option<PathBuf>,

        /// Separator between the name and the number
        #[clap(long, default_value = "_")]
        sep: String,

        /// Starting point of the numbering
        #[clap(long = "num-start", short = 'S', default_value = "1")]
        num_start: u32,

        /// Place the numbering before the name
        #[clap(long = "num-first", short = 'F')]
        num_first: bool,

        /// Zero-pad the numbering to this width
        #[clap(long, short = 'p', default_value = "0")]
        pad: usize,

        /// Comma-separated list of extensions to rename
        #[clap(long, short = 'e')]
        extensions: Option<String>,

        /// Only rename files modified at or after this time
        /// (d-m-Y_H:M:S or d-m-Y)
        #[clap(long, short = 'a')]
        after: Option<String>,

        /// Only rename files modified at or before this time
        #[clap(long, short = 'b')]
        before: Option<String>,

        /// Metric that decides the numbering order
        #[clap(long, short = 's', value_enum)]
        sort_by: Option<SortKey>,

        /// Number in descending order
        #[clap(long)]
        desc: bool,

        /// Descend into subdirectories
        #[clap(long, short = 'r')]
        recurse: bool,
    },
}

/// Validated request for the `show` listing
#[derive(Debug, Clone)]
pub struct ShowRequest {
    pub root: PathBuf,
    pub recurse: bool,
    pub filter: FilterSpec,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// Restrict the listing to one entry kind; None shows both
    pub only: Option<RecordKind>,
}

/// Validated request for the `groupby` operation
#[derive(Debug, Clone)]
pub struct GroupRequest {
    pub root: PathBuf,
    pub recurse: bool,
    pub filter: FilterSpec,
    pub mapping: GroupMapping,
}

/// Validated request for the `batchrename` operation
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub root: PathBuf,
    pub recurse: bool,
    pub filter: FilterSpec,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub spec: RenameSpec,
}

/// A fully validated invocation of one pipeline operation
#[derive(Debug, Clone)]
pub enum Request {
    Show(ShowRequest),
    Group(GroupRequest),
    Rename(RenameRequest),
}

impl Request {
    /// Build a request from a parsed subcommand, validating every
    /// argument shape before anything touches the filesystem
    pub fn from_command(command: Command) -> Result<Self> {
        match command {
            Command::Show {
                dir,
                sort_by,
                extensions,
                dirs,
                files,
                desc,
                recurse,
            } => Ok(Request::Show(ShowRequest {
                root: resolve_dir(dir),
                recurse,
                filter: FilterSpec {
                    extensions,
                    ..FilterSpec::default()
                },
                sort_key: sort_by.unwrap_or(SortKey::Name),
                direction: direction_from_flag(desc),
                only: match (dirs, files) {
                    (true, false) => Some(RecordKind::Directory),
                    (false, true) => Some(RecordKind::File),
                    _ => None,
                },
            })),

            Command::Groupby {
                by,
                dir,
                mappings,
                default,
                date_format,
                extensions,
                after,
                before,
                recurse,
            } => {
                let map = parse_mappings(&mappings)?;
                if !DATE_FORMAT_PATTERN.is_match(&date_format) {
                    bail!(
                        InvalidArgument,
                        "date format \"{}\" may only contain letters, digits, spaces, \
                         \"_\", \".\" and \"-\"",
                        date_format
                    );
                }
                Ok(Request::Group(GroupRequest {
                    root: resolve_dir(dir),
                    recurse,
                    filter: FilterSpec {
                        extensions,
                        after,
                        before,
                    },
                    mapping: GroupMapping {
                        by,
                        map,
                        default_bucket: default.map(|d| d.trim().to_string()),
                        date_format: convert_date_format(&date_format),
                    },
                }))
            }

            Command::Batchrename {
                name,
                dir,
                sep,
                num_start,
                num_first,
                pad,
                extensions,
                after,
                before,
                sort_by,
                desc,
                recurse,
            } => Ok(Request::Rename(RenameRequest {
                root: resolve_dir(dir),
                recurse,
                filter: FilterSpec {
                    extensions,
                    after,
                    before,
                },
                sort_key: sort_by.unwrap_or(SortKey::Name),
                direction: direction_from_flag(desc),
                spec: RenameSpec {
                    name,
                    separator: sep,
                    start: num_start,
                    number_first: num_first,
                    pad,
                },
            })),
        }
    }
}

fn resolve_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from("."))
}

fn direction_from_flag(desc: bool) -> SortDirection {
    if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}

/// Parse "extension>folder_name" mapping arguments into a lookup table
fn parse_mappings(mappings: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for mapping in mappings {
        if !MAPPING_PATTERN.is_match(mapping) {
            bail!(
                InvalidArgument,
                "mapping \"{}\" has a wrong format; must be [extension>folder_name]",
                mapping
            );
        }
        // The pattern guarantees exactly one '>' separator.
        if let Some((extension, folder)) = mapping.split_once('>') {
            map.insert(
                extension.trim().trim_start_matches('.').to_lowercase(),
                folder.trim().to_string(),
            );
        }
    }
    Ok(map)
}
