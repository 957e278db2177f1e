/*!
 * Filter compilation and evaluation
 *
 * User-supplied filter arguments are compiled once into a closed set of
 * predicate variants; evaluation over a record is pure and never fails.
 */

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::bail;
use crate::error::Result;
use crate::types::FileRecord;

/// Timestamp format accepted by `--after`/`--before`
pub const DATETIME_FORMAT: &str = "%d-%m-%Y_%H:%M:%S";
/// Bare-date shorthand, interpreted as midnight
pub const DATE_FORMAT: &str = "%d-%m-%Y";

static EXTENSION_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+$").unwrap());

/// Unparsed filter arguments as received from the CLI
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Comma-separated extension list, e.g. "jpg,png"
    pub extensions: Option<String>,
    /// Lower modification-time bound (inclusive)
    pub after: Option<String>,
    /// Upper modification-time bound (inclusive)
    pub before: Option<String>,
}

/// A compiled filter condition over one record
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Record's extension is a member of the normalized set
    ExtensionIn(HashSet<String>),
    /// Record's modification time lies within the bounds, inclusive;
    /// either side may be open
    ModifiedBetween(Option<NaiveDateTime>, Option<NaiveDateTime>),
}

impl Predicate {
    /// Evaluate the predicate against a record snapshot
    pub fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Predicate::ExtensionIn(set) => {
                record.is_file() && !record.extension.is_empty() && set.contains(&record.extension)
            }
            Predicate::ModifiedBetween(start, end) => {
                let mtime = local_naive(record);
                start.map_or(true, |s| mtime >= s) && end.map_or(true, |e| mtime <= e)
            }
        }
    }
}

/// Conjunction of all predicates compiled from one filter spec
#[derive(Debug, Clone, Default)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Compile a filter spec, normalizing and validating every argument
    ///
    /// Fails with `InvalidFilter` naming the offending token; a spec with
    /// no arguments compiles to a filter that matches every file.
    pub fn compile(spec: &FilterSpec) -> Result<Self> {
        let mut predicates = Vec::new();

        if let Some(raw) = &spec.extensions {
            predicates.push(Predicate::ExtensionIn(parse_extensions(raw)?));
        }

        let start = spec.after.as_deref().map(parse_bound).transpose()?;
        let end = spec.before.as_deref().map(parse_bound).transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                bail!(
                    InvalidFilter,
                    "--before ({}) cannot be earlier than --after ({})",
                    end,
                    start
                );
            }
        }
        if start.is_some() || end.is_some() {
            predicates.push(Predicate::ModifiedBetween(start, end));
        }

        Ok(Self { predicates })
    }

    /// True iff the record satisfies every compiled predicate
    pub fn matches(&self, record: &FileRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

/// Record mtime as a naive local timestamp, comparable to parsed bounds
fn local_naive(record: &FileRecord) -> NaiveDateTime {
    DateTime::<Local>::from(record.modified).naive_local()
}

/// Normalize a comma-separated extension list: strip dots, lowercase,
/// deduplicate
fn parse_extensions(raw: &str) -> Result<HashSet<String>> {
    let mut set = HashSet::new();
    for token in raw.split(',') {
        let normalized = token.trim().trim_start_matches('.').to_lowercase();
        if !EXTENSION_TOKEN.is_match(&normalized) {
            bail!(
                InvalidFilter,
                "\"{}\" is not a valid extension; must be alphanumeric, e.g. \"jpg\"",
                token.trim()
            );
        }
        set.insert(normalized);
    }
    Ok(set)
}

/// Parse one date bound, accepting the full timestamp format and the
/// bare-date shorthand
fn parse_bound(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default());
    }
    bail!(
        InvalidFilter,
        "value \"{}\" must match format \"{}\" or \"{}\"",
        raw,
        DATETIME_FORMAT,
        DATE_FORMAT
    )
}
