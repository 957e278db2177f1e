/*!
 * Reporting functionality for tidyfs
 *
 * Renders the `show` listing and the post-execution report using the
 * tabled library for clean, consistent table rendering. The pipeline core
 * never formats output; everything user-facing goes through here.
 */

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{FileRecord, RecordKind, SkippedEntry};
use crate::utils::format_file_size;

/// A plan entry that was applied successfully
#[derive(Debug, Clone)]
pub struct AppliedEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// A plan entry that failed, with the reason kept for the report
#[derive(Debug, Clone)]
pub struct FailedEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: String,
}

/// Outcome of applying one plan
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Entries applied successfully
    pub succeeded: Vec<AppliedEntry>,
    /// Records excluded from the plan, with reasons
    pub skipped: Vec<SkippedEntry>,
    /// Entries that failed, with reasons
    pub failed: Vec<FailedEntry>,
    /// Destination directories newly created
    pub dirs_created: usize,
    /// Time taken to apply the plan
    pub duration: Duration,
}

impl ExecutionReport {
    /// True iff every plan entry was applied
    pub fn is_full_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    // Other formats could be added in the future
}

/// Report generator for listings and execution results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a directory listing for the `show` command
    pub fn generate_listing(&self, records: &[FileRecord]) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.listing_table(records),
        }
    }

    /// Print the listing to stdout
    pub fn print_listing(&self, records: &[FileRecord]) {
        println!("{}", self.generate_listing(records));
    }

    /// Generate a report string for an execution result
    pub fn generate_report(&self, report: &ExecutionReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.execution_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ExecutionReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn listing_table(&self, records: &[FileRecord]) -> String {
        #[derive(Tabled)]
        struct ListingRow {
            #[tabled(rename = "Name")]
            name: String,

            #[tabled(rename = "Type")]
            kind: String,

            #[tabled(rename = "Modified")]
            modified: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Extension")]
            extension: String,
        }

        let rows: Vec<ListingRow> = records
            .iter()
            .map(|record| ListingRow {
                name: record.name.clone(),
                kind: match record.kind {
                    RecordKind::File => "file".to_string(),
                    RecordKind::Directory => "folder".to_string(),
                },
                modified: format_timestamp(record),
                size: format_file_size(record.size),
                extension: record.extension.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn summary_table(&self, report: &ExecutionReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "✅ Applied".to_string(),
                value: report.succeeded.len().to_string(),
            },
            SummaryRow {
                key: "⏭️ Skipped".to_string(),
                value: report.skipped.len().to_string(),
            },
            SummaryRow {
                key: "❌ Failed".to_string(),
                value: report.failed.len().to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
        ];

        if report.dirs_created > 0 {
            rows.push(SummaryRow {
                key: "📂 Subfolders Created".to_string(),
                value: report.dirs_created.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn problems_table(&self, report: &ExecutionReport) -> String {
        #[derive(Tabled)]
        struct ProblemRow {
            #[tabled(rename = "File")]
            file: String,

            #[tabled(rename = "Outcome")]
            outcome: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let mut rows: Vec<ProblemRow> = report
            .failed
            .iter()
            .map(|entry| ProblemRow {
                file: entry.source.display().to_string(),
                outcome: "failed".to_string(),
                reason: entry.reason.clone(),
            })
            .collect();

        rows.extend(report.skipped.iter().map(|entry| ProblemRow {
            file: entry.record.path.display().to_string(),
            outcome: "skipped".to_string(),
            reason: entry.reason.clone(),
        }));

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn execution_report(&self, report: &ExecutionReport) -> String {
        let title = if report.is_full_success() {
            "✅  ALL OPERATIONS APPLIED"
        } else {
            "⚠️  SOME OPERATIONS FAILED"
        };

        let summary = self.summary_table(report);
        if report.failed.is_empty() && report.skipped.is_empty() {
            format!("{}\n{}", title, summary)
        } else {
            let problems = self.problems_table(report);
            format!(
                "📋  SKIPPED AND FAILED ENTRIES\n{}\n\n{}\n{}",
                problems, title, summary
            )
        }
    }
}

/// Timestamp column format, matching the listing layout of the CLI
fn format_timestamp(record: &FileRecord) -> String {
    DateTime::<Local>::from(record.modified)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}
