/*!
 * Plan execution
 *
 * Applies a validated plan entry by entry. Each move is an independent
 * filesystem call: a failing entry is recorded and the remaining entries
 * are still attempted. Already-applied entries are never rolled back;
 * partial results are surfaced through the report instead.
 */

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::report::{AppliedEntry, ExecutionReport, FailedEntry};
use crate::types::OperationPlan;

/// Executor for operation plans
pub struct Executor {
    /// Create missing destination directories before moving (groupby)
    create_dirs: bool,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Executor {
    /// Create a new executor
    pub fn new(create_dirs: bool, progress: Arc<ProgressBar>) -> Self {
        Self {
            create_dirs,
            progress,
        }
    }

    /// Apply every plan entry in order, best-effort
    pub fn apply(&self, plan: &OperationPlan) -> ExecutionReport {
        let start_time = Instant::now();
        let mut report = ExecutionReport {
            skipped: plan.skipped.clone(),
            ..ExecutionReport::default()
        };

        for entry in &plan.entries {
            self.progress.inc(1);
            self.progress
                .set_message(format!("Current file: {}", entry.source.name));

            if self.create_dirs {
                if let Some(parent) = entry.destination.parent() {
                    if !parent.exists() {
                        // A bucket name may contain separators; count every
                        // directory that is about to be created, not the
                        // create_dir_all call.
                        let missing = parent.ancestors().take_while(|p| !p.exists()).count();
                        match fs::create_dir_all(parent) {
                            Ok(()) => report.dirs_created += missing,
                            Err(e) => {
                                report.failed.push(FailedEntry {
                                    source: entry.source.path.clone(),
                                    destination: entry.destination.clone(),
                                    reason: format!(
                                        "cannot create {}: {}",
                                        parent.display(),
                                        e
                                    ),
                                });
                                continue;
                            }
                        }
                    }
                }
            }

            match fs::rename(&entry.source.path, &entry.destination) {
                Ok(()) => report.succeeded.push(AppliedEntry {
                    source: entry.source.path.clone(),
                    destination: entry.destination.clone(),
                }),
                Err(e) => report.failed.push(FailedEntry {
                    source: entry.source.path.clone(),
                    destination: entry.destination.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        report.duration = start_time.elapsed();
        report
    }
}
