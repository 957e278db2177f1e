/*!
 * Command-line interface for TidyFS
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use tidyfs::config::{Args, Command, Request};
use tidyfs::error::Result;
use tidyfs::executor::Executor;
use tidyfs::filter::Filter;
use tidyfs::plan;
use tidyfs::report::{ReportFormat, Reporter};
use tidyfs::scanner::Scanner;
use tidyfs::sort;
use tidyfs::types::{FileRecord, OperationPlan, SortDirection, SortKey};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Generate shell completions and exit
    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(command) {
        // 0 only for full success; any failed plan entry is nonzero
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one validated request end to end
fn run(command: Command) -> Result<bool> {
    let request = Request::from_command(command)?;

    match request {
        Request::Show(request) => {
            let scanner = Scanner::new(&request.root, request.recurse)?.with_directories();
            let filter = Filter::compile(&request.filter)?;

            let mut records: Vec<FileRecord> = scanner
                .scan()
                .filter(|record| request.only.map_or(true, |kind| record.kind == kind))
                .filter(|record| filter.matches(record))
                .collect();
            sort::order(&mut records, request.sort_key, request.direction);

            Reporter::new(ReportFormat::ConsoleTable).print_listing(&records);
            Ok(true)
        }

        Request::Group(request) => {
            let scanner = Scanner::new(&request.root, request.recurse)?;
            let filter = Filter::compile(&request.filter)?;

            let mut records: Vec<FileRecord> =
                scanner.scan().filter(|record| filter.matches(record)).collect();
            // Grouping has no user-facing order, but plan and report
            // output must be deterministic.
            sort::order(&mut records, SortKey::Name, SortDirection::Ascending);

            let plan = plan::build_groupby(scanner.root(), &records, &request.mapping)?;
            Ok(execute(&plan, true))
        }

        Request::Rename(request) => {
            let scanner = Scanner::new(&request.root, request.recurse)?;
            let filter = Filter::compile(&request.filter)?;

            let mut records: Vec<FileRecord> =
                scanner.scan().filter(|record| filter.matches(record)).collect();
            // Numbering follows this order directly.
            sort::order(&mut records, request.sort_key, request.direction);

            let plan = plan::build_batchrename(&records, &request.spec)?;
            Ok(execute(&plan, false))
        }
    }
}

/// Apply a validated plan with progress feedback and print the report
fn execute(plan: &OperationPlan, create_dirs: bool) -> bool {
    let progress = ProgressBar::new(plan.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap(),
    );
    progress.set_prefix("📊 Applying");

    let executor = Executor::new(create_dirs, Arc::new(progress.clone()));
    let report = executor.apply(plan);

    progress.finish_and_clear();

    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&report);

    report.is_full_success()
}
