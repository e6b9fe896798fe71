//! Command-line interface module for fileorg.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Mapping subcommands onto strategies
//! - Running configured job lists
//! - Reporting results as text or JSON

use crate::config::Config;
use crate::file_manager::FileManager;
use crate::file_organizer::{ExecutionReport, FileOrganizer};
use crate::observer::{OperationObserver, TracingObserver};
use crate::output::{ConsoleObserver, OutputFormatter};
use crate::strategy::{FileOperationStrategy, OperationType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Create, delete, rename and copy files in a directory.
#[derive(Debug, Parser)]
#[command(name = "fileorg", version, about)]
pub struct Cli {
    /// Path to a configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log everything, down to trace level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print execution reports as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Prefix every entry in DIR with an underscore.
    Prefix { dir: PathBuf },
    /// Delete every entry in DIR with a digit in its name.
    StripNumbers { dir: PathBuf },
    /// Create NAME{START}..NAME{END} in DIR.
    Create {
        dir: PathBuf,
        name: String,
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
    },
    /// Replace OLD with NEW in the name of every entry in DIR.
    Rename {
        dir: PathBuf,
        old: String,
        new: String,
    },
    /// Delete every entry in DIR.
    Clear { dir: PathBuf },
    /// Copy every file in SRC into DEST.
    Copy { src: PathBuf, dest: PathBuf },
    /// Run the jobs listed in the configuration file.
    Run,
}

impl Command {
    /// Returns the strategy for single-strategy commands.
    pub fn strategy(&self) -> Option<FileOperationStrategy> {
        let strategy = match self.clone() {
            Command::Prefix { dir } => FileOperationStrategy::AddUnderscorePrefix { path: dir },
            Command::StripNumbers { dir } => {
                FileOperationStrategy::DeleteFilesWithNumbersInName { path: dir }
            }
            Command::Create {
                dir,
                name,
                start,
                end,
            } => FileOperationStrategy::CreateFilesByCounter {
                path: dir,
                file_name: name,
                start,
                end,
            },
            Command::Rename { dir, old, new } => {
                FileOperationStrategy::RenameFilesWithSubstring { path: dir, old, new }
            }
            Command::Clear { dir } => FileOperationStrategy::DeleteAllFiles { path: dir },
            Command::Copy { .. } | Command::Run => return None,
        };
        Some(strategy)
    }
}

/// Runs the CLI application with the parsed arguments and loaded
/// configuration.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use fileorg::cli::{run_cli, Cli};
/// use fileorg::config::Config;
///
/// let cli = Cli::parse_from(["fileorg", "prefix", "/path/to/inbox"]);
/// match run_cli(&cli, &Config::default()) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli, config: &Config) -> Result<(), String> {
    let observer: Arc<dyn OperationObserver> =
        if config.logging.console && !cli.json && !cli.quiet {
            Arc::new(ConsoleObserver)
        } else {
            Arc::new(TracingObserver)
        };

    let reports = match &cli.command {
        Command::Run => run_jobs(&config.jobs, observer, cli.json || cli.quiet)?,
        Command::Copy { src, dest } => {
            let manager = FileManager::with_observer(observer);
            let copied = manager
                .copy_files_to_new_dir(src, dest)
                .map_err(|e| format!("Error copying {}: {}", src.display(), e))?;
            vec![ExecutionReport {
                timestamp: chrono::Utc::now().to_rfc3339(),
                strategy: "copy_files_to_new_dir",
                category: OperationType::Create,
                target: dest.clone(),
                affected: copied,
            }]
        }
        command => {
            let strategy = command
                .strategy()
                .ok_or_else(|| "Command does not map to a strategy".to_string())?;
            let mut organizer = FileOrganizer::with_observer(observer);
            organizer.set_strategy(strategy.clone());
            let report = organizer
                .execute_report()
                .map_err(|e| format!("Error running {}: {}", strategy, e))?;
            vec![report]
        }
    };

    if cli.json {
        let json = OutputFormatter::json_reports(&reports)
            .map_err(|e| format!("Error serializing report: {}", e))?;
        println!("{}", json);
    } else if !cli.quiet {
        if reports.len() > 1 {
            OutputFormatter::summary_table(&reports);
        }
        for report in &reports {
            OutputFormatter::success(&format!(
                "{}: {} {} in {}",
                report.strategy,
                report.affected.len(),
                if report.affected.len() == 1 { "entry" } else { "entries" },
                report.target.display()
            ));
        }
    }

    Ok(())
}

/// Runs each job in order, stopping at the first failure.
fn run_jobs(
    jobs: &[FileOperationStrategy],
    observer: Arc<dyn OperationObserver>,
    hide_progress: bool,
) -> Result<Vec<ExecutionReport>, String> {
    if jobs.is_empty() {
        return Err(
            "No jobs configured. Add [[jobs]] entries to the configuration file.".to_string(),
        );
    }

    let pb = if hide_progress {
        indicatif::ProgressBar::hidden()
    } else {
        OutputFormatter::info(&format!("Running {} jobs", jobs.len()));
        OutputFormatter::create_progress_bar(jobs.len() as u64)
    };

    let mut organizer = FileOrganizer::with_observer(observer);
    let mut reports = Vec::with_capacity(jobs.len());

    for (index, job) in jobs.iter().enumerate() {
        pb.set_message(job.name());
        organizer.set_strategy(job.clone());

        let report = pb.suspend(|| organizer.execute_report()).map_err(|e| {
            pb.abandon();
            format!("Job {} ({}) failed: {}", index + 1, job, e)
        })?;
        tracing::info!(
            job = index + 1,
            strategy = job.name(),
            affected = report.affected.len(),
            "job finished"
        );

        reports.push(report);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(reports)
}
