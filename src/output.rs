//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! lines, progress tracking, summary tables and JSON reports. The
//! [`ConsoleObserver`] plugs this formatting into the file manager's event
//! stream.

use crate::file_organizer::ExecutionReport;
use crate::observer::{FileEvent, OperationObserver};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fileorg::output::OutputFormatter;
    /// OutputFormatter::success("Strategy finished");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for a run of `total` jobs.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints one row per report plus a total of affected entries.
    pub fn summary_table(reports: &[ExecutionReport]) {
        Self::header("SUMMARY");

        let width = reports
            .iter()
            .map(|r| r.strategy.len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Strategy" width

        println!(
            "{:<width$} | {:<8} | {}",
            "Strategy".bold(),
            "Category".bold(),
            "Entries".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 24));

        for report in reports {
            println!(
                "{:<width$} | {:<8} | {}",
                report.strategy,
                report.category.to_string(),
                report.affected.len().to_string().green(),
                width = width
            );
        }

        let total: usize = reports.iter().map(|r| r.affected.len()).sum();
        println!("{}", "-".repeat(width + 24));
        println!(
            "{:<width$} | {:<8} | {} {}",
            "Total".bold(),
            "",
            total.to_string().green().bold(),
            if total == 1 { "entry" } else { "entries" },
            width = width
        );
    }

    /// Renders reports as pretty-printed JSON.
    pub fn json_reports(reports: &[ExecutionReport]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(reports)
    }
}

/// Prints every file event as a styled console line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl OperationObserver for ConsoleObserver {
    fn notify(&self, event: &FileEvent) {
        match event {
            FileEvent::Failed { .. } => OutputFormatter::error(&event.to_string()),
            FileEvent::Skipped { .. } | FileEvent::AlreadyExists { .. } => {
                OutputFormatter::warning(&event.to_string())
            }
            _ => println!("   {}", event),
        }
    }
}
