/// Context object that holds one strategy and runs it on demand.
///
/// The organizer keeps exactly one strategy; setting a new one replaces the
/// old. Each execution builds a fresh [`FileManager`] sharing the
/// organizer's observer.
use crate::error::{FileError, FileResult};
use crate::file_manager::FileManager;
use crate::observer::OperationObserver;
use crate::strategy::{FileOperationStrategy, OperationType};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Summary of a single strategy execution.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    /// RFC 3339 timestamp of when the execution finished.
    pub timestamp: String,
    /// Identifier of the strategy that ran.
    pub strategy: &'static str,
    pub category: OperationType,
    /// Directory the strategy operated on.
    pub target: PathBuf,
    /// Paths created, renamed into, or removed.
    pub affected: Vec<PathBuf>,
}

/// Runs a [`FileOperationStrategy`] against a fresh [`FileManager`].
///
/// # Examples
///
/// ```no_run
/// use fileorg::{FileOperationStrategy, FileOrganizer};
/// use std::path::PathBuf;
///
/// let mut organizer = FileOrganizer::new();
/// organizer.set_strategy(FileOperationStrategy::AddUnderscorePrefix {
///     path: PathBuf::from("/path/to/inbox"),
/// });
///
/// match organizer.execute_strategy() {
///     Ok(affected) => println!("{} entries renamed", affected.len()),
///     Err(e) => eprintln!("Strategy failed: {}", e),
/// }
/// ```
#[derive(Default)]
pub struct FileOrganizer {
    strategy: Option<FileOperationStrategy>,
    observer: Option<Arc<dyn OperationObserver>>,
}

impl fmt::Debug for FileOrganizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOrganizer")
            .field("strategy", &self.strategy)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl FileOrganizer {
    /// Creates an organizer with no strategy and no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an organizer whose file managers report to `observer`.
    pub fn with_observer(observer: Arc<dyn OperationObserver>) -> Self {
        Self {
            strategy: None,
            observer: Some(observer),
        }
    }

    /// Replaces the current strategy.
    pub fn set_strategy(&mut self, strategy: FileOperationStrategy) {
        self.strategy = Some(strategy);
    }

    /// Returns the current strategy, if any.
    pub fn strategy(&self) -> Option<&FileOperationStrategy> {
        self.strategy.as_ref()
    }

    /// Executes the current strategy and returns the affected paths.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::NoStrategy`] if no strategy has been set, or the
    /// first error raised by the strategy itself.
    pub fn execute_strategy(&self) -> FileResult<Vec<PathBuf>> {
        let strategy = self.strategy.as_ref().ok_or(FileError::NoStrategy)?;
        let manager = match &self.observer {
            Some(observer) => FileManager::with_observer(Arc::clone(observer)),
            None => FileManager::new(),
        };
        strategy.execute(&manager)
    }

    /// Executes the current strategy and wraps the result in a report.
    pub fn execute_report(&self) -> FileResult<ExecutionReport> {
        let strategy = self.strategy.as_ref().ok_or(FileError::NoStrategy)?;
        let affected = self.execute_strategy()?;
        Ok(ExecutionReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            strategy: strategy.name(),
            category: strategy.category(),
            target: strategy.target().to_path_buf(),
            affected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_execute_without_strategy_fails() {
        let organizer = FileOrganizer::new();
        let result = organizer.execute_strategy();
        assert!(matches!(result, Err(FileError::NoStrategy)));
    }

    #[test]
    fn test_last_strategy_wins() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a1.txt"), "x").expect("Failed to write test file");
        fs::write(base_path.join("b.txt"), "x").expect("Failed to write test file");

        let mut organizer = FileOrganizer::new();
        organizer.set_strategy(FileOperationStrategy::DeleteAllFiles {
            path: base_path.to_path_buf(),
        });
        organizer.set_strategy(FileOperationStrategy::DeleteFilesWithNumbersInName {
            path: base_path.to_path_buf(),
        });

        let removed = organizer.execute_strategy().expect("Strategy failed");

        assert_eq!(removed, vec![base_path.join("a1.txt")]);
        assert!(base_path.join("b.txt").exists());
    }

    #[test]
    fn test_execute_report_describes_run() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("x.txt"), "x").expect("Failed to write test file");

        let mut organizer = FileOrganizer::new();
        organizer.set_strategy(FileOperationStrategy::AddUnderscorePrefix {
            path: base_path.to_path_buf(),
        });

        let report = organizer.execute_report().expect("Strategy failed");

        assert_eq!(report.strategy, "add_underscore_prefix");
        assert_eq!(report.category, OperationType::Rename);
        assert_eq!(report.affected, vec![base_path.join("_x.txt")]);
        assert!(!report.timestamp.is_empty());
    }
}
