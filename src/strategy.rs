//! Named batch operations built on top of [`FileManager`].
//!
//! Strategies are a closed set. Each variant carries its own parameters and
//! runs exactly one pass over its target directory when executed.

use crate::error::FileResult;
use crate::file_manager::FileManager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Pattern used to find entries with a digit run in their name.
pub const NUMBERED_NAME_PATTERN: &str = "[0-9]+";

/// Pattern that matches every entry name.
pub const MATCH_ALL_PATTERN: &str = ".*";

/// Broad category of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Delete,
    Move,
    Rename,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Create => "create",
            OperationType::Delete => "delete",
            OperationType::Move => "move",
            OperationType::Rename => "rename",
        };
        f.write_str(name)
    }
}

/// A parameterized batch operation over one directory.
///
/// Deserializes from a table tagged with `strategy`:
///
/// ```toml
/// strategy = "create_files_by_counter"
/// path = "./out"
/// file_name = "f"
/// start = 1
/// end = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FileOperationStrategy {
    /// Prefix every entry with `_`.
    AddUnderscorePrefix { path: PathBuf },
    /// Remove every entry with a digit in its name.
    DeleteFilesWithNumbersInName { path: PathBuf },
    /// Create `file_name{i}` for every `i` in `start..=end`.
    CreateFilesByCounter {
        path: PathBuf,
        file_name: String,
        start: i64,
        end: i64,
    },
    /// Replace every occurrence of `old` with `new` in entry names.
    RenameFilesWithSubstring {
        path: PathBuf,
        old: String,
        new: String,
    },
    /// Remove every entry.
    DeleteAllFiles { path: PathBuf },
}

impl FileOperationStrategy {
    /// Stable identifier, identical to the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddUnderscorePrefix { .. } => "add_underscore_prefix",
            Self::DeleteFilesWithNumbersInName { .. } => "delete_files_with_numbers_in_name",
            Self::CreateFilesByCounter { .. } => "create_files_by_counter",
            Self::RenameFilesWithSubstring { .. } => "rename_files_with_substring",
            Self::DeleteAllFiles { .. } => "delete_all_files",
        }
    }

    pub fn category(&self) -> OperationType {
        match self {
            Self::AddUnderscorePrefix { .. } => OperationType::Rename,
            Self::DeleteFilesWithNumbersInName { .. } => OperationType::Delete,
            Self::CreateFilesByCounter { .. } => OperationType::Create,
            Self::RenameFilesWithSubstring { .. } => OperationType::Move,
            Self::DeleteAllFiles { .. } => OperationType::Delete,
        }
    }

    /// The directory this strategy operates on.
    pub fn target(&self) -> &Path {
        match self {
            Self::AddUnderscorePrefix { path }
            | Self::DeleteFilesWithNumbersInName { path }
            | Self::CreateFilesByCounter { path, .. }
            | Self::RenameFilesWithSubstring { path, .. }
            | Self::DeleteAllFiles { path } => path.as_path(),
        }
    }

    /// Runs the strategy against `manager`.
    ///
    /// Returns the affected paths: the new path of each renamed or created
    /// entry, or the old path of each removed one. The first error aborts the
    /// pass; work done before it is kept.
    pub fn execute(&self, manager: &FileManager) -> FileResult<Vec<PathBuf>> {
        tracing::debug!(
            strategy = self.name(),
            target = %self.target().display(),
            "executing strategy"
        );

        match self {
            Self::AddUnderscorePrefix { path } => Ok(manager
                .add_prefix_to_files(path, "_")?
                .into_iter()
                .map(|(_, to)| to)
                .collect()),
            Self::DeleteFilesWithNumbersInName { path } => {
                manager.delete_files_by_pattern(path, NUMBERED_NAME_PATTERN)
            }
            Self::CreateFilesByCounter {
                path,
                file_name,
                start,
                end,
            } => {
                let mut created = Vec::new();
                for i in *start..=*end {
                    let name = format!("{}{}", file_name, i);
                    if manager.create_file_in_folder(path, &name)? {
                        created.push(path.join(name));
                    }
                }
                Ok(created)
            }
            Self::RenameFilesWithSubstring { path, old, new } => Ok(manager
                .rename_files_by_substring(path, old, new)?
                .into_iter()
                .map(|(_, to)| to)
                .collect()),
            Self::DeleteAllFiles { path } => {
                manager.delete_files_by_pattern(path, MATCH_ALL_PATTERN)
            }
        }
    }
}

impl fmt::Display for FileOperationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.target().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use std::fs;
    use tempfile::TempDir;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_categories() {
        let path = PathBuf::from("x");
        assert_eq!(
            FileOperationStrategy::AddUnderscorePrefix { path: path.clone() }.category(),
            OperationType::Rename
        );
        assert_eq!(
            FileOperationStrategy::RenameFilesWithSubstring {
                path: path.clone(),
                old: "a".into(),
                new: "b".into(),
            }
            .category(),
            OperationType::Move
        );
        assert_eq!(
            FileOperationStrategy::DeleteAllFiles { path }.category(),
            OperationType::Delete
        );
    }

    #[test]
    fn test_create_files_by_counter_inclusive_range() {
        let temp_dir = TempDir::new().unwrap();
        let strategy = FileOperationStrategy::CreateFilesByCounter {
            path: temp_dir.path().to_path_buf(),
            file_name: "f".to_string(),
            start: 1,
            end: 3,
        };

        let created = strategy.execute(&FileManager::new()).unwrap();

        assert_eq!(created.len(), 3);
        assert_eq!(names(temp_dir.path()), vec!["f1", "f2", "f3"]);
    }

    #[test]
    fn test_create_files_by_counter_empty_range() {
        let temp_dir = TempDir::new().unwrap();
        let strategy = FileOperationStrategy::CreateFilesByCounter {
            path: temp_dir.path().to_path_buf(),
            file_name: "f".to_string(),
            start: 5,
            end: 4,
        };

        assert!(strategy.execute(&FileManager::new()).unwrap().is_empty());
        assert!(names(temp_dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_create_files_by_counter_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        // dangling link: looks absent, but creating through it fails
        std::os::unix::fs::symlink(dir.join("no_such_dir").join("x"), dir.join("f2")).unwrap();

        let strategy = FileOperationStrategy::CreateFilesByCounter {
            path: dir.to_path_buf(),
            file_name: "f".to_string(),
            start: 1,
            end: 3,
        };
        let err = strategy.execute(&FileManager::new()).unwrap_err();

        assert!(matches!(err, FileError::Io { .. }));
        assert!(dir.join("f1").is_file());
        assert!(!dir.join("f3").exists());
    }

    #[test]
    fn test_delete_numbered_keeps_alphabetic_names() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a1", "b", "c22d", "e"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let strategy = FileOperationStrategy::DeleteFilesWithNumbersInName {
            path: temp_dir.path().to_path_buf(),
        };
        strategy.execute(&FileManager::new()).unwrap();

        assert_eq!(names(temp_dir.path()), vec!["b", "e"]);
    }

    #[test]
    fn test_delete_all_then_rerun_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let strategy = FileOperationStrategy::DeleteAllFiles {
            path: temp_dir.path().to_path_buf(),
        };
        let manager = FileManager::new();

        assert_eq!(strategy.execute(&manager).unwrap().len(), 2);
        assert!(strategy.execute(&manager).unwrap().is_empty());
        assert!(names(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_deserialize_tagged_strategy() {
        let strategy: FileOperationStrategy = toml::from_str(
            r#"
            strategy = "rename_files_with_substring"
            path = "/data"
            old = "draft"
            new = "final"
            "#,
        )
        .unwrap();

        assert_eq!(
            strategy,
            FileOperationStrategy::RenameFilesWithSubstring {
                path: PathBuf::from("/data"),
                old: "draft".to_string(),
                new: "final".to_string(),
            }
        );
        assert_eq!(strategy.name(), "rename_files_with_substring");
    }
}
