/// Structured reporting for file operations.
///
/// The file manager never prints. Each completed (or failed) step is turned
/// into a [`FileEvent`] and handed to an optional [`OperationObserver`],
/// which decides how, or whether, to present it.
use std::fmt;
use std::path::PathBuf;

/// A single outcome reported by the file manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// An empty file was created.
    FileCreated { path: PathBuf },
    /// A file creation was skipped because the path already exists.
    AlreadyExists { path: PathBuf },
    /// A folder (and any missing parents) was created.
    FolderCreated { path: PathBuf },
    /// A single file was deleted.
    FileDeleted { path: PathBuf },
    /// An empty folder was deleted.
    FolderDeleted { path: PathBuf },
    /// A directory entry (file or whole subtree) was removed by a filter.
    EntryRemoved { path: PathBuf },
    /// A directory entry was renamed in place.
    EntryRenamed { from: PathBuf, to: PathBuf },
    /// File content was copied.
    FileCopied { from: PathBuf, to: PathBuf, bytes: u64 },
    /// An entry was deliberately left untouched.
    Skipped { path: PathBuf, reason: String },
    /// A step failed; the error is also returned to the caller.
    Failed { path: PathBuf, message: String },
}

impl FileEvent {
    /// Returns true for [`FileEvent::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, FileEvent::Failed { .. })
    }
}

impl fmt::Display for FileEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileEvent::FileCreated { path } => write!(f, "Created file {}", path.display()),
            FileEvent::AlreadyExists { path } => {
                write!(f, "File {} already exists", path.display())
            }
            FileEvent::FolderCreated { path } => write!(f, "Created folder {}", path.display()),
            FileEvent::FileDeleted { path } => write!(f, "Deleted file {}", path.display()),
            FileEvent::FolderDeleted { path } => write!(f, "Deleted folder {}", path.display()),
            FileEvent::EntryRemoved { path } => write!(f, "Removed {}", path.display()),
            FileEvent::EntryRenamed { from, to } => {
                write!(f, "Renamed {} -> {}", from.display(), to.display())
            }
            FileEvent::FileCopied { from, to, bytes } => write!(
                f,
                "Copied {} -> {} ({} bytes)",
                from.display(),
                to.display(),
                bytes
            ),
            FileEvent::Skipped { path, reason } => {
                write!(f, "Skipped {}: {}", path.display(), reason)
            }
            FileEvent::Failed { path, message } => {
                write!(f, "Failed on {}: {}", path.display(), message)
            }
        }
    }
}

/// A sink for [`FileEvent`]s.
pub trait OperationObserver: Send + Sync {
    fn notify(&self, event: &FileEvent);
}

/// Forwards events to `tracing`. Failures are logged at `warn`, skips at
/// `debug`, everything else at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl OperationObserver for TracingObserver {
    fn notify(&self, event: &FileEvent) {
        match event {
            FileEvent::Failed { path, message } => {
                tracing::warn!(path = %path.display(), error = %message, "file operation failed");
            }
            FileEvent::Skipped { path, reason } => {
                tracing::debug!(path = %path.display(), reason = %reason, "entry skipped");
            }
            FileEvent::EntryRenamed { from, to } => {
                tracing::info!(from = %from.display(), to = %to.display(), "entry renamed");
            }
            FileEvent::FileCopied { from, to, bytes } => {
                tracing::info!(from = %from.display(), to = %to.display(), bytes, "file copied");
            }
            other => tracing::info!("{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = FileEvent::EntryRenamed {
            from: PathBuf::from("a/old.txt"),
            to: PathBuf::from("a/new.txt"),
        };
        assert_eq!(event.to_string(), "Renamed a/old.txt -> a/new.txt");
    }

    #[test]
    fn test_only_failed_is_failure() {
        let failed = FileEvent::Failed {
            path: PathBuf::from("x"),
            message: "boom".to_string(),
        };
        let created = FileEvent::FileCreated {
            path: PathBuf::from("x"),
        };
        assert!(failed.is_failure());
        assert!(!created.is_failure());
    }
}
