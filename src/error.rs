//! Error types shared by the file manager, strategies and organizer.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The filesystem call that was being made when an I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Stat,
    ReadDir,
    CreateFile,
    CreateFolder,
    RemoveFile,
    RemoveFolder,
    RemoveEntry,
    Rename,
    Read,
    Write,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            IoAction::Stat => "stat",
            IoAction::ReadDir => "read directory",
            IoAction::CreateFile => "create file",
            IoAction::CreateFolder => "create folder",
            IoAction::RemoveFile => "remove file",
            IoAction::RemoveFolder => "remove folder",
            IoAction::RemoveEntry => "remove entry",
            IoAction::Rename => "rename",
            IoAction::Read => "read",
            IoAction::Write => "write",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur while manipulating files.
#[derive(Debug, Error)]
pub enum FileError {
    /// An underlying filesystem call failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: IoAction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A regular expression could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Substring replacement was asked to replace the empty string.
    #[error("the substring to replace must not be empty")]
    EmptySubstring,

    /// The organizer was executed before any strategy was set.
    #[error("no strategy has been set on the organizer")]
    NoStrategy,
}

impl FileError {
    pub(crate) fn io(action: IoAction, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FileError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the OS error kind when this is an I/O failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FileError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;
