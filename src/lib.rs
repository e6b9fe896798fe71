//! fileorg - create, delete, rename, copy and pattern-filter files
//!
//! The [`FileManager`] wraps one-level filesystem primitives, a
//! [`FileOperationStrategy`] names a reusable batch operation built on them,
//! and a [`FileOrganizer`] holds one strategy and runs it. Progress is
//! reported through an optional [`OperationObserver`].

pub mod cli;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod file_organizer;
pub mod logging;
pub mod observer;
pub mod output;
pub mod strategy;

pub use config::{Config, ConfigError};
pub use error::{FileError, FileResult, IoAction};
pub use file_manager::{BatchReport, FileManager};
pub use file_organizer::{ExecutionReport, FileOrganizer};
pub use observer::{FileEvent, OperationObserver, TracingObserver};
pub use strategy::{FileOperationStrategy, OperationType};

pub use cli::{Cli, run_cli};
