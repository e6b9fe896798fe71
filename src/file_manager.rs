/// Primitive filesystem operations over a single directory level.
///
/// Every directory-wide operation lists the directory once, sorts the
/// snapshot by name and then works through it, so entries produced by the
/// operation itself are never visited twice. Nothing recurses: a matching
/// subdirectory is removed or renamed as a whole, and copy skips it.
use crate::error::{FileError, FileResult, IoAction};
use crate::observer::{FileEvent, OperationObserver};
use regex::bytes::Regex;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a list operation that attempts every item.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Paths that were processed successfully.
    pub succeeded: Vec<PathBuf>,
    /// Paths that failed, with the error for each.
    pub failed: Vec<(PathBuf, FileError)>,
}

impl BatchReport {
    /// Returns true if every item succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns the number of items attempted.
    pub fn total_processed(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// One entry of a directory snapshot.
struct Entry {
    file_name: OsString,
    /// Lossy form of `file_name`, used for substring tests.
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Wraps filesystem primitives with uniform error handling and optional
/// event reporting.
///
/// A `FileManager` holds no filesystem state; every call re-reads the
/// directory it operates on.
///
/// # Examples
///
/// ```no_run
/// use fileorg::file_manager::FileManager;
/// use std::path::Path;
///
/// let manager = FileManager::new();
/// manager.create_file_in_folder(Path::new("/tmp/inbox"), "notes.txt")?;
/// let removed = manager.delete_files_by_pattern(Path::new("/tmp/inbox"), "[0-9]+")?;
/// println!("removed {} entries", removed.len());
/// # Ok::<(), fileorg::FileError>(())
/// ```
#[derive(Clone, Default)]
pub struct FileManager {
    observer: Option<Arc<dyn OperationObserver>>,
}

impl fmt::Debug for FileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileManager")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl FileManager {
    /// Creates a silent file manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a file manager that reports every step to `observer`.
    pub fn with_observer(observer: Arc<dyn OperationObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    /// Creates an empty file inside `folder`, creating the folder (and its
    /// parents) first if needed.
    ///
    /// Returns `Ok(false)` without touching anything if the path already
    /// exists, `Ok(true)` if a file was created.
    pub fn create_file_in_folder(&self, folder: &Path, file_name: &str) -> FileResult<bool> {
        let file_path = folder.join(file_name);

        match fs::metadata(&file_path) {
            Ok(_) => {
                self.emit(FileEvent::AlreadyExists { path: file_path });
                return Ok(false);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.fail(IoAction::Stat, &file_path, e)),
        }

        if !folder.is_dir() {
            self.create_folder(folder)?;
        }

        File::create(&file_path).map_err(|e| self.fail(IoAction::CreateFile, &file_path, e))?;
        self.emit(FileEvent::FileCreated { path: file_path });
        Ok(true)
    }

    /// Creates `folder` and all missing parents. Succeeds if it already exists.
    pub fn create_folder(&self, folder: &Path) -> FileResult<()> {
        fs::create_dir_all(folder).map_err(|e| self.fail(IoAction::CreateFolder, folder, e))?;
        self.emit(FileEvent::FolderCreated {
            path: folder.to_path_buf(),
        });
        Ok(())
    }

    /// Deletes a single file. Fails if it does not exist.
    pub fn delete_file(&self, folder: &Path, file_name: &str) -> FileResult<()> {
        let file_path = folder.join(file_name);
        fs::remove_file(&file_path).map_err(|e| self.fail(IoAction::RemoveFile, &file_path, e))?;
        self.emit(FileEvent::FileDeleted { path: file_path });
        Ok(())
    }

    /// Deletes a file and then its (now expected to be empty) folder.
    ///
    /// A failure to delete the file is returned and the folder is left alone.
    pub fn delete_file_and_folder(&self, folder: &Path, file_name: &str) -> FileResult<()> {
        self.delete_file(folder, file_name)?;

        fs::remove_dir(folder).map_err(|e| self.fail(IoAction::RemoveFolder, folder, e))?;
        self.emit(FileEvent::FolderDeleted {
            path: folder.to_path_buf(),
        });
        Ok(())
    }

    /// Creates every named file in `folder`, continuing past failures.
    pub fn create_files_list<S: AsRef<str>>(&self, folder: &Path, file_names: &[S]) -> BatchReport {
        let mut report = BatchReport::default();
        for name in file_names {
            let name = name.as_ref();
            match self.create_file_in_folder(folder, name) {
                Ok(_) => report.succeeded.push(folder.join(name)),
                Err(e) => report.failed.push((folder.join(name), e)),
            }
        }
        report
    }

    /// Deletes every named file in `folder`, continuing past failures.
    pub fn delete_files_list<S: AsRef<str>>(&self, folder: &Path, file_names: &[S]) -> BatchReport {
        let mut report = BatchReport::default();
        for name in file_names {
            let name = name.as_ref();
            match self.delete_file(folder, name) {
                Ok(()) => report.succeeded.push(folder.join(name)),
                Err(e) => report.failed.push((folder.join(name), e)),
            }
        }
        report
    }

    /// Removes every entry of `base_path` whose name contains `substring`.
    ///
    /// Matching subdirectories are removed with their contents. Stops at the
    /// first failure; entries removed before it stay removed.
    pub fn delete_files_by_substring(
        &self,
        base_path: &Path,
        substring: &str,
    ) -> FileResult<Vec<PathBuf>> {
        let entries = self.list_entries(base_path)?;
        let mut removed = Vec::new();
        for entry in entries.into_iter().filter(|e| e.name.contains(substring)) {
            self.remove_entry(&entry)?;
            removed.push(entry.path);
        }
        Ok(removed)
    }

    /// Renames every entry whose name contains `old`, replacing all of its
    /// occurrences with `new`.
    ///
    /// Returns `(from, to)` for each rename performed. A target name that is
    /// already taken stops the pass with an `AlreadyExists` error instead of
    /// replacing the existing entry.
    pub fn rename_files_by_substring(
        &self,
        base_path: &Path,
        old: &str,
        new: &str,
    ) -> FileResult<Vec<(PathBuf, PathBuf)>> {
        if old.is_empty() {
            return Err(FileError::EmptySubstring);
        }

        let entries = self.list_entries(base_path)?;
        let mut renamed = Vec::new();
        for entry in entries.into_iter().filter(|e| e.name.contains(old)) {
            let Some(name) = entry.file_name.to_str() else {
                self.emit(FileEvent::Skipped {
                    path: entry.path,
                    reason: "name is not valid UTF-8".to_string(),
                });
                continue;
            };
            let new_name = name.replace(old, new);
            if new_name == name {
                continue;
            }
            if new_name.is_empty() {
                self.emit(FileEvent::Skipped {
                    path: entry.path,
                    reason: "replacement would leave an empty name".to_string(),
                });
                continue;
            }
            let to = base_path.join(&new_name);
            self.rename_entry(&entry.path, &to)?;
            renamed.push((entry.path, to));
        }
        Ok(renamed)
    }

    /// Removes every entry of `base_path` whose name contains a match for the
    /// regular expression `pattern`.
    ///
    /// Names are matched as raw bytes, so entries whose names are not valid
    /// UTF-8 are still candidates. The pattern is compiled before the
    /// directory is read, so an invalid pattern never causes any mutation.
    pub fn delete_files_by_pattern(
        &self,
        base_path: &Path,
        pattern: &str,
    ) -> FileResult<Vec<PathBuf>> {
        let regex = Regex::new(pattern).map_err(|source| FileError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let entries = self.list_entries(base_path)?;
        let mut removed = Vec::new();
        let matches = |e: &Entry| regex.is_match(e.file_name.as_encoded_bytes());
        for entry in entries.into_iter().filter(matches) {
            self.remove_entry(&entry)?;
            removed.push(entry.path);
        }
        Ok(removed)
    }

    /// Prepends `prefix` to the name of every entry of `base_path`.
    ///
    /// Fails with `AlreadyExists` as soon as a prefixed name is taken; entries
    /// renamed before that keep their new name.
    pub fn add_prefix_to_files(
        &self,
        base_path: &Path,
        prefix: &str,
    ) -> FileResult<Vec<(PathBuf, PathBuf)>> {
        let entries = self.list_entries(base_path)?;
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let mut renamed = Vec::new();
        for entry in entries {
            let mut new_name = OsString::from(prefix);
            new_name.push(&entry.file_name);
            let to = base_path.join(new_name);
            self.rename_entry(&entry.path, &to)?;
            renamed.push((entry.path, to));
        }
        Ok(renamed)
    }

    /// Copies every regular file of `src_path` into `dest_path`, creating the
    /// destination if needed. Subdirectories are skipped.
    ///
    /// Returns the destination path of each copied file.
    pub fn copy_files_to_new_dir(
        &self,
        src_path: &Path,
        dest_path: &Path,
    ) -> FileResult<Vec<PathBuf>> {
        let entries = self.list_entries(src_path)?;

        if !dest_path.is_dir() {
            self.create_folder(dest_path)?;
        }

        let mut copied = Vec::new();
        for entry in entries {
            // is_dir() follows symlinks, entry.is_dir does not
            if entry.is_dir || entry.path.is_dir() {
                self.emit(FileEvent::Skipped {
                    path: entry.path,
                    reason: "subdirectories are not copied".to_string(),
                });
                continue;
            }
            let target = dest_path.join(&entry.file_name);
            self.copy_file_content(&entry.path, &target)?;
            copied.push(target);
        }
        Ok(copied)
    }

    /// Reads all of `src` and writes it to `dest`, replacing any existing
    /// content. Returns the number of bytes written.
    pub fn copy_file_content(&self, src: &Path, dest: &Path) -> FileResult<u64> {
        let data = fs::read(src).map_err(|e| self.fail(IoAction::Read, src, e))?;
        fs::write(dest, &data).map_err(|e| self.fail(IoAction::Write, dest, e))?;

        let bytes = data.len() as u64;
        self.emit(FileEvent::FileCopied {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            bytes,
        });
        Ok(bytes)
    }

    /// Lists one directory level, sorted by name.
    fn list_entries(&self, dir: &Path) -> FileResult<Vec<Entry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| self.fail(IoAction::ReadDir, dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| self.fail(IoAction::ReadDir, dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| self.fail(IoAction::Stat, &path, e))?;

            let file_name = entry.file_name();
            entries.push(Entry {
                name: file_name.to_string_lossy().into_owned(),
                file_name,
                path,
                is_dir: file_type.is_dir(),
            });
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::trace!(dir = %dir.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }

    fn remove_entry(&self, entry: &Entry) -> FileResult<()> {
        let result = if entry.is_dir {
            fs::remove_dir_all(&entry.path)
        } else {
            fs::remove_file(&entry.path)
        };
        result.map_err(|e| self.fail(IoAction::RemoveEntry, &entry.path, e))?;
        self.emit(FileEvent::EntryRemoved {
            path: entry.path.clone(),
        });
        Ok(())
    }

    /// Renames `from` to `to`, refusing to replace an existing entry.
    fn rename_entry(&self, from: &Path, to: &Path) -> FileResult<()> {
        match fs::symlink_metadata(to) {
            Ok(_) => {
                let taken = io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", to.display()),
                );
                return Err(self.fail(IoAction::Rename, from, taken));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.fail(IoAction::Stat, to, e)),
        }

        fs::rename(from, to).map_err(|e| self.fail(IoAction::Rename, from, e))?;
        self.emit(FileEvent::EntryRenamed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    fn emit(&self, event: FileEvent) {
        if let Some(observer) = &self.observer {
            observer.notify(&event);
        }
    }

    /// Builds an I/O error and reports it before it is returned.
    fn fail(&self, action: IoAction, path: &Path, source: io::Error) -> FileError {
        let error = FileError::io(action, path, source);
        self.emit(FileEvent::Failed {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
        error
    }
}
