//! Deferred cleanup work handed to the host.
//!
//! Log cleanups ([`CleanupAction::SingleFile`], [`CleanupAction::Group`]) are
//! best-effort: a failed delete is recorded and the batch carries on.
//! [`CleanupAction::ReplaceDirectory`] is all-or-nothing from the outside: the
//! directory is renamed aside first and only the renamed copy is deleted.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::CleanupError;
use crate::utils;

/// Suffix appended to a cache directory while it is being deleted.
pub const OLD_SUFFIX: &str = ".old";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupAction {
    /// Delete one log file, then its parent directory if that left it empty.
    SingleFile { file: PathBuf, parent: PathBuf },
    /// Delete a batch of log files, then the parent directory if empty.
    Group { files: Vec<PathBuf>, parent: PathBuf },
    /// Rename `dir` to `dir.old` and delete the renamed copy.
    /// With `keep_root`, an empty `dir` is recreated afterwards.
    ReplaceDirectory { dir: PathBuf, keep_root: bool },
    /// Delete every file directly inside `dir` whose name ends with `suffix`.
    /// The listing happens at run time.
    MatchingFiles { dir: PathBuf, suffix: String },
    /// Plain delete of a file or a whole directory tree.
    Remove { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Cleaned,
    Partial,
    Untouched,
}

/// What a single `run()` did.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CleanupError>,
}

impl CleanupReport {
    pub fn outcome(&self) -> Outcome {
        match (self.failures.is_empty(), self.removed.is_empty()) {
            (true, _) => Outcome::Cleaned,
            (false, false) => Outcome::Partial,
            (false, true) => Outcome::Untouched,
        }
    }

    fn record(&mut self, path: &Path, result: Result<(), std::io::Error>) {
        match result {
            Ok(()) => self.removed.push(path.to_path_buf()),
            Err(source) => {
                warn!("Failed to remove {}: {source}", path.display());
                self.failures.push(CleanupError::Remove {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

impl CleanupAction {
    pub fn run(&self) -> CleanupReport {
        match self {
            CleanupAction::SingleFile { file, parent } => {
                delete_logs(std::slice::from_ref(file), parent)
            }
            CleanupAction::Group { files, parent } => delete_logs(files, parent),
            CleanupAction::ReplaceDirectory { dir, keep_root } => replace_directory(dir, *keep_root),
            CleanupAction::MatchingFiles { dir, suffix } => delete_matching(dir, suffix),
            CleanupAction::Remove { path } => {
                let mut report = CleanupReport::default();
                report.record(path, remove_if_present(path));
                report
            }
        }
    }

    /// Short human-readable kind, for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            CleanupAction::SingleFile { .. } => "log file",
            CleanupAction::Group { .. } => "log group",
            CleanupAction::ReplaceDirectory { .. } => "cache directory",
            CleanupAction::MatchingFiles { .. } => "matching files",
            CleanupAction::Remove { .. } => "entry",
        }
    }

    /// Paths the action would delete if run now.
    pub fn targets(&self) -> Vec<PathBuf> {
        match self {
            CleanupAction::SingleFile { file, .. } => vec![file.clone()],
            CleanupAction::Group { files, .. } => files.clone(),
            CleanupAction::ReplaceDirectory { dir, .. } => vec![dir.clone()],
            CleanupAction::MatchingFiles { dir, suffix } => matching_files(dir, suffix),
            CleanupAction::Remove { path } => vec![path.clone()],
        }
    }
}

fn delete_logs(files: &[PathBuf], parent: &Path) -> CleanupReport {
    let mut report = CleanupReport::default();
    for file in files {
        debug!("Removing log {}", file.display());
        report.record(file, remove_if_present(file));
    }
    if utils::is_dir_empty(parent) {
        debug!("Removing empty directory {}", parent.display());
        match std::fs::remove_dir(parent) {
            // a sibling action may have removed it first
            Ok(()) => report.removed.push(parent.to_path_buf()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => debug!("Left {} in place: {e}", parent.display()),
        }
    }
    report
}

fn replace_directory(dir: &Path, keep_root: bool) -> CleanupReport {
    let mut report = CleanupReport::default();
    if !dir.exists() {
        debug!("{} already gone", dir.display());
        return report;
    }

    let renamed = old_path(dir);
    debug!("Removing {}", dir.display());
    if let Err(source) = std::fs::rename(dir, &renamed) {
        info!(
            "Failed to rename {} to {}: {source}",
            dir.display(),
            renamed.display()
        );
        report.failures.push(CleanupError::Rename {
            from: dir.to_path_buf(),
            to: renamed,
            source,
        });
        return report;
    }

    debug!("Rename successful, deleting {}", renamed.display());
    if let Err(source) = std::fs::remove_dir_all(&renamed) {
        warn!("Failed to delete {}: {source}", renamed.display());
        report.failures.push(CleanupError::Remove {
            path: renamed,
            source,
        });
        return report;
    }
    report.removed.push(dir.to_path_buf());

    if keep_root && !dir.exists() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!("Failed to recreate {}: {e}", dir.display());
        }
    }
    report
}

fn delete_matching(dir: &Path, suffix: &str) -> CleanupReport {
    let mut report = CleanupReport::default();
    debug!("Removing *{suffix} files from {}", dir.display());
    for file in matching_files(dir, suffix) {
        debug!("Removing {}", file.display());
        report.record(&file, remove_if_present(&file));
    }
    report
}

/// Regular files directly inside `dir` whose name ends with `suffix`.
pub fn matching_files(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(_) => return Vec::new(),
    };
    let mut files: Vec<PathBuf> = read_dir
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// `<dir>.old`, next to `dir`. Trailing separators on `dir` are ignored.
pub fn old_path(dir: &Path) -> PathBuf {
    let normalized: PathBuf = dir.components().collect();
    let mut name: OsString = normalized.into_os_string();
    name.push(OLD_SUFFIX);
    PathBuf::from(name)
}

/// Delete a file or directory tree; an already-missing path is not an error.
fn remove_if_present(path: &Path) -> Result<(), std::io::Error> {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) => Err(e),
    };
    match result {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"log").unwrap();
    }

    #[test]
    fn group_removes_files_and_empty_parent() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("2.5");
        let a = parent.join("a.out.log");
        let b = parent.join("b.out.log");
        touch(&a);
        touch(&b);

        let report = CleanupAction::Group {
            files: vec![a.clone(), b.clone()],
            parent: parent.clone(),
        }
        .run();

        assert_eq!(report.outcome(), Outcome::Cleaned);
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(!parent.exists());
    }

    #[test]
    fn group_keeps_parent_with_unrelated_file() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("2.6");
        let log = parent.join("test.out.log");
        let other = parent.join("other.txt");
        touch(&log);
        touch(&other);

        CleanupAction::SingleFile {
            file: log.clone(),
            parent: parent.clone(),
        }
        .run();

        assert!(!log.exists());
        assert!(other.exists());
        assert!(parent.exists());
    }

    #[test]
    fn group_continues_past_missing_files() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("3.0");
        let present = parent.join("present.out.log");
        touch(&present);

        let report = CleanupAction::Group {
            files: vec![parent.join("gone.out.log"), present.clone()],
            parent: parent.clone(),
        }
        .run();

        assert!(report.failures.is_empty());
        assert!(!present.exists());
        assert!(!parent.exists());
    }

    #[test]
    fn group_continues_past_failed_delete() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("3.1");
        let first = parent.join("first.out.log");
        let last = parent.join("last.out.log");
        let blocker = parent.join("notadir.out.log");
        touch(&first);
        touch(&last);
        touch(&blocker);

        let report = CleanupAction::Group {
            // a regular file in the middle of the path fails with ENOTDIR
            files: vec![first.clone(), blocker.join("x"), last.clone()],
            parent: parent.clone(),
        }
        .run();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0], CleanupError::Remove { .. }));
        assert_eq!(report.outcome(), Outcome::Partial);
        assert!(!first.exists());
        assert!(!last.exists());
        assert!(blocker.exists());
        assert!(parent.is_dir());
    }

    #[test]
    fn single_file_twice_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("4.0");
        let log = parent.join("x.out.log");
        touch(&log);
        let action = CleanupAction::SingleFile {
            file: log,
            parent: parent.clone(),
        };

        assert_eq!(action.run().outcome(), Outcome::Cleaned);
        let second = action.run();
        assert_eq!(second.outcome(), Outcome::Cleaned);
        assert!(second.failures.is_empty());
    }

    #[test]
    fn replace_directory_deletes_everything() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("repository");
        touch(&dir.join("org/foo/foo.jar"));

        let report = CleanupAction::ReplaceDirectory {
            dir: dir.clone(),
            keep_root: false,
        }
        .run();

        assert_eq!(report.outcome(), Outcome::Cleaned);
        assert!(!dir.exists());
        assert!(!old_path(&dir).exists());
    }

    #[test]
    fn replace_directory_keep_root_leaves_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("cache");
        touch(&dir.join("blob"));

        CleanupAction::ReplaceDirectory {
            dir: dir.clone(),
            keep_root: true,
        }
        .run();

        assert!(dir.is_dir());
        assert!(utils::is_dir_empty(&dir));
    }

    #[test]
    fn replace_directory_rename_failure_leaves_original() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("repository");
        let artifact = dir.join("org/foo/foo.jar");
        touch(&artifact);
        // occupy the rename target with a non-empty directory
        touch(&old_path(&dir).join("leftover"));

        let report = CleanupAction::ReplaceDirectory {
            dir: dir.clone(),
            keep_root: false,
        }
        .run();

        assert_eq!(report.outcome(), Outcome::Untouched);
        assert!(matches!(report.failures[0], CleanupError::Rename { .. }));
        assert!(artifact.exists());
        assert_eq!(fs::read(&artifact).unwrap(), b"log");
        assert!(old_path(&dir).join("leftover").exists());
    }

    #[test]
    fn replace_missing_directory_is_noop() {
        let tmp = TempDir::new().unwrap();
        let report = CleanupAction::ReplaceDirectory {
            dir: tmp.path().join("absent"),
            keep_root: false,
        }
        .run();
        assert_eq!(report.outcome(), Outcome::Cleaned);
        assert!(report.removed.is_empty());
    }

    #[test]
    fn matching_files_only_touches_suffix() {
        let tmp = TempDir::new().unwrap();
        let dump = tmp.path().join("java_pid1.hprof");
        let keep = tmp.path().join("notes.txt");
        touch(&dump);
        touch(&keep);
        fs::create_dir(tmp.path().join("dir.hprof")).unwrap();

        let action = CleanupAction::MatchingFiles {
            dir: tmp.path().to_path_buf(),
            suffix: ".hprof".to_string(),
        };
        assert_eq!(action.targets(), vec![dump.clone()]);
        action.run();

        assert!(!dump.exists());
        assert!(keep.exists());
        assert!(tmp.path().join("dir.hprof").is_dir());
    }

    #[test]
    fn remove_deletes_tree() {
        let tmp = TempDir::new().unwrap();
        let entry = tmp.path().join("artifact");
        touch(&entry.join("a/b"));
        let report = CleanupAction::Remove { path: entry.clone() }.run();
        assert_eq!(report.removed, vec![entry.clone()]);
        assert!(!entry.exists());
    }

    #[test]
    fn old_path_appends_suffix() {
        assert_eq!(
            old_path(Path::new("/home/u/.m2/repository")),
            PathBuf::from("/home/u/.m2/repository.old")
        );
    }

    #[test]
    fn old_path_is_a_sibling_despite_trailing_slash() {
        assert_eq!(
            old_path(Path::new("/home/u/bazel-cache/")),
            PathBuf::from("/home/u/bazel-cache.old")
        );
    }

    #[test]
    fn replace_directory_with_trailing_slash() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("bazel-cache");
        touch(&dir.join("blob"));
        let mut given = dir.clone().into_os_string();
        given.push("/");

        let report = CleanupAction::ReplaceDirectory {
            dir: PathBuf::from(given),
            keep_root: false,
        }
        .run();

        assert_eq!(report.outcome(), Outcome::Cleaned);
        assert!(!dir.exists());
        assert!(!tmp.path().join("bazel-cache.old").exists());
    }

    #[cfg(unix)]
    #[test]
    fn keep_root_not_recreated_when_delete_fails() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("cache");
        let locked = dir.join("locked");
        touch(&locked.join("blob"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        // root ignores directory permissions
        if fs::write(locked.join("write-check"), b"x").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = CleanupAction::ReplaceDirectory {
            dir: dir.clone(),
            keep_root: true,
        }
        .run();

        let renamed = old_path(&dir);
        fs::set_permissions(renamed.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(report.outcome(), Outcome::Untouched);
        assert!(matches!(report.failures[0], CleanupError::Remove { .. }));
        assert!(!dir.exists());
        assert!(renamed.is_dir());
    }
}
