//! Gradle daemon log triage.
//!
//! Layout: `<root>/<version>/<name>out.log`, exactly one level below each
//! version directory. Logs are grouped per version directory by
//! [`AgeBucket`]; stale buckets become one group cleaner anchored at the
//! version directory, fresh logs each get their own cleaner anchored at the
//! file and timestamped with its own modification time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::actions::CleanupAction;
use crate::age::{self, AgeBucket};
use crate::registry::CleanerRegistry;

pub const LOG_SUFFIX: &str = "out.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Classified logs of one version directory. Buckets are never empty.
#[derive(Debug, Clone)]
pub struct VersionLogs {
    pub dir: PathBuf,
    pub buckets: BTreeMap<AgeBucket, Vec<LogFile>>,
}

impl VersionLogs {
    /// (anchor, timestamp, action) triples for this directory.
    pub fn cleaners(&self, now: SystemTime) -> Vec<(PathBuf, SystemTime, CleanupAction)> {
        let mut out = Vec::new();
        for (bucket, logs) in &self.buckets {
            if *bucket == AgeBucket::Fresh {
                for log in logs {
                    out.push((
                        log.path.clone(),
                        log.modified,
                        CleanupAction::SingleFile {
                            file: log.path.clone(),
                            parent: self.dir.clone(),
                        },
                    ));
                }
            } else {
                let timestamp = now.checked_sub(bucket.threshold()).unwrap_or(SystemTime::UNIX_EPOCH);
                out.push((
                    self.dir.clone(),
                    timestamp,
                    CleanupAction::Group {
                        files: logs.iter().map(|l| l.path.clone()).collect(),
                        parent: self.dir.clone(),
                    },
                ));
            }
        }
        out
    }
}

/// Classify daemon logs under `root`. A missing or unreadable root, or an
/// unreadable version directory, contributes nothing.
pub fn scan(root: &Path, now: SystemTime) -> Vec<VersionLogs> {
    let mut version_dirs: Vec<PathBuf> = match std::fs::read_dir(root) {
        Ok(rd) => rd
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .collect(),
        Err(_) => return Vec::new(),
    };
    version_dirs.sort();

    version_dirs
        .into_iter()
        .filter_map(|dir| {
            let buckets = split_logs(log_files(&dir), now);
            if buckets.is_empty() {
                None
            } else {
                Some(VersionLogs { dir, buckets })
            }
        })
        .collect()
}

/// Scan `root` and register the resulting cleaners.
/// Returns how many version directories had anything to clean.
pub fn register(root: &Path, now: SystemTime, registry: &mut dyn CleanerRegistry) -> usize {
    debug!("Looking for Gradle daemon logs in {}", root.display());
    let found = scan(root, now);
    for version in &found {
        for (bucket, logs) in &version.buckets {
            debug!("{}: {} logs {}", version.dir.display(), logs.len(), bucket.label());
        }
        for (anchor, timestamp, action) in version.cleaners(now) {
            registry.add_cleaner(anchor, timestamp, action);
        }
    }
    debug!(
        "Finished, found and registered for cleaning {} daemon directories",
        found.len()
    );
    found.len()
}

fn log_files(dir: &Path) -> Vec<LogFile> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            debug!("Cannot read {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut logs: Vec<LogFile> = read_dir
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(LOG_SUFFIX))
        .filter_map(|entry| {
            // Single metadata call per file
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some(LogFile {
                path: entry.path(),
                modified,
            })
        })
        .collect();
    logs.sort_by(|a, b| a.path.cmp(&b.path));
    logs
}

fn split_logs(logs: Vec<LogFile>, now: SystemTime) -> BTreeMap<AgeBucket, Vec<LogFile>> {
    let mut buckets: BTreeMap<AgeBucket, Vec<LogFile>> = BTreeMap::new();
    for log in logs {
        let bucket = age::classify(age::age_of(log.modified, now));
        buckets.entry(bucket).or_default().push(log);
    }
    buckets
}
