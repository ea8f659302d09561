use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

/// Home directory of the current user, if it can be determined.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Compute total size of a directory recursively.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Get size of a file or directory.
pub fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        path.metadata().map(|m| m.len()).unwrap_or(0)
    }
}

/// True only for an existing directory with no entries at all.
pub fn is_dir_empty(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(mut rd) => rd.next().is_none(),
        Err(_) => false,
    }
}

/// Last modification time, or `None` when metadata is unreadable.
pub fn modified(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Format byte count as human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Coarse "how long ago" for a staleness timestamp.
pub fn format_age(timestamp: SystemTime, now: SystemTime) -> String {
    let age = now.duration_since(timestamp).unwrap_or(Duration::ZERO);
    let secs = age.as_secs();
    if secs >= 86_400 {
        format!("{}d ago", secs / 86_400)
    } else if secs >= 3_600 {
        format!("{}h ago", secs / 3_600)
    } else if secs >= 60 {
        format!("{}m ago", secs / 60)
    } else {
        "now".to_string()
    }
}

/// Shorten a path for display by replacing home dir with ~.
pub fn display_path(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if let Ok(relative) = path.strip_prefix(home) {
            if relative.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
