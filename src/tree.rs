//! Document tree layout.
//!
//! ```text
//! notices/
//! ├── app1/
//! │   ├── metadata.json          # Notice descriptor (required)
//! │   ├── it/
//! │   │   ├── latest.md          # Mutable current document
//! │   │   ├── v1.0/notice.md     # Immutable snapshot
//! │   │   └── v1.1/notice.md
//! │   └── en/
//! │       ├── latest.md
//! │       └── v1.0/notice.md
//! └── app2/
//!     └── ...
//! ```
//!
//! Listings skip hidden entries and are sorted by name so that every run
//! visits the tree in the same order.

use crate::version;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const LATEST_FILE: &str = "latest.md";
pub const SNAPSHOT_FILE: &str = "notice.md";

/// Sorted, non-hidden subdirectories of `path`.
pub fn subdirectories(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_hidden(p))
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Notice directories under the notices root.
pub fn notice_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    subdirectories(root)
}

/// Language directories under a notice directory.
pub fn language_dirs(notice_dir: &Path) -> io::Result<Vec<PathBuf>> {
    subdirectories(notice_dir)
}

/// Snapshot directories (`v*`) under a language directory.
pub fn snapshot_dirs(language_dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(subdirectories(language_dir)?
        .into_iter()
        .filter(|p| dir_name(p).starts_with('v'))
        .collect())
}

pub fn latest_path(language_dir: &Path) -> PathBuf {
    language_dir.join(LATEST_FILE)
}

pub fn snapshot_dir(language_dir: &Path, version: &str) -> PathBuf {
    language_dir.join(version::snapshot_dir_name(version))
}

pub fn snapshot_path(language_dir: &Path, version: &str) -> PathBuf {
    snapshot_dir(language_dir, version).join(SNAPSHOT_FILE)
}

/// Final path component as a string (lossy).
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// A declared version must be usable as a single directory name.
pub fn is_safe_version(version: &str) -> bool {
    !version.is_empty()
        && version != "."
        && version != ".."
        && !version.contains(['/', '\\'])
        && !version.chars().any(char::is_control)
}

fn is_hidden(path: &Path) -> bool {
    dir_name(path).starts_with('.')
}
