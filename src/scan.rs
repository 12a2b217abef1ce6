//! Filesystem scanning into an in-memory mirror tree.
//!
//! Stage 1 of the index build. Walks a directory subtree once and produces a
//! [`Directory`] tree holding every listed file and subdirectory together
//! with its size and modification time. Rendering happens only after the
//! whole tree is built, so no page is written for a tree that fails to scan.
//!
//! ## Web paths
//!
//! Each directory carries the `/`-rooted path used in hyperlinks. It mirrors
//! the filesystem layout below the scan root:
//!
//! ```text
//! /srv/files/                 web_path = "/"
//! ├── notes.txt
//! ├── docs/                   web_path = "/docs"
//! │   └── 2024/               web_path = "/docs/2024"
//! └── .git/                   (hidden, skipped)
//! ```
//!
//! ## What gets listed
//!
//! - Names starting with `.` are skipped.
//! - Names on the skip-list are skipped ([`BUILTIN_SKIP`] plus configured
//!   extras).
//! - Regular files and directories are listed. Symlinks are not followed and
//!   other entry kinds are ignored.
//!
//! ## Errors
//!
//! By default the first I/O error anywhere in the tree aborts the scan. With
//! [`ScanOptions::skip_unreadable`] set, unreadable entries below the root are
//! logged and left out instead.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;

/// Entry names never listed, whatever the configuration says.
pub const BUILTIN_SKIP: &[&str] = &["index.html"];

/// Web path of the scan root.
pub const ROOT_WEB_PATH: &str = "/";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    fn io(path: &Path, source: io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How the scanner filters, orders, and tolerates entries.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Names skipped on top of [`BUILTIN_SKIP`].
    pub skip: Vec<String>,
    /// Sort entries by name. When false, keep filesystem order.
    pub sort: bool,
    /// Log and leave out unreadable entries instead of failing.
    pub skip_unreadable: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip: Vec::new(),
            sort: true,
            skip_unreadable: false,
        }
    }
}

impl ScanOptions {
    /// Whether an entry with this name is left out of the tree.
    pub fn is_skipped(&self, name: &str) -> bool {
        name.starts_with('.')
            || BUILTIN_SKIP.contains(&name)
            || self.skip.iter().any(|s| s == name)
    }
}

/// A listed regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time in Unix seconds.
    pub mod_time: u64,
}

/// A scanned directory and everything listed beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directory {
    pub name: String,
    pub web_path: String,
    pub fs_path: PathBuf,
    pub mod_time: u64,
    pub files: Vec<File>,
    pub subdirs: Vec<Directory>,
}

impl Directory {
    pub fn is_root(&self) -> bool {
        self.web_path == ROOT_WEB_PATH
    }

    /// Number of directories in this subtree, this one included.
    pub fn dir_count(&self) -> usize {
        1 + self.subdirs.iter().map(Directory::dir_count).sum::<usize>()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.subdirs.iter().map(Directory::file_count).sum::<usize>()
    }
}

/// Join a child name onto a web path without doubling the root slash.
pub fn child_web_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Web path one level up; the root is its own parent.
pub fn parent_web_path(web_path: &str) -> &str {
    match web_path.trim_end_matches('/').rfind('/') {
        Some(0) | None => ROOT_WEB_PATH,
        Some(idx) => &web_path[..idx],
    }
}

/// Scan `root` into a [`Directory`] tree.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Directory, ScanError> {
    let metadata = fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let tree = scan_directory(root, ROOT_WEB_PATH.to_string(), &metadata, options)?;
    tracing::debug!(
        root = %root.display(),
        directories = tree.dir_count(),
        files = tree.file_count(),
        "Scan completed"
    );
    Ok(tree)
}

fn scan_directory(
    path: &Path,
    web_path: String,
    metadata: &fs::Metadata,
    options: &ScanOptions,
) -> Result<Directory, ScanError> {
    let mut dir = Directory {
        name: display_name(path),
        web_path,
        fs_path: path.to_path_buf(),
        mod_time: mod_time_secs(metadata),
        files: Vec::new(),
        subdirs: Vec::new(),
    };

    for entry in collect_entries(path, options)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_path = entry.path();

        match scan_entry(&entry, &entry_path, &name, &dir.web_path, options) {
            Ok(Some(Scanned::File(file))) => dir.files.push(file),
            Ok(Some(Scanned::Dir(subdir))) => dir.subdirs.push(subdir),
            Ok(None) => {}
            Err(e) if options.skip_unreadable => {
                tracing::warn!(path = %entry_path.display(), error = %e, "Skipping unreadable entry");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(dir)
}

enum Scanned {
    File(File),
    Dir(Directory),
}

fn scan_entry(
    entry: &fs::DirEntry,
    entry_path: &Path,
    name: &str,
    parent_web_path: &str,
    options: &ScanOptions,
) -> Result<Option<Scanned>, ScanError> {
    // file_type() does not follow symlinks, so links fall through to None
    let file_type = entry.file_type().map_err(|e| ScanError::io(entry_path, e))?;

    if file_type.is_file() {
        let metadata = entry.metadata().map_err(|e| ScanError::io(entry_path, e))?;
        Ok(Some(Scanned::File(File {
            name: name.to_string(),
            size: metadata.len(),
            mod_time: mod_time_secs(&metadata),
        })))
    } else if file_type.is_dir() {
        let metadata = entry.metadata().map_err(|e| ScanError::io(entry_path, e))?;
        let web_path = child_web_path(parent_web_path, name);
        let subdir = scan_directory(entry_path, web_path, &metadata, options)?;
        Ok(Some(Scanned::Dir(subdir)))
    } else {
        tracing::debug!(path = %entry_path.display(), "Ignoring non-regular entry");
        Ok(None)
    }
}

fn collect_entries(path: &Path, options: &ScanOptions) -> Result<Vec<fs::DirEntry>, ScanError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| ScanError::io(path, e))? {
        let entry = entry.map_err(|e| ScanError::io(path, e))?;
        let name = entry.file_name();
        if options.is_skipped(&name.to_string_lossy()) {
            tracing::debug!(path = %entry.path().display(), "Skipping entry");
            continue;
        }
        entries.push(entry);
    }

    if options.sort {
        entries.sort_by_key(|e| e.file_name());
    }
    Ok(entries)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Modification time in Unix seconds; pre-epoch or unsupported clamps to 0.
fn mod_time_secs(metadata: &fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
