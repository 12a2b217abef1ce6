//! Shared test utilities for the autoindex test suite.
//!
//! Provides a fixture tree builder and lookup helpers for scanned
//! [`Directory`] trees.
//!
//! # Fixture layout
//!
//! ```text
//! <tmp>/
//! ├── notes.txt            (5 bytes)
//! ├── readme.md
//! ├── .secret              hidden, never listed
//! ├── .git/config          hidden, never listed
//! ├── docs/
//! │   ├── report.pdf       (2048 bytes)
//! │   └── archive/
//! │       └── old.txt
//! └── media/
//!     ├── photo.jpg
//!     └── empty/
//! ```

use std::fs;
use tempfile::TempDir;

use crate::scan::{Directory, File};

// =========================================================================
// Fixture setup
// =========================================================================

/// Build the fixture tree in a fresh temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(root.join("notes.txt"), "notes").unwrap();
    fs::write(root.join("readme.md"), "# Readme\n").unwrap();
    fs::write(root.join(".secret"), "hidden").unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join(".git/config"), "[core]\n").unwrap();

    fs::create_dir_all(root.join("docs/archive")).unwrap();
    fs::write(root.join("docs/report.pdf"), vec![0u8; 2048]).unwrap();
    fs::write(root.join("docs/archive/old.txt"), "old").unwrap();

    fs::create_dir_all(root.join("media/empty")).unwrap();
    fs::write(root.join("media/photo.jpg"), "fake image").unwrap();

    tmp
}

// =========================================================================
// Tree lookups — panics with a clear message on miss
// =========================================================================

/// Find a direct subdirectory by name. Panics if not found.
pub fn find_subdir<'a>(dir: &'a Directory, name: &str) -> &'a Directory {
    dir.subdirs
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| {
            let names = subdir_names(dir);
            panic!("subdir '{name}' not found in '{}'. Available: {names:?}", dir.web_path)
        })
}

/// Find a file listed directly in `dir`. Panics if not found.
pub fn find_file<'a>(dir: &'a Directory, name: &str) -> &'a File {
    dir.files
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| {
            let names = file_names(dir);
            panic!("file '{name}' not found in '{}'. Available: {names:?}", dir.web_path)
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// File names in listing order.
pub fn file_names(dir: &Directory) -> Vec<&str> {
    dir.files.iter().map(|f| f.name.as_str()).collect()
}

/// Subdirectory names in listing order.
pub fn subdir_names(dir: &Directory) -> Vec<&str> {
    dir.subdirs.iter().map(|d| d.name.as_str()).collect()
}
