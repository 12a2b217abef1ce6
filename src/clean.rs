//! Removal of generated index pages.
//!
//! Walks the same directories the scanner would visit and deletes every
//! `index.html` found there. Hidden and skip-listed directories are never
//! entered, so hand-written `index.html` files inside them survive.

use crate::render::INDEX_FILENAME;
use crate::scan::ScanOptions;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("IO error removing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Delete generated index pages under `root`, returning the removed paths.
pub fn clean(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, CleanError> {
    let mut removed = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, options));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == INDEX_FILENAME {
            let path = entry.into_path();
            fs::remove_file(&path).map_err(|source| CleanError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Removed index");
            removed.push(path);
        }
    }
    Ok(removed)
}

fn is_skipped_dir(entry: &DirEntry, options: &ScanOptions) -> bool {
    entry.file_type().is_dir() && options.is_skipped(&entry.file_name().to_string_lossy())
}
