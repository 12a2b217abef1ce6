//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! / (2 files, 2 directories)
//!     notes.txt (5 B)
//!     readme.md (9 B)
//!     /docs (1 file, 1 directory)
//!         report.pdf (2.00 KiB)
//!         /docs/archive (1 file)
//!             old.txt (3 B)
//!     /media (1 file, 1 directory)
//!         photo.jpg (10 B)
//!         /media/empty (empty)
//! ```
//!
//! ## Build
//!
//! ```text
//! index.html
//! docs/index.html
//! docs/archive/index.html
//!
//! Generated 3 index pages
//! ```

use crate::format::format_size;
use crate::scan::Directory;
use std::path::{Path, PathBuf};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Header line for a directory: web path plus a count summary.
fn directory_header(dir: &Directory) -> String {
    let mut parts = Vec::new();
    if !dir.files.is_empty() {
        parts.push(plural(dir.files.len(), "file", "files"));
    }
    if !dir.subdirs.is_empty() {
        parts.push(plural(dir.subdirs.len(), "directory", "directories"));
    }
    if parts.is_empty() {
        format!("{} (empty)", dir.web_path)
    } else {
        format!("{} ({})", dir.web_path, parts.join(", "))
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned tree: files first, then subdirectories, matching the
/// order rows appear on the generated pages.
pub fn format_scan_output(tree: &Directory) -> Vec<String> {
    let mut lines = Vec::new();
    format_directory(tree, 0, &mut lines);
    lines
}

fn format_directory(dir: &Directory, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}{}", indent(depth), directory_header(dir)));
    for file in &dir.files {
        lines.push(format!(
            "{}{} ({})",
            indent(depth + 1),
            file.name,
            format_size(file.size)
        ));
    }
    for subdir in &dir.subdirs {
        format_directory(subdir, depth + 1, lines);
    }
}

pub fn print_scan_output(tree: &Directory) {
    for line in format_scan_output(tree) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the list of written index pages relative to the scan root.
pub fn format_build_output(written: &[PathBuf], root: &Path) -> Vec<String> {
    let mut lines: Vec<String> = written
        .iter()
        .map(|p| relative_display(p, root))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {}",
        plural(written.len(), "index page", "index pages")
    ));
    lines
}

pub fn print_build_output(written: &[PathBuf], root: &Path) {
    for line in format_build_output(written, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Clean output
// ============================================================================

/// Format the list of removed index pages relative to the scan root.
pub fn format_clean_output(removed: &[PathBuf], root: &Path) -> Vec<String> {
    let mut lines: Vec<String> = removed
        .iter()
        .map(|p| format!("removed {}", relative_display(p, root)))
        .collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Removed {}",
        plural(removed.len(), "index page", "index pages")
    ));
    lines
}

pub fn print_clean_output(removed: &[PathBuf], root: &Path) {
    for line in format_clean_output(removed, root) {
        println!("{}", line);
    }
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
