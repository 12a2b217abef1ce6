//! # Autoindex
//!
//! Generates a static `index.html` listing for every directory in a
//! filesystem subtree, the way a web server's directory listing would look,
//! but written to disk once so any static file host can serve it.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan    root/  →  Directory tree   (filesystem → in-memory mirror)
//! 2. Render  tree   →  */index.html     (one page per directory, pre-order)
//! ```
//!
//! The whole tree is scanned before the first page is written. A tree that
//! fails to scan leaves no half-updated listings behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`html`] | Typed markup tree (`Node`, `Document`) and its renderer |
//! | [`scan`] | Stage 1 — walks the root, builds the `Directory` mirror tree |
//! | [`render`] | Stage 2 — builds and writes one index page per directory |
//! | [`format`] | Human-readable sizes and UTC timestamps |
//! | [`config`] | Optional `.autoindex.toml` loading, validation, defaults |
//! | [`clean`] | Removes previously generated index pages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## A Small Typed Tree Over a Template Engine
//!
//! Pages are assembled from [`html::Node`] values and serialized in one
//! recursive pass. Every element is closed explicitly, so output is
//! well-formed XHTML by construction. Text is written verbatim: the listing
//! only ever contains names read from the filesystem being indexed.
//!
//! ## Sorted, Deterministic Output
//!
//! Entries are sorted by name unless `sort = false` is configured, so
//! regenerating an unchanged tree produces byte-identical pages on every
//! platform.
//!
//! ## Fail Fast
//!
//! An unreadable entry aborts the run by default. `skip_unreadable = true`
//! trades completeness for progress on trees with permission holes.

pub mod clean;
pub mod config;
pub mod format;
pub mod html;
pub mod output;
pub mod render;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::path::PathBuf;
use thiserror::Error;

use crate::render::RenderOptions;
use crate::scan::ScanOptions;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),
}

/// Everything one indexing run needs.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Directory whose subtree gets listings.
    pub root: PathBuf,
    /// Prefix for every generated link.
    pub base_url: String,
    /// Stylesheet inlined instead of the built-in one.
    pub custom_style: Option<String>,
    pub scan: ScanOptions,
}

impl IndexOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: String::new(),
            custom_style: None,
            scan: ScanOptions::default(),
        }
    }

    /// Options for `root` taken from its `.autoindex.toml`, or the defaults.
    pub fn from_config(root: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let root = root.into();
        let config = config::load_config(&root)?;
        let custom_style = config.load_style(&root)?;
        Ok(Self {
            base_url: config.base_url,
            custom_style,
            scan: ScanOptions {
                skip: config.skip,
                sort: config.sort,
                skip_unreadable: config.skip_unreadable,
            },
            root,
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            base_url: self.base_url.clone(),
            custom_style: self.custom_style.clone(),
        }
    }
}

/// Write an `index.html` into `options.root` and every listed directory
/// beneath it.
///
/// The mirror tree lives only for the duration of this call.
pub fn index_tree(options: &IndexOptions) -> Result<(), IndexError> {
    let tree = scan::scan(&options.root, &options.scan)?;
    let written = render::render_tree(&tree, &options.render_options())?;
    tracing::info!(
        root = %options.root.display(),
        pages = written.len(),
        "Index tree complete"
    );
    Ok(())
}
