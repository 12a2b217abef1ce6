//! Index configuration.
//!
//! Handles loading, validating, and merging the optional `.autoindex.toml`
//! file in the scan root. The file name starts with a dot, so the scanner
//! never lists it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = ""            # Prefix for every generated link
//! skip = []                # Extra entry names to leave out of listings
//! sort = true              # Sort entries by name (false = filesystem order)
//! skip_unreadable = false  # Log and skip unreadable entries instead of failing
//! # style = "listing.css"  # Stylesheet to inline instead of the built-in one
//! ```
//!
//! Stock defaults are the base layer; the user file is merged on top and
//! command-line flags win over both. Unknown keys are rejected to catch
//! typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the scan root.
pub const CONFIG_FILENAME: &str = ".autoindex.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `.autoindex.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Prefix joined in front of every web path in generated links.
    pub base_url: String,
    /// Entry names skipped in addition to the built-in skip-list.
    pub skip: Vec<String>,
    /// Sort entries by name. When false, filesystem order is kept.
    pub sort: bool,
    /// Skip entries that cannot be read instead of aborting the run.
    pub skip_unreadable: bool,
    /// Stylesheet inlined into every page, relative to the scan root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            skip: Vec::new(),
            sort: true,
            skip_unreadable: false,
            style: None,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.skip {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "skip entries must not be empty".into(),
                ));
            }
            if name.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "skip entry '{name}' must be a bare name, not a path"
                )));
            }
        }
        Ok(())
    }

    /// Read the configured stylesheet, if any.
    ///
    /// Relative paths resolve against `root`.
    pub fn load_style(&self, root: &Path) -> Result<Option<String>, ConfigError> {
        match &self.style {
            Some(path) => Ok(Some(fs::read_to_string(root.join(path))?)),
            None => Ok(None),
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(IndexConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `.autoindex.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<IndexConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for a scan root, falling back to defaults when the file
/// is absent.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `.autoindex.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Autoindex Configuration
# =======================
# Place this file at the root of the tree as .autoindex.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Prefix for every generated link. Leave empty for site-relative links
# ("/docs/report.pdf"), or set a full origin ("https://files.example.com").
base_url = ""

# Extra entry names to leave out of every listing. Hidden entries (leading
# dot) and previously generated index.html files are always skipped.
skip = []

# Sort entries by name. Set to false to keep the order the filesystem
# reports, which differs between platforms.
sort = true

# When true, an unreadable file or directory is logged and skipped.
# When false, the first unreadable entry aborts the whole run.
skip_unreadable = false

# Stylesheet to inline into every page instead of the built-in one.
# Relative to this file's directory.
# style = "listing.css"
"##
}
