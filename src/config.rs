//! Optional page defaults loaded from a TOML file.
//!
//! A site built by a shell loop usually passes the same `-f`, `-c` and `-n`
//! values to every invocation. Those can live in a file instead and be named
//! once with `--config`:
//!
//! ```toml
//! omit = 0x0A                     # same bits as -f
//! stylesheet_root = "/srv/site"   # must be absolute
//! navigation = "<nav><a href=\"/\">Home</a></nav>"
//! ```
//!
//! ## Precedence
//!
//! Command line beats config file beats built-in defaults. Each command-line
//! flag replaces the corresponding key wholesale; nothing is OR-ed together.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("absolute path required for stylesheet_root, got {}", .0.display())]
    RelativeStylesheetRoot(PathBuf),
}

/// Page defaults from a config file.
///
/// Every key is optional. Missing keys fall back to the built-in defaults
/// (nothing omitted, no stylesheet search, no navigation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Omission bitmask, same meaning as the `-f` flag.
    pub omit: Option<u64>,
    /// Absolute root bounding the stylesheet search.
    pub stylesheet_root: Option<PathBuf>,
    /// Raw HTML appended to the end of the body.
    pub navigation: Option<String>,
}

impl PageConfig {
    /// Reject values the command line would also reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.stylesheet_root {
            if !root.is_absolute() {
                return Err(ConfigError::RelativeStylesheetRoot(root.clone()));
            }
        }
        Ok(())
    }
}

/// Parse and validate config text. `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<PageConfig, ConfigError> {
    let config: PageConfig = toml::from_str(content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file.
///
/// Unlike the command-line flags, the file must exist once it is named:
/// a missing file is an error, not an empty config.
pub fn load_config(path: &Path) -> Result<PageConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

/// Returns a fully-commented stock config file.
///
/// Used by `webpage --print-config`. Every key is commented out so the file
/// parses to the built-in defaults as-is.
pub fn stock_config_toml() -> &'static str {
    r##"# webpage configuration
# =====================
# Pass this file with `webpage --config <FILE> page.md`.
# All keys are optional; flags on the command line override them.
# Unknown keys will cause an error.

# Sections to leave out of the page, as a bitmask (same as -f):
#   0x01  doctype
#   0x02  title
#   0x04  datetime comment
#   0x08  author comment
# omit = 0x00

# Enables the stylesheet link. The first file whose name contains ".css",
# searching from the working directory up towards this root, is linked.
# Must be an absolute path.
# stylesheet_root = "/srv/site"

# Raw HTML appended at the end of the body (same as -n).
# navigation = "<nav><a href=\"/\">Home</a></nav>"
"##
}
