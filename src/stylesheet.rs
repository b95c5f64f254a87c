//! Stylesheet discovery.
//!
//! With a declared site root, the page links the nearest stylesheet found by
//! walking up from the page's directory:
//!
//! ```text
//! /srv/site/                 ← declared root (search stops here)
//! ├── site.css               ← found third: "./../../site.css"
//! └── notes/
//!     └── 2021/              ← page directory, searched first: "./"
//!         └── trip.md
//! ```
//!
//! A directory matches when any entry's name *contains* `.css`, so
//! `theme.css.bak` matches too. When one directory holds several matches the
//! first one in directory-listing order wins; listing order is up to the
//! filesystem.
//!
//! ## Bounds
//!
//! Only the starting directory and its ancestors are ever listed. After each
//! miss the directory's canonical path is checked: `/` means the page was
//! never inside the root at all, and the root itself means the search is over
//! with no match.
//!
//! Filesystem access goes through [`DirectoryProbe`] so the walk can run
//! against a simulated hierarchy in tests.

use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Substring that marks a directory entry as a stylesheet.
pub const STYLESHEET_MARKER: &str = ".css";

const START_PREFIX: &str = "./";
const PARENT_SEGMENT: &str = "../";

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("cannot list directory {}: {source}", dir.display())]
    List { dir: PathBuf, source: io::Error },
    #[error("cannot resolve directory {}: {source}", dir.display())]
    Canonicalize { dir: PathBuf, source: io::Error },
    #[error("invoked outside of the stylesheet root hierarchy {}", root.display())]
    OutsideDeclaredRoot { root: PathBuf },
}

/// The two filesystem queries the search needs.
pub trait DirectoryProbe {
    /// Names of the entries in `dir`, in listing order.
    fn entry_names(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Absolute path of `dir` with `.`, `..` and symlinks resolved.
    fn canonicalize(&self, dir: &Path) -> io::Result<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl DirectoryProbe for FsProbe {
    fn entry_names(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn canonicalize(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(dir)
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Link target relative to the starting directory, e.g. `./../site.css`.
    pub href: Option<String>,
    /// Canonical paths of the directories searched without a match, nearest
    /// first.
    pub exhausted: Vec<PathBuf>,
}

/// Search `start_dir` and its ancestors, up to and including `root`, for a
/// stylesheet.
///
/// `root` is compared by path components, so a trailing slash does not
/// matter. Reaching `/` after a miss is always an error, even when `/` is
/// the declared root.
pub fn locate(
    probe: &dyn DirectoryProbe,
    start_dir: &Path,
    root: &Path,
) -> Result<SearchOutcome, LocateError> {
    let mut prefix = String::from(START_PREFIX);
    let mut exhausted: Vec<PathBuf> = Vec::new();
    // Each miss moves exactly one level up, so the walk can never take more
    // steps than the starting directory has components.
    let mut max_steps: Option<usize> = None;

    loop {
        let dir = start_dir.join(&prefix);
        debug!("Searching {} for a stylesheet", dir.display());

        let entries = probe.entry_names(&dir).map_err(|source| LocateError::List {
            dir: dir.clone(),
            source,
        })?;
        if let Some(name) = first_stylesheet(&entries) {
            let href = format!("{prefix}{name}");
            debug!("Found stylesheet {href}");
            return Ok(SearchOutcome {
                href: Some(href),
                exhausted,
            });
        }

        let canonical = probe
            .canonicalize(&dir)
            .map_err(|source| LocateError::Canonicalize {
                dir: dir.clone(),
                source,
            })?;
        debug!("No stylesheet in {}", canonical.display());

        let limit = *max_steps.get_or_insert_with(|| canonical.components().count());
        let at_root = canonical == root;
        let at_filesystem_root = canonical.parent().is_none();
        exhausted.push(canonical);

        // `/` is checked first, so a declared root of `/` can never be met.
        if at_filesystem_root {
            return Err(LocateError::OutsideDeclaredRoot {
                root: root.to_path_buf(),
            });
        }
        if at_root {
            debug!("Found no stylesheet under {}", root.display());
            return Ok(SearchOutcome {
                href: None,
                exhausted,
            });
        }
        if exhausted.len() >= limit {
            return Err(LocateError::OutsideDeclaredRoot {
                root: root.to_path_buf(),
            });
        }

        prefix.push_str(PARENT_SEGMENT);
    }
}

fn first_stylesheet(entries: &[OsString]) -> Option<String> {
    entries.iter().find_map(|name| {
        let name = name.to_string_lossy();
        name.contains(STYLESHEET_MARKER).then(|| name.into_owned())
    })
}
