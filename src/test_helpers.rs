//! Shared test utilities.
//!
//! - [`site_tree`] lays out a scratch directory tree on disk.
//! - [`MockProbe`] simulates a directory hierarchy for the stylesheet search
//!   and records every query made against it.
//! - [`FixedHost`] answers identity and clock queries with constants so page
//!   output can be compared byte for byte.
//! - [`BrokenRenderer`] fails every render.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let probe = MockProbe::new()
//!     .dir("/srv/site", &["notes", "site.css"])
//!     .dir("/srv/site/notes", &["page.md"]);
//!
//! let outcome = locate(&probe, Path::new("/srv/site/notes"), Path::new("/srv/site")).unwrap();
//! assert_eq!(outcome.href.as_deref(), Some("./../site.css"));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

use crate::host::{Host, HostError};
use crate::render::{RenderError, Renderer};
use crate::stylesheet::DirectoryProbe;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding `dirs` and `files` (relative paths).
///
/// Parent directories of files are created as needed.
pub fn site_tree(dirs: &[&str], files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for dir in dirs {
        std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }
    for (path, content) in files {
        let path = tmp.path().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    tmp
}

// =========================================================================
// Simulated hierarchy
// =========================================================================

/// A query made against a [`MockProbe`], with the path already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeCall {
    List(PathBuf),
    Canonicalize(PathBuf),
}

/// In-memory directory hierarchy. Only directories registered with
/// [`MockProbe::dir`] exist; paths are resolved lexically.
#[derive(Debug, Default)]
pub struct MockProbe {
    dirs: BTreeMap<PathBuf, Vec<OsString>>,
    calls: RefCell<Vec<ProbeCall>>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a directory and its entries, in listing order.
    pub fn dir(mut self, path: &str, entries: &[&str]) -> Self {
        self.dirs.insert(
            normalize(Path::new(path)),
            entries.iter().map(OsString::from).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.borrow().clone()
    }

    fn lookup(&self, dir: &Path) -> io::Result<(PathBuf, &Vec<OsString>)> {
        let path = normalize(dir);
        match self.dirs.get(&path) {
            Some(entries) => Ok((path, entries)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )),
        }
    }
}

impl DirectoryProbe for MockProbe {
    fn entry_names(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        self.calls.borrow_mut().push(ProbeCall::List(normalize(dir)));
        self.lookup(dir).map(|(_, entries)| entries.clone())
    }

    fn canonicalize(&self, dir: &Path) -> io::Result<PathBuf> {
        self.calls
            .borrow_mut()
            .push(ProbeCall::Canonicalize(normalize(dir)));
        self.lookup(dir).map(|(path, _)| path)
    }
}

/// Resolve `.` and `..` lexically against `/`. `..` at `/` stays at `/`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    out
}

// =========================================================================
// Host stand-ins
// =========================================================================

/// Host with a constant user and timestamp.
#[derive(Debug, Clone)]
pub struct FixedHost {
    pub user: String,
    pub timestamp: String,
}

impl Default for FixedHost {
    fn default() -> Self {
        Self {
            user: "tester".to_string(),
            timestamp: "Sun Oct 18 09:00:00 2026".to_string(),
        }
    }
}

impl Host for FixedHost {
    fn current_user_name(&self) -> Result<String, HostError> {
        Ok(self.user.clone())
    }

    fn local_timestamp(&self) -> String {
        self.timestamp.clone()
    }
}

/// Host whose effective user has no name.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamelessHost;

impl Host for NamelessHost {
    fn current_user_name(&self) -> Result<String, HostError> {
        Err(HostError::UnknownUser(4242))
    }

    fn local_timestamp(&self) -> String {
        "Thu Jan  1 00:00:00 1970".to_string()
    }
}

// =========================================================================
// Renderer stand-ins
// =========================================================================

/// Renderer that rejects every document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&self, _markdown: &str) -> Result<String, RenderError> {
        Err(RenderError::Failed("unterminated tree".to_string()))
    }
}

#[test]
fn normalize_resolves_relative_segments() {
    assert_eq!(normalize(Path::new("/a/b/./../c")), PathBuf::from("/a/c"));
    assert_eq!(normalize(Path::new("/a/./../../..")), PathBuf::from("/"));
}
