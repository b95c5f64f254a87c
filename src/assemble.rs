//! Page assembly.
//!
//! Writes the page in one forward pass. Nothing is buffered beyond the
//! writer itself and no section is revisited once written:
//!
//! ```text
//! <!DOCTYPE html>                  unless omitted
//! <html>
//! <head>
//! <title>page</title>              unless omitted
//! <!--Author is alice-->           unless omitted
//! <!--Datetime is Sun Oct 18 ...-->  unless omitted
//! <link rel="stylesheet" href="./../site.css">   only with a stylesheet root
//! ...page.txt, byte for byte...    only if page.txt exists
//! </head>
//! <body>
//! ...rendered page.md...
//! <!--Navigation-->                only with a navigation fragment
//! <nav>...</nav>
//! </body>
//! </html>
//! ```
//!
//! `<html>`, `<head>` and `<body>` are always written and always closed, in
//! that nesting. Any failure stops the pass where it is; whatever was already
//! flushed stays in the file.

use crate::host::{Host, HostError};
use crate::options::Configuration;
use crate::render::{RenderError, Renderer};
use crate::stylesheet::{self, DirectoryProbe, LocateError};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DOCTYPE: &str = "<!DOCTYPE html>\n";
const HTML_OPEN: &str = "<html>\n";
const HTML_CLOSE: &str = "</html>\n";
const HEAD_OPEN: &str = "<head>\n";
const HEAD_CLOSE: &str = "</head>\n";
const BODY_OPEN: &str = "<body>\n";
const BODY_CLOSE: &str = "</body>\n";
const NAVIGATION_MARKER: &str = "<!--Navigation-->\n";

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("cannot create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("cannot read markdown file {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("cannot copy head fragment {}: {source}", path.display())]
    Fragment { path: PathBuf, source: io::Error },
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
    #[error("no stylesheet found under {}", .0.display())]
    NoStylesheetFound(PathBuf),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The outside services a page build calls on.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub renderer: &'a dyn Renderer,
    pub host: &'a dyn Host,
    pub probe: &'a dyn DirectoryProbe,
}

/// What went into a finished page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Path of the written page; empty when assembled into a bare writer.
    pub page: PathBuf,
    pub doctype: bool,
    pub title: Option<String>,
    pub author: Option<String>,
    pub datetime: Option<String>,
    pub stylesheet: Option<String>,
    /// Bytes copied from the head fragment file, if it existed.
    pub fragment_bytes: Option<u64>,
    pub body_bytes: usize,
    pub navigation: bool,
}

/// Build the page for `config` in `dir`.
///
/// `dir` is where the page lands, where the head fragment is looked up, and
/// where the stylesheet search starts. The page file is created fresh,
/// truncating any earlier contents, and is closed on every return path.
pub fn assemble(
    config: &Configuration,
    dir: &Path,
    with: Collaborators<'_>,
) -> Result<AssemblyReport, AssembleError> {
    let path = dir.join(config.page_file_name());
    debug!("Using web page filename of {}", path.display());

    let file = File::create(&path).map_err(|source| AssembleError::Create {
        path: path.clone(),
        source,
    })?;
    let mut page = BufWriter::new(file);

    let mut report = write_page(&mut page, config, dir, with)?;
    page.into_inner().map_err(|e| e.into_error())?;
    report.page = path;
    Ok(report)
}

/// Write the whole page to `out`.
///
/// `out` is flushed after `</head>` and again after `</body>`.
pub fn write_page<W: Write>(
    out: &mut W,
    config: &Configuration,
    dir: &Path,
    with: Collaborators<'_>,
) -> Result<AssemblyReport, AssembleError> {
    let mut report = AssemblyReport::default();

    if config.sections.doctype {
        out.write_all(DOCTYPE.as_bytes())?;
        report.doctype = true;
    }
    out.write_all(HTML_OPEN.as_bytes())?;

    write_head(out, config, dir, with, &mut report)?;
    write_body(out, config, with, &mut report)?;

    out.write_all(HTML_CLOSE.as_bytes())?;
    out.flush()?;
    Ok(report)
}

fn write_head<W: Write>(
    out: &mut W,
    config: &Configuration,
    dir: &Path,
    with: Collaborators<'_>,
    report: &mut AssemblyReport,
) -> Result<(), AssembleError> {
    out.write_all(HEAD_OPEN.as_bytes())?;

    if config.sections.title {
        debug!("Writing title as {}", config.source_base_name);
        writeln!(out, "<title>{}</title>", config.source_base_name)?;
        report.title = Some(config.source_base_name.clone());
    }

    if config.sections.author {
        let user = with.host.current_user_name()?;
        debug!("Author is {user}");
        write_comment(out, "Author is ", &user)?;
        report.author = Some(user);
    }

    if config.sections.datetime {
        let now = with.host.local_timestamp();
        debug!("Datetime is {now}");
        write_comment(out, "Datetime is ", &now)?;
        report.datetime = Some(now);
    }

    if let Some(root) = &config.stylesheet_root {
        let outcome = stylesheet::locate(with.probe, dir, root)?;
        let href = outcome
            .href
            .ok_or_else(|| AssembleError::NoStylesheetFound(root.clone()))?;
        debug!("Writing link to stylesheet {href}");
        writeln!(out, "<link rel=\"stylesheet\" href=\"{href}\">")?;
        report.stylesheet = Some(href);
    }

    report.fragment_bytes = copy_fragment(out, &dir.join(config.fragment_file_name()))?;

    out.write_all(HEAD_CLOSE.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn write_body<W: Write>(
    out: &mut W,
    config: &Configuration,
    with: Collaborators<'_>,
    report: &mut AssemblyReport,
) -> Result<(), AssembleError> {
    let source = std::fs::read(&config.source).map_err(|source| AssembleError::ReadSource {
        path: config.source.clone(),
        source,
    })?;
    debug!("Read {} bytes from {}", source.len(), config.source.display());

    out.write_all(BODY_OPEN.as_bytes())?;

    let body = with.renderer.render(&String::from_utf8_lossy(&source))?;
    out.write_all(body.as_bytes())?;
    report.body_bytes = body.len();

    if let Some(navigation) = &config.navigation {
        debug!("Adding navigation fragment ({} bytes)", navigation.len());
        out.write_all(NAVIGATION_MARKER.as_bytes())?;
        out.write_all(navigation.as_bytes())?;
        out.write_all(b"\n")?;
        report.navigation = true;
    }

    out.write_all(BODY_CLOSE.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn write_comment<W: Write>(out: &mut W, label: &str, text: &str) -> io::Result<()> {
    writeln!(out, "<!--{label}{text}-->")
}

/// Copy the head fragment into `out` if it exists. A missing file is not an
/// error; any other failure to open or read it is.
fn copy_fragment<W: Write>(out: &mut W, path: &Path) -> Result<Option<u64>, AssembleError> {
    let fragment_error = |source| AssembleError::Fragment {
        path: path.to_path_buf(),
        source,
    };

    let mut fragment = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Head fragment {} not provided", path.display());
            return Ok(None);
        }
        Err(e) => return Err(fragment_error(e)),
    };

    debug!("Copying {} into the head", path.display());
    let copied = io::copy(&mut fragment, out).map_err(fragment_error)?;
    Ok(Some(copied))
}
