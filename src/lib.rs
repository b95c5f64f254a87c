//! # webpage
//!
//! Build one simple static web page from one CommonMark file. Really, brutally
//! simple: no templates, no front matter, no site model. A shell loop walks the
//! content tree and runs `webpage` once per markdown file, from that file's
//! directory:
//!
//! ```text
//! find /srv/site -name '*.md' -execdir webpage -c /srv/site {} \;
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Resolve   argv (+ --config file)  →  Configuration   (all user errors here)
//! 2. Assemble  Configuration           →  page.html       (one forward pass)
//!                ├─ stylesheet search up towards the declared root
//!                ├─ page.txt copied verbatim into <head>
//!                └─ page.md rendered into <body>
//! ```
//!
//! Resolution finishes before the page file is created, so bad flags never
//! clobber an existing page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | Command line → [`options::Configuration`]; omission mask, base name |
//! | [`config`] | Optional TOML file of defaults for the content flags |
//! | [`stylesheet`] | Bounded upward search for a stylesheet, behind [`stylesheet::DirectoryProbe`] |
//! | [`assemble`] | Writes the page in its fixed section order |
//! | [`render`] | CommonMark → HTML with raw HTML passthrough |
//! | [`host`] | Effective user name and local timestamp |
//! | [`output`] | Verbose summaries of the configuration and the finished page |
//! | [`error`] | Top-level error and exit codes |
//!
//! # Design Decisions
//!
//! ## Streaming, Not Templating
//!
//! The page is written straight to a buffered file in document order. There
//! is no document tree: a section is final as soon as it is written, and the
//! structural tags (`<html>`, `<head>`, `<body>`) are emitted by fixed code
//! paths that always pair them.
//!
//! ## Stylesheets Are Found, Not Configured
//!
//! Pages deep in a tree link the nearest stylesheet above them, as a relative
//! path, so the published tree can be moved or served from any prefix. The
//! declared root is a hard boundary: the search never looks above it, and a
//! page built outside it is an error rather than a silent walk to `/`.
//!
//! ## Raw HTML Passes Through
//!
//! Markdown is rendered with raw HTML enabled and no sanitizing. The head
//! fragment and navigation fragment are likewise copied as-is. The author of
//! the content tree is trusted.

pub mod assemble;
pub mod config;
pub mod error;
pub mod host;
pub mod options;
pub mod output;
pub mod render;
pub mod stylesheet;

pub use error::{Error, ExitCode, Result};

#[cfg(test)]
pub(crate) mod test_helpers;
