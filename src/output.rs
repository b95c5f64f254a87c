//! Verbose run summaries.
//!
//! Nothing here touches the page. With `-v` the resolved configuration is
//! logged before the build and a report of what went into the page after it:
//!
//! ```text
//! page.md → page.html
//!     Title: page
//!     Author: alice
//!     Datetime: Sun Oct 18 09:00:00 2026
//!     Stylesheet: ./../site.css
//!     Head fragment: 42 bytes
//!     Body: 1830 bytes
//!     Navigation: appended
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `log_*` wrappers
//! hand them to the logger.

use crate::assemble::AssemblyReport;
use crate::options::Configuration;
use log::{debug, info};

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Describe a resolved configuration.
pub fn format_configuration(config: &Configuration) -> Vec<String> {
    let sections = &config.sections;
    let mut lines = vec![
        format!(
            "Source: {} (base name \"{}\")",
            config.source.display(),
            config.source_base_name
        ),
        format!(
            "    Doctype {}, title {}, author {}, datetime {}",
            on_off(sections.doctype),
            on_off(sections.title),
            on_off(sections.author),
            on_off(sections.datetime)
        ),
    ];
    match &config.stylesheet_root {
        Some(root) => lines.push(format!("    Stylesheet root: {}", root.display())),
        None => lines.push("    Stylesheet: disabled".to_string()),
    }
    if let Some(nav) = &config.navigation {
        lines.push(format!("    Navigation: {nav}"));
    }
    lines
}

/// Describe a finished page.
pub fn format_report(config: &Configuration, report: &AssemblyReport) -> Vec<String> {
    let page = report
        .page
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.page_file_name());
    let mut lines = vec![format!("{} → {}", config.source.display(), page)];

    if let Some(title) = &report.title {
        lines.push(format!("    Title: {title}"));
    }
    if let Some(author) = &report.author {
        lines.push(format!("    Author: {author}"));
    }
    if let Some(datetime) = &report.datetime {
        lines.push(format!("    Datetime: {datetime}"));
    }
    if let Some(href) = &report.stylesheet {
        lines.push(format!("    Stylesheet: {href}"));
    }
    match report.fragment_bytes {
        Some(bytes) => lines.push(format!("    Head fragment: {bytes} bytes")),
        None => lines.push("    Head fragment: none".to_string()),
    }
    lines.push(format!("    Body: {} bytes", report.body_bytes));
    if report.navigation {
        lines.push("    Navigation: appended".to_string());
    }
    lines
}

pub fn log_configuration(config: &Configuration) {
    for line in format_configuration(config) {
        debug!("{line}");
    }
}

pub fn log_report(config: &Configuration, report: &AssemblyReport) {
    for line in format_report(config, report) {
        info!("{line}");
    }
}
