//! Command-line resolution.
//!
//! Turns raw arguments into a [`Configuration`] that is fixed before any
//! output file exists. All user errors (unknown flags, missing values, a
//! relative stylesheet root, the wrong number of source files) surface here,
//! so a failed resolution never leaves a half-written page behind.
//!
//! ## Omission mask
//!
//! `-f` takes a hexadecimal mask. A set bit removes one head item:
//!
//! | Bit | Item |
//! |-----|------|
//! | `0x01` | `<!DOCTYPE html>` |
//! | `0x02` | `<title>` |
//! | `0x04` | datetime comment |
//! | `0x08` | author comment |
//!
//! Other bits are ignored. Decoding never fails: the text is read the way C's
//! `strtol(s, NULL, 16)` reads it, so `"0xA"`, `"a"`, `"A junk"` and `"  0x0a"`
//! all mean `0x0A`, and text with no hex digits means `0`.

use crate::config::{self, ConfigError};
use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::error::{ContextKind, ErrorKind};
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of the generated page.
pub const PAGE_EXTENSION: &str = "html";
/// File extension of the optional verbatim head fragment.
pub const FRAGMENT_EXTENSION: &str = "txt";

#[derive(Parser, Debug)]
#[command(name = "webpage", version)]
#[command(about = "Build a simple web page from a CommonMark file")]
#[command(long_about = "\
Build a simple web page from a CommonMark file

The page is written to the current directory, named after the markdown file
with an .html extension. The expectation is that a script walks a content
tree, cd-ing into each directory and running webpage on every .md file there.

Head, in order (each item can be omitted with -f unless noted):
  <!DOCTYPE html>              0x01
  <title>page</title>          0x02
  <!--Author is USER-->        0x08
  <!--Datetime is TIME-->      0x04
  <link rel=\"stylesheet\">      only with -c
  contents of page.txt         only if the file exists, copied verbatim

Body: the rendered markdown (raw HTML passes through), then the -n fragment.")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Output verbose information on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Hexadecimal mask of head items to omit (0x01 doctype, 0x02 title,
    /// 0x04 datetime, 0x08 author)
    #[arg(short = 'f', long = "flags", value_name = "MASK", value_parser = parse_mask_arg)]
    pub omit: Option<u64>,

    /// Absolute path of the site root; enables linking the first stylesheet
    /// found searching from the working directory towards it
    #[arg(
        short = 'c',
        long = "css-root",
        value_name = "DIR",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub css_root: Option<PathBuf>,

    /// Raw HTML appended to the end of the body, e.g. a navigation embed
    #[arg(short = 'n', long = "nav", value_name = "HTML")]
    pub nav: Option<String>,

    /// TOML file with defaults for --flags, --css-root and --nav
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a documented config file and exit
    #[arg(long)]
    pub print_config: bool,

    /// CommonMark file to convert
    #[arg(value_name = "MARKDOWN")]
    pub sources: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum OptionError {
    /// Help or version output requested; not a failure.
    #[error("{0}")]
    Display(clap::Error),
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("option {0} requires a value")]
    MissingOptionValue(String),
    #[error("expecting a markdown file to be specified")]
    MissingSource,
    #[error("expecting exactly one markdown file, got {}", .0.len())]
    ExcessArguments(Vec<PathBuf>),
    #[error("absolute path required for stylesheet root, got {}", .0.display())]
    AbsolutePathRequired(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OptionError {
    fn from_clap(err: clap::Error) -> Self {
        let offending = || {
            err.get(ContextKind::InvalidArg)
                .map(|value| value.to_string())
                .unwrap_or_default()
        };
        match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Self::Display(err),
            ErrorKind::InvalidValue
            | ErrorKind::NoEquals
            | ErrorKind::TooFewValues
            | ErrorKind::WrongNumberOfValues => Self::MissingOptionValue(offending()),
            _ => Self::UnknownOption(offending()),
        }
    }
}

/// Which optional head items are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub doctype: bool,
    pub title: bool,
    pub datetime: bool,
    pub author: bool,
}

impl Sections {
    pub const OMIT_DOCTYPE: u64 = 0x01;
    pub const OMIT_TITLE: u64 = 0x02;
    pub const OMIT_DATETIME: u64 = 0x04;
    pub const OMIT_AUTHOR: u64 = 0x08;

    /// Decode an omission mask. Total: every value is accepted, unknown bits
    /// are ignored.
    pub fn from_omit_mask(mask: u64) -> Self {
        Self {
            doctype: mask & Self::OMIT_DOCTYPE == 0,
            title: mask & Self::OMIT_TITLE == 0,
            datetime: mask & Self::OMIT_DATETIME == 0,
            author: mask & Self::OMIT_AUTHOR == 0,
        }
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::from_omit_mask(0)
    }
}

/// Everything one invocation needs, resolved up front and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub sections: Sections,
    /// Presence enables the stylesheet search and makes a link mandatory.
    pub stylesheet_root: Option<PathBuf>,
    pub navigation: Option<String>,
    /// Markdown file as given on the command line.
    pub source: PathBuf,
    /// Source file name minus its final extension.
    pub source_base_name: String,
    pub verbose: bool,
}

impl Configuration {
    /// Defaults for a source file: every head item on, no stylesheet, no
    /// navigation.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let source_base_name = source_base_name(&source);
        Self {
            sections: Sections::default(),
            stylesheet_root: None,
            navigation: None,
            source,
            source_base_name,
            verbose: false,
        }
    }

    /// `page.md` → `page.html`
    pub fn page_file_name(&self) -> String {
        format!("{}.{}", self.source_base_name, PAGE_EXTENSION)
    }

    /// `page.md` → `page.txt`
    pub fn fragment_file_name(&self) -> String {
        format!("{}.{}", self.source_base_name, FRAGMENT_EXTENSION)
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    Build(Configuration),
    PrintConfig,
}

/// Parse and resolve a full argument list (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Invocation, OptionError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(OptionError::from_clap)?;
    if cli.print_config {
        return Ok(Invocation::PrintConfig);
    }
    resolve(cli).map(Invocation::Build)
}

/// Resolve parsed flags into a configuration.
///
/// Checks run in a fixed order: stylesheet root, config file, source count.
pub fn resolve(cli: Cli) -> Result<Configuration, OptionError> {
    if let Some(root) = &cli.css_root {
        if !root.is_absolute() {
            return Err(OptionError::AbsolutePathRequired(root.clone()));
        }
    }

    let defaults = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::PageConfig::default(),
    };

    let mut sources = cli.sources;
    let source = match sources.len() {
        0 => return Err(OptionError::MissingSource),
        1 => sources.remove(0),
        _ => return Err(OptionError::ExcessArguments(sources)),
    };

    let mask = cli.omit.or(defaults.omit).unwrap_or(0);
    let mut configuration = Configuration::new(source);
    configuration.sections = Sections::from_omit_mask(mask);
    configuration.stylesheet_root = cli.css_root.or(defaults.stylesheet_root);
    configuration.navigation = cli.nav.or(defaults.navigation);
    configuration.verbose = cli.verbose;
    Ok(configuration)
}

fn parse_mask_arg(text: &str) -> Result<u64, Infallible> {
    Ok(parse_hex_mask(text))
}

/// Read a mask the way `strtol(text, NULL, 16)` does.
///
/// Leading whitespace, an optional sign and an optional `0x` prefix are
/// skipped, then the longest run of hex digits is taken. Overflow saturates
/// and a leading `-` negates in two's complement.
pub fn parse_hex_mask(text: &str) -> u64 {
    let mut rest = text.trim_start();
    let negative = rest.starts_with('-');
    if let Some(unsigned) = rest.strip_prefix(['-', '+']) {
        rest = unsigned;
    }
    // "0x" only counts as a prefix when a hex digit follows it.
    if let Some(digits) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        if digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
            rest = digits;
        }
    }

    let mut value: u64 = 0;
    for digit in rest.chars().map_while(|c| c.to_digit(16)) {
        value = value.saturating_mul(16).saturating_add(u64::from(digit));
    }

    if negative { value.wrapping_neg() } else { value }
}

/// Strip the final extension from the source file name.
///
/// `notes.md` → `notes`, `archive.tar.gz` → `archive.tar`, `README` →
/// `README`. A leading dot counts like any other, so `.plan` → `""`.
pub fn source_base_name(source: &Path) -> String {
    let name = source
        .file_name()
        .unwrap_or(source.as_os_str())
        .to_string_lossy();
    match name.rfind('.') {
        Some(dot) => name[..dot].to_string(),
        None => name.into_owned(),
    }
}
