//! Top-level error and process exit codes.
//!
//! User mistakes each get their own small exit code so a driving script can
//! tell them apart. Everything else (I/O failures, an unnamed user, a renderer
//! failure) is not expected in a working setup and shares one code, the same
//! one a Rust panic exits with.

use crate::assemble::AssembleError;
use crate::config::ConfigError;
use crate::options::OptionError;
use crate::stylesheet::LocateError;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    MissingSource = 1,
    MissingOptionValue = 2,
    UnknownOption = 3,
    NoStylesheetFound = 4,
    AbsolutePathRequired = 5,
    OutsideDeclaredRoot = 6,
    ExcessArguments = 7,
    InvalidConfig = 8,
    Unrecoverable = 101,
}

impl ExitCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            1 => Some(Self::MissingSource),
            2 => Some(Self::MissingOptionValue),
            3 => Some(Self::UnknownOption),
            4 => Some(Self::NoStylesheetFound),
            5 => Some(Self::AbsolutePathRequired),
            6 => Some(Self::OutsideDeclaredRoot),
            7 => Some(Self::ExcessArguments),
            8 => Some(Self::InvalidConfig),
            101 => Some(Self::Unrecoverable),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Options(#[from] OptionError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Options(err) => match err {
                OptionError::Display(_) => ExitCode::Success,
                OptionError::UnknownOption(_) => ExitCode::UnknownOption,
                OptionError::MissingOptionValue(_) => ExitCode::MissingOptionValue,
                OptionError::MissingSource => ExitCode::MissingSource,
                OptionError::ExcessArguments(_) => ExitCode::ExcessArguments,
                OptionError::AbsolutePathRequired(_)
                | OptionError::Config(ConfigError::RelativeStylesheetRoot(_)) => {
                    ExitCode::AbsolutePathRequired
                }
                OptionError::Config(_) => ExitCode::InvalidConfig,
            },
            Self::Assemble(err) => match err {
                AssembleError::NoStylesheetFound(_) => ExitCode::NoStylesheetFound,
                AssembleError::Locate(LocateError::OutsideDeclaredRoot { .. }) => {
                    ExitCode::OutsideDeclaredRoot
                }
                _ => ExitCode::Unrecoverable,
            },
            Self::Io(_) => ExitCode::Unrecoverable,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
