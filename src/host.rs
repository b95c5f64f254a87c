//! Identity and clock queries for the head annotations.
//!
//! The author comment names the *effective* user running the build, looked up
//! through the user database. A uid with no name is an error: a page quietly
//! attributed to nobody is worse than a failed build.

use chrono::Local;
use thiserror::Error;

/// Same layout as C's `strftime("%c")` in the POSIX locale,
/// e.g. `Sun Oct 18 09:00:00 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Error, Debug)]
pub enum HostError {
    #[error("effective user id {0} has no user name")]
    UnknownUser(u32),
    #[error("cannot determine the current user name")]
    Unavailable,
}

/// What the page needs to know about the machine building it.
pub trait Host {
    fn current_user_name(&self) -> Result<String, HostError>;

    fn local_timestamp(&self) -> String;
}

/// The running process and the local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn current_user_name(&self) -> Result<String, HostError> {
        effective_user_name()
    }

    fn local_timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(unix)]
fn effective_user_name() -> Result<String, HostError> {
    let uid = uzers::get_effective_uid();
    uzers::get_user_by_uid(uid)
        .map(|user| user.name().to_string_lossy().into_owned())
        .ok_or(HostError::UnknownUser(uid))
}

#[cfg(not(unix))]
fn effective_user_name() -> Result<String, HostError> {
    std::env::var("USERNAME").map_err(|_| HostError::Unavailable)
}
