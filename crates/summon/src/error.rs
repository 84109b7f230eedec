//! Errors.
use snafu::Snafu;

use crate::{Str, shell::Platform};

/// A type-erased error raised by application callbacks such as `on_done`.
pub type BoxError = Box<dyn std::error::Error + 'static>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "The '{platform}' platform is not available in this build, enable the `{platform}` feature"
    ))]
    PlatformUnavailable { platform: Platform },

    #[snafu(display(
        "Requested the '{requested}' platform but the mounted shell presents for '{provided}'"
    ))]
    PlatformMismatch {
        requested: Platform,
        provided: Platform,
    },

    #[snafu(display("Modal '{id}' could not complete: {source}"))]
    Done { id: Str, source: BoxError },

    #[snafu(display("Unknown platform '{name}', expected 'web' or 'mobile'"))]
    UnknownPlatform { name: String },

    #[snafu(display("DOM operation failed: {msg}"))]
    Dom { msg: String },

    #[snafu(display("Invalid modal configuration: {source}"))]
    Config { source: serde_json::Error },
}

impl Error {
    /// Whether this error is a fatal configuration mistake in the host
    /// application, as opposed to a failure the user can retry.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::PlatformUnavailable { .. }
                | Error::PlatformMismatch { .. }
                | Error::UnknownPlatform { .. }
                | Error::Config { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
