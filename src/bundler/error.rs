//! Error types for bundling operations.
//!
//! Every failure in the bundling core surfaces as an [`Error`]. Nothing is
//! recovered locally: callers decide whether to retry a bundle from scratch.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the bundling core.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration detected while building [`Settings`](super::Settings).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A logical path could not be resolved by the templating collaborator.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The external JavaScript runtime exited unsuccessfully.
    #[error("{program} {}: {stderr}", describe_exit(.exit_code))]
    ProcessFailed {
        /// Program that was run
        program: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// The configured runtime executable could not be located.
    #[error("JavaScript runtime `{executable}` not found: {source}")]
    RuntimeNotFound {
        /// Executable name or path as configured
        executable: String,
        /// Lookup failure
        #[source]
        source: which::Error,
    },

    /// A subprocess could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying spawn error
        #[source]
        error: std::io::Error,
    },

    /// Filesystem failure with the operation and path that caused it.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML settings parse errors.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Optimizer script rendering errors.
    #[error("failed to render optimizer script: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Optimizer script registration errors.
    #[error("invalid optimizer script template: {0}")]
    TemplateDefinition(#[from] handlebars::TemplateError),

    /// Passthrough extension pattern errors.
    #[error("invalid passthrough pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl Error {
    /// Returns true if this error is [`Error::TemplateNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TemplateNotFound(_))
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts the IO error into [`Error::Fs`] carrying `context` and `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Turns `None` into an error carrying a description.
pub trait Context<T> {
    /// Fails with `context` when there is no value.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
