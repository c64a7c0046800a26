use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for fixture loading and resolution.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A resolver or macro name outside `[A-Za-z0-9_]+`.
    #[error("[FIXTURE] {kind} name must be alphanumeric, got '{name}'")]
    InvalidName { kind: &'static str, name: String },

    #[error("[FIXTURE] Fixture identifier is required")]
    MissingIdentifier,

    /// Raised when the source file does not exist. The io error is kept intact.
    #[error("[FIXTURE] Fixture not found '{}': {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[FIXTURE] Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raised when a document is not valid JSON once comments are stripped.
    #[error("[FIXTURE] JSON parse error in '{filename}' at {line}:{column}: {message}, json: {content}")]
    Parse {
        filename: String,
        message: String,
        line: usize,
        column: usize,
        content: String,
    },

    #[error("[FIXTURE] Macro '{name}' failed: {message}")]
    Macro { name: String, message: String },

    /// Raised by a resolver; aborts the whole load.
    #[error("[FIXTURE] Resolver '{name}' failed: {message}")]
    Resolver { name: String, message: String },

    #[error("[FIXTURE] Invalid options: {message}")]
    Options { message: String },
}

impl FixtureError {
    pub fn resolver(name: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::Resolver {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn macro_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::Macro {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap an io error, keeping "not found" distinguishable.
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FixtureError::NotFound { path, source }
        } else {
            FixtureError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FixtureError::NotFound { .. })
    }

    /// Stable numeric code for each error kind.
    pub fn code(&self) -> u32 {
        match self {
            FixtureError::InvalidName { .. } => 101,
            FixtureError::MissingIdentifier => 102,
            FixtureError::Options { .. } => 103,
            FixtureError::Parse { .. } => 201,
            FixtureError::NotFound { .. } => 301,
            FixtureError::Io { .. } => 302,
            FixtureError::Macro { .. } => 401,
            FixtureError::Resolver { .. } => 402,
        }
    }
}
