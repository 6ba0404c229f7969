//! Error types for CodeCritic core.

use std::{error::Error, fmt, io};

/// Error type for critique loading.
///
/// The scoring and aggregation engine itself never fails; only reading
/// critiques from disk or from a manifest can.
#[derive(Debug)]
pub enum CodeCriticError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A critique manifest could not be decoded.
    Manifest(serde_json::Error),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for CodeCriticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Manifest(err) => write!(f, "invalid critique manifest: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CodeCriticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Manifest(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}

impl From<io::Error> for CodeCriticError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CodeCriticError {
    fn from(value: serde_json::Error) -> Self {
        Self::Manifest(value)
    }
}

/// Convenience result type for CodeCritic core.
pub type Result<T> = std::result::Result<T, CodeCriticError>;
