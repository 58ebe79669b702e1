//! Error type shared by every fallible operation in the crate.

use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A configuration value is out of its valid range.
    InvalidConfig {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    /// An operation needed at least one sample and got none.
    EmptyDataset { context: &'static str },

    /// Input or target width disagrees with the network.
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: &'static str,
    },

    /// Training diverged.
    NonFiniteLoss { epoch: usize },

    /// The least-squares normal equations have no unique solution.
    Singular,

    Io(io::Error),

    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(parameter: &'static str, value: impl fmt::Display, reason: &'static str) -> Self {
        Error::InvalidConfig {
            parameter,
            value: value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { parameter, value, reason } => {
                write!(f, "invalid {parameter} = {value}: {reason}")
            }
            Error::EmptyDataset { context } => write!(f, "empty dataset in {context}"),
            Error::ShapeMismatch { expected, got, context } => {
                write!(f, "shape mismatch in {context}: expected {expected}, got {got}")
            }
            Error::NonFiniteLoss { epoch } => {
                write!(f, "training loss became non-finite at epoch {epoch}")
            }
            Error::Singular => write!(f, "least-squares system is singular"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
