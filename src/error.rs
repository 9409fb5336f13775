//! Error types for design operations.
//!
//! Every failure surfaces through [`DesignError`]. Callers that only care about
//! the coarse outcome can use [`DesignError::kind`], which folds the variants
//! into three classes: bad input, a rejected call, or no response at all.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DesignError>;

/// Coarse classification of a [`DesignError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or empty input, detected before any network call.
    InvalidArgument,
    /// The service answered with a status other than 200 or 302.
    RemoteRejected,
    /// The transport produced no response.
    RemoteUnreachable,
}

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to {context} due to {status_line}")]
    RemoteRejected {
        context: String,
        status_line: String,
        body: Option<String>,
    },

    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Failed to find {kind} {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Failed to {context} due to no response: {source}")]
    RemoteUnreachable {
        context: String,
        #[source]
        source: TransportError,
    },
}

impl DesignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::RemoteRejected { .. } | Self::AlreadyExists { .. } | Self::NotFound { .. } => {
                ErrorKind::RemoteRejected
            }
            Self::RemoteUnreachable { .. } => ErrorKind::RemoteUnreachable,
        }
    }

    pub(crate) fn missing(what: &str) -> Self {
        Self::InvalidArgument(format!("Missing {}", what))
    }
}

/// Failure reported by a [`Transport`](crate::transport::Transport) when no
/// response could be obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Fail with `InvalidArgument` unless `value` is non-empty.
pub(crate) fn require<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(DesignError::missing(what))
    } else {
        Ok(value)
    }
}
