use serde_json::Value;

use crate::wire;

/// A versioned set of pending design changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub release_id: Option<i64>,
    pub release_state: ReleaseState,
    pub raw: Value,
}

impl Release {
    pub fn from_value(raw: Value) -> Self {
        let release_id = wire::lookup(&raw, "releaseId").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });
        let release_state = wire::lookup(&raw, "releaseState")
            .and_then(Value::as_str)
            .map(ReleaseState::from_str)
            .unwrap_or(ReleaseState::Unknown);
        Self {
            release_id,
            release_state,
            raw,
        }
    }
}

/// Release lifecycle state as reported by the service.
///
/// Only `Open` matters to the client: it is the one state that can be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseState {
    Open,
    Closed,
    Committed,
    Other(String),
    /// The body carried no `releaseState`.
    Unknown,
}

impl ReleaseState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Committed => "committed",
            Self::Other(s) => s,
            Self::Unknown => "",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "open" => Self::Open,
            "closed" => Self::Closed,
            "committed" => Self::Committed,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Result of [`Design::commit_design`](crate::design::Design::commit_design).
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// An open release was found and committed. Holds the commit response.
    Committed(Release),
    /// The latest release was not open, so nothing was sent.
    NothingToCommit(Release),
}

impl CommitOutcome {
    pub fn release(&self) -> &Release {
        match self {
            Self::Committed(r) | Self::NothingToCommit(r) => r,
        }
    }
}
