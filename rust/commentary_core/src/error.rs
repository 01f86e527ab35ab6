//! Error types for thread mutations.

use thiserror::Error;

use crate::comment::CommentId;

pub type Result<T> = std::result::Result<T, ThreadError>;

/// Failure reported by a transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("malformed {action} response: {reason}")]
    Malformed { action: &'static str, reason: String },

    #[error("server rejected {action}")]
    Rejected { action: &'static str },

    #[error("comment {0} is already in the thread")]
    DuplicateComment(CommentId),

    #[error("unknown form identifier: {0:?}")]
    UnknownForm(String),

    #[error("invalid thread config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ThreadError {
    #[must_use]
    pub fn malformed(action: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            action,
            reason: reason.into(),
        }
    }

    /// True when the failure came from the network round-trip itself rather
    /// than from what the server sent back.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
