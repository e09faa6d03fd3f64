//! Error types for the session crate.

use std::fmt;

use crate::session::SessionId;

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// No session record exists for the given id.
    NotFound { id: SessionId },
}

impl fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "session not found: {id}")
            }
        }
    }
}

impl std::error::Error for SessionStoreError {}
