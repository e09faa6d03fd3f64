//! Error types for the Google API clients.

use std::fmt;

/// Errors from Google API calls.
///
/// Every variant surfaces to the caller as a server-error response; none are
/// retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleApiError {
    /// The request could not be sent or the response body not read.
    RequestFailed { reason: String },
    /// The API answered with a non-success status.
    Status { status: u16, body: String },
    /// The response parsed but did not carry the expected fields.
    MalformedResponse { reason: String },
}

impl GoogleApiError {
    /// Wraps a transport-level error.
    #[must_use]
    pub fn request(err: &reqwest::Error) -> Self {
        Self::RequestFailed {
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for GoogleApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { reason } => {
                write!(f, "request failed: {reason}")
            }
            Self::Status { status, body } => {
                write!(f, "API returned status {status}: {body}")
            }
            Self::MalformedResponse { reason } => {
                write!(f, "malformed API response: {reason}")
            }
        }
    }
}

impl std::error::Error for GoogleApiError {}
