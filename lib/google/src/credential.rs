//! Request-scoped OAuth credentials.
//!
//! Tokens obtained from a code exchange belong to one user's session. They
//! are threaded explicitly into each API call rather than stored on any
//! shared client, so concurrent requests can never race on another user's
//! credentials.

use serde::{Deserialize, Serialize};

/// OAuth 2.0 tokens for a single authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredentials {
    access_token: String,
    refresh_token: Option<String>,
}

impl AccessCredentials {
    /// Creates credentials from exchanged tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }

    /// Returns the bearer token for `Authorization` headers.
    #[must_use]
    pub fn bearer(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token, if the provider issued one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}
