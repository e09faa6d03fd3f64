//! The authenticated user record held by a session.

use serde::{Deserialize, Serialize};

/// The user associated with an authenticated session.
///
/// Derived from the identity provider's people-information response at the
/// end of the OAuth callback. One session holds at most one user; the record
/// is not persisted beyond the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name reported by the identity provider.
    pub username: String,
    /// Primary email address reported by the identity provider.
    pub email: String,
}

impl User {
    /// Creates a user record from identity-provider fields.
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
