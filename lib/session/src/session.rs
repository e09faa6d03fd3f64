//! The session record and its state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// Unique identifier for a session.
///
/// Session IDs are opaque ULID strings carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from an existing string (e.g. a cookie value).
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh random session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Authentication state of a session.
///
/// A session is authenticated if and only if it carries a user; token
/// presence or expiry is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No user established yet.
    Anonymous,
    /// A user was established by a completed OAuth exchange.
    Authenticated,
}

/// A server-side session record.
///
/// Created empty on the first request from a session-less client. The user
/// and tokens are written exactly once, at the end of a successful OAuth
/// callback. `redirect_to` holds a single pending post-login path with
/// consume-once semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    user: Option<User>,
    redirect_to: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new anonymous session.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            user: None,
            redirect_to: None,
            access_token: None,
            refresh_token: None,
            created_at: Utc::now(),
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current state of the session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.user.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Returns the authenticated user, if established.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns the access token established at authentication, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the refresh token established at authentication, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Performs the single forward transition: anonymous -> authenticated.
    ///
    /// Writes the user and the tokens obtained from the completed code
    /// exchange. Calling this on an already-authenticated session replaces
    /// the user and tokens (a repeated login through the full flow).
    pub fn authenticate(
        &mut self,
        user: User,
        access_token: String,
        refresh_token: Option<String>,
    ) {
        self.user = Some(user);
        self.access_token = Some(access_token);
        self.refresh_token = refresh_token;
    }

    /// Records a pending post-login redirect target.
    ///
    /// Only the first capture wins: a target already pending is not
    /// overwritten, so the user returns to the page that originally
    /// triggered the login.
    pub fn capture_redirect_target(&mut self, path: &str) {
        if self.redirect_to.is_none() {
            self.redirect_to = Some(path.to_string());
        }
    }

    /// Consumes the pending redirect target, if any.
    ///
    /// The target is cleared on read so a second callback (or a race) can
    /// never redirect to a stale path.
    pub fn take_redirect_target(&mut self) -> Option<String> {
        self.redirect_to.take()
    }

    /// Returns the pending redirect target without consuming it.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }
}
