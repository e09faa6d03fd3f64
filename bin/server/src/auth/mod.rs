//! Authentication for the classhub server.
//!
//! This module provides:
//! - the Google OAuth2 authorization-code client (process-wide, immutable)
//! - the session gate middleware protecting the course route groups
//! - the login/callback/logout route handlers
//!
//! The session itself is the only authentication signal: a request is
//! authenticated if and only if its session carries a user. Exchanged tokens
//! are request-scoped values threaded from the session into API calls; the
//! shared OAuth client is never mutated with a user's tokens.

pub mod middleware;
pub mod oauth;
pub mod routes;

pub use middleware::{CurrentUser, GateDecision, SESSION_COOKIE, gate, session_gate};
pub use oauth::{ExchangedTokens, GoogleOAuthClient, OAuthError};
pub use routes::{callback, login, logout};
