//! Shared application state.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use classhub_google::{ClassroomClient, IdentityResolver};
use classhub_session::SessionStore;

use crate::auth::GoogleOAuthClient;
use crate::error::ErrorTranslator;

/// Application state shared by all handlers.
///
/// Everything here is either immutable configuration or internally
/// synchronized; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// In-memory session store.
    pub sessions: SessionStore,
    /// OAuth2 client configuration.
    pub oauth: GoogleOAuthClient,
    /// People API client.
    pub identity: IdentityResolver,
    /// Classroom API client.
    pub classroom: ClassroomClient,
    /// Error-to-response mapping.
    pub errors: ErrorTranslator,
    /// Key for signing session cookies, derived from the configured secret.
    pub cookie_key: Key,
    /// Whether cookies carry the Secure flag.
    pub secure_cookies: bool,
}

impl AppState {
    /// Looks up the session user for a request outside the gate (the public
    /// pages, which render differently for signed-in users).
    pub async fn session_user(
        &self,
        jar: &axum_extra::extract::SignedCookieJar,
    ) -> Option<classhub_session::User> {
        let cookie = jar.get(crate::auth::SESSION_COOKIE)?;
        let id = classhub_session::SessionId::from(cookie.value());
        self.sessions
            .get(&id)
            .await
            .and_then(|session| session.user().cloned())
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
