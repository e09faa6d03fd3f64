//! Session gate middleware.
//!
//! Layered over the protected route groups. For each request it resolves
//! the cookie session (creating an empty one for session-less clients),
//! applies the pure [`gate`] decision, and either threads the authenticated
//! user and their request-scoped credentials to the downstream handler or
//! bounces the request to `/login` after recording where it was headed.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use classhub_google::AccessCredentials;
use classhub_session::{Session, SessionId, SessionState, User};

use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Outcome of the gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Invoke the downstream handler.
    Permit,
    /// Do not invoke downstream handlers; redirect to the login page.
    RedirectToLogin,
}

/// The pure routing decision: a function of session state and path only.
///
/// Authenticated sessions always pass. Anonymous sessions pass only for the
/// login page and the OAuth callback paths, so the OAuth dance is never
/// itself gated.
#[must_use]
pub fn gate(state: SessionState, path: &str) -> GateDecision {
    match state {
        SessionState::Authenticated => GateDecision::Permit,
        SessionState::Anonymous => {
            if path == "/login" || path.starts_with("/auth") {
                GateDecision::Permit
            } else {
                GateDecision::RedirectToLogin
            }
        }
    }
}

/// The authenticated user threaded to downstream handlers, with the
/// request-scoped credentials for upstream API calls.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub credentials: AccessCredentials,
}

/// Resolves the request's session, creating a fresh anonymous one when the
/// client has no cookie or the cookie points at a session that no longer
/// exists. Returns the session id and the jar (carrying the new cookie when
/// one was issued).
pub async fn resolve_session(
    state: &AppState,
    jar: SignedCookieJar,
) -> (SessionId, SignedCookieJar) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let id = SessionId::from(cookie.value());
        if state.sessions.get(&id).await.is_some() {
            return (id, jar);
        }
    }

    let id = state.sessions.create().await;
    let cookie = Cookie::build((SESSION_COOKIE, id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    (id, jar)
}

/// The authentication gate, applied to the protected route groups.
pub async fn session_gate(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let (session_id, jar) = resolve_session(&state, jar).await;
    let session = state.sessions.get(&session_id).await;
    let session_state = session.as_ref().map_or(SessionState::Anonymous, Session::state);
    let path = request.uri().path().to_string();

    match gate(session_state, &path) {
        GateDecision::Permit => {
            if let Some(session) = session
                && let Some(user) = session.user()
            {
                let Some(access_token) = session.access_token() else {
                    // Cannot happen through the normal flow: user and tokens
                    // are written together at the end of the callback.
                    return (jar, state.errors.internal("authenticated session has no tokens"))
                        .into_response();
                };
                request.extensions_mut().insert(CurrentUser {
                    user: user.clone(),
                    credentials: AccessCredentials::new(
                        access_token,
                        session.refresh_token().map(str::to_string),
                    ),
                });
            }
            (jar, next.run(request).await).into_response()
        }
        GateDecision::RedirectToLogin => {
            // Capture the full original URL, query string included, so the
            // post-login redirect restores it exactly.
            let target = request
                .uri()
                .path_and_query()
                .map_or(path.as_str(), |pq| pq.as_str())
                .to_string();
            if let Err(err) = state
                .sessions
                .capture_redirect_target(&session_id, &target)
                .await
            {
                tracing::warn!(error = %err, "failed to record login redirect target");
            }
            tracing::debug!(%path, "redirecting unauthenticated request to /login");
            (jar, Redirect::to("/login")).into_response()
        }
    }
}
