//! Login, OAuth callback, and logout routes.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Cookie;
use serde::Deserialize;
use time::Duration as TimeDuration;

use classhub_google::AccessCredentials;
use classhub_session::{SessionId, User};

use super::middleware::{SESSION_COOKIE, resolve_session};
use crate::error::AppError;
use crate::state::AppState;

/// Where a completed login lands when no redirect target was captured.
const DEFAULT_LANDING: &str = "/courses_create_edit";

/// Query parameters for the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
}

/// `GET /login` — redirects to the identity provider's consent screen.
///
/// No session mutation happens here; the session (and any pending redirect
/// target) was established by the gate that sent the user this way.
pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.oauth.authorization_url())
}

/// `GET /auth?code=…` — completes the authorization-code exchange and
/// establishes the session.
///
/// A missing code is a terminal client error. Exchange or identity-lookup
/// failures respond 500 and leave the session untouched. On success the
/// session transitions to authenticated and the response redirects to the
/// consumed redirect target, else the default landing path.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let Some(code) = query.code else {
        return Err(state.errors.bad_request("Code not found."));
    };

    let tokens = state
        .oauth
        .exchange_code(&code)
        .await
        .map_err(|e| state.errors.auth_failed(&e))?;
    let credentials = AccessCredentials::new(tokens.access_token, tokens.refresh_token);

    let profile = state
        .identity
        .resolve(&credentials)
        .await
        .map_err(|e| state.errors.auth_failed(&e))?;

    // Both external calls succeeded; only now touch the session.
    let (session_id, jar) = resolve_session(&state, jar).await;
    let user = User::new(profile.display_name, profile.email);
    state
        .sessions
        .authenticate(
            &session_id,
            user.clone(),
            credentials.bearer().to_string(),
            credentials.refresh_token().map(str::to_string),
        )
        .await
        .map_err(|e| state.errors.session_store(&e))?;

    let target = state
        .sessions
        .take_redirect_target(&session_id)
        .await
        .unwrap_or_else(|| DEFAULT_LANDING.to_string());

    tracing::info!(session_id = %session_id, email = %user.email, "login completed");
    Ok((jar, Redirect::to(&target)).into_response())
}

/// `GET /logout` — destroys the session and redirects to the login page.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let jar = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::from(cookie.value());
        state
            .sessions
            .destroy(&session_id)
            .await
            .map_err(|e| state.errors.logout_failed(&e))?;

        let remove_session = Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .max_age(TimeDuration::ZERO);
        jar.add(remove_session)
    } else {
        jar
    };

    Ok((jar, Redirect::to("/login")).into_response())
}
