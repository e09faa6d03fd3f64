//! Error translation at the edge of the middleware chain.
//!
//! Two-stage fallback: unmatched routes become a rendered 404, and every
//! handler error becomes an [`AppError`] rendered through the shared error
//! view with its declared status (500 by default). Underlying causes are
//! logged server-side at translation time; the response body carries them
//! only in development mode.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use classhub_google::GoogleApiError;
use classhub_session::SessionStoreError;

use crate::state::AppState;
use crate::views;

/// A handler error ready to be rendered.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    /// Underlying cause; populated only in development mode.
    detail: Option<String>,
}

impl AppError {
    /// Returns the response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the development-mode detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            views::error_page(self.status, &self.message, self.detail.as_deref()),
        )
            .into_response()
    }
}

/// Maps failures to HTTP responses.
///
/// Constructed once from configuration; `dev_mode` decides whether error
/// detail reaches the client body. All upstream causes are logged here
/// regardless of mode.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTranslator {
    dev_mode: bool,
}

impl ErrorTranslator {
    /// Creates a translator.
    #[must_use]
    pub fn new(dev_mode: bool) -> Self {
        Self { dev_mode }
    }

    fn with_detail(&self, status: StatusCode, message: &str, detail: String) -> AppError {
        AppError {
            status,
            message: message.to_string(),
            detail: self.dev_mode.then_some(detail),
        }
    }

    /// Routing miss: no handler matched the path.
    #[must_use]
    pub fn not_found(&self, path: &str) -> AppError {
        self.with_detail(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("no route matches '{path}'"),
        )
    }

    /// Client input error; terminal, the user must restart the flow.
    #[must_use]
    pub fn bad_request(&self, message: &str) -> AppError {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            detail: None,
        }
    }

    /// Token exchange or identity lookup failed.
    #[must_use]
    pub fn auth_failed(&self, cause: &dyn std::fmt::Display) -> AppError {
        tracing::error!(error = %cause, "authentication failed");
        self.with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication failed",
            cause.to_string(),
        )
    }

    /// A Classroom or People API call failed.
    #[must_use]
    pub fn upstream(&self, cause: &GoogleApiError) -> AppError {
        tracing::error!(error = %cause, "upstream API call failed");
        self.with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Upstream request failed",
            cause.to_string(),
        )
    }

    /// Session destruction failed during logout.
    #[must_use]
    pub fn logout_failed(&self, cause: &SessionStoreError) -> AppError {
        tracing::error!(error = %cause, "failed to destroy session");
        self.with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not log out",
            cause.to_string(),
        )
    }

    /// Session store failure outside logout.
    #[must_use]
    pub fn session_store(&self, cause: &SessionStoreError) -> AppError {
        tracing::error!(error = %cause, "session store failure");
        self.with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            cause.to_string(),
        )
    }

    /// Invariant violation inside the server.
    #[must_use]
    pub fn internal(&self, reason: &str) -> AppError {
        tracing::error!(reason, "internal error");
        self.with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            reason.to_string(),
        )
    }
}

/// Router fallback: synthesizes the 404 condition for unmatched paths.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> AppError {
    state.errors.not_found(uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_errors_carry_no_detail() {
        let translator = ErrorTranslator::new(false);
        let err = translator.auth_failed(&"token exchange failed: invalid_grant");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Authentication failed");
        assert!(err.detail().is_none());
    }

    #[test]
    fn dev_errors_carry_the_cause() {
        let translator = ErrorTranslator::new(true);
        let err = translator.auth_failed(&"token exchange failed: invalid_grant");

        assert_eq!(err.detail(), Some("token exchange failed: invalid_grant"));
    }

    #[test]
    fn not_found_is_404() {
        let translator = ErrorTranslator::new(false);
        let err = translator.not_found("/nope");

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn bad_request_keeps_its_message() {
        let translator = ErrorTranslator::new(false);
        let err = translator.bad_request("Code not found.");

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Code not found.");
    }
}
