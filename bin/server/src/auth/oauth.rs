//! Google OAuth2 client for the login flow.
//!
//! Wraps the `oauth2` crate's authorization-code flow for the single
//! configured application identity. The client holds only configuration
//! (id, secret, redirect URI, endpoints) and is shared read-only across all
//! requests; exchanged tokens belong to the request that performed the
//! exchange.

use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
    basic::BasicClient,
};

use crate::config::GoogleCredentials;

/// Google OAuth authorization URL.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth token URL.
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// The single read-only course scope requested at login.
const CLASSROOM_READ_SCOPE: &str = "https://www.googleapis.com/auth/classroom.courses.readonly";

/// OAuth2 client configuration.
#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    redirect_url: String,
}

/// Tokens obtained from a completed code exchange.
///
/// Expiry is deliberately not carried: session validity depends only on the
/// presence of a user, never on token lifetime.
#[derive(Debug)]
pub struct ExchangedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl GoogleOAuthClient {
    /// Creates a client from the configured application identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the redirect URI is not a valid URL.
    pub fn new(credentials: &GoogleCredentials) -> Result<Self, OAuthError> {
        // Validate up front so a bad redirect URI fails at startup.
        let _ = RedirectUrl::new(credentials.redirect_uri.clone())
            .map_err(|e| OAuthError::Configuration(format!("invalid redirect URL: {e}")))?;

        Ok(Self {
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            redirect_url: credentials.redirect_uri.clone(),
        })
    }

    /// Points the client at alternate endpoints (tests).
    #[must_use]
    pub fn with_endpoints(mut self, auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self
    }

    /// The scope requested at login.
    #[must_use]
    pub fn scope(&self) -> &'static str {
        CLASSROOM_READ_SCOPE
    }

    /// Builds the consent-screen URL the login route redirects to.
    ///
    /// Requests offline access so a refresh token is issued.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(self.auth_url.clone()).expect("valid auth URL"))
            .set_redirect_uri(
                RedirectUrl::new(self.redirect_url.clone()).expect("valid redirect URL"),
            );

        let (auth_url, _csrf_token) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(CLASSROOM_READ_SCOPE.to_string()))
            .add_extra_param("access_type", "offline")
            .url();

        auth_url.to_string()
    }

    /// Exchanges the authorization code for tokens.
    ///
    /// Codes are single-use at the provider; replaying one fails here and
    /// surfaces as the standard server-error path.
    pub async fn exchange_code(&self, code: &str) -> Result<ExchangedTokens, OAuthError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| OAuthError::TokenExchange(format!("HTTP client error: {e}")))?;

        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_token_uri(TokenUrl::new(self.token_url.clone()).expect("valid token URL"))
            .set_redirect_uri(
                RedirectUrl::new(self.redirect_url.clone()).expect("valid redirect URL"),
            );

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| OAuthError::TokenExchange(format!("token exchange failed: {e}")))?;

        Ok(ExchangedTokens {
            access_token: token_result.access_token().secret().clone(),
            refresh_token: token_result.refresh_token().map(|t| t.secret().clone()),
        })
    }
}

/// OAuth-related errors.
#[derive(Debug)]
pub enum OAuthError {
    /// Configuration error (invalid URLs, etc.)
    Configuration(String),
    /// Token exchange failed.
    TokenExchange(String),
}

impl std::fmt::Display for OAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "OAuth configuration error: {msg}"),
            Self::TokenExchange(msg) => write!(f, "OAuth token exchange error: {msg}"),
        }
    }
}

impl std::error::Error for OAuthError {}
