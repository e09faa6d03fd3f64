//! People API client used as the identity resolver.
//!
//! Runs exactly once per login, during the OAuth callback: the freshly
//! exchanged tokens are used to fetch `people/me` and map the primary
//! display name and email into the session's user record.

use serde_json::Value;

use crate::credential::AccessCredentials;
use crate::error::GoogleApiError;

/// Google People API base URL.
const PEOPLE_API_BASE: &str = "https://people.googleapis.com";

/// The person fields the resolver requests.
const PERSON_FIELDS: &str = "names,emailAddresses";

/// The authenticated principal's identity as reported by the People API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Primary display name.
    pub display_name: String,
    /// Primary email address.
    pub email: String,
}

/// Resolves exchanged tokens into the authenticated user's identity.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    http: reqwest::Client,
    base_url: String,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityResolver {
    /// Creates a resolver against the production People API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(PEOPLE_API_BASE)
    }

    /// Creates a resolver against an alternate endpoint (tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the authenticated principal's display name and email.
    pub async fn resolve(
        &self,
        credentials: &AccessCredentials,
    ) -> Result<Profile, GoogleApiError> {
        let url = format!("{}/v1/people/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("personFields", PERSON_FIELDS)])
            .bearer_auth(credentials.bearer())
            .send()
            .await
            .map_err(|e| GoogleApiError::request(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GoogleApiError::request(&e))?;
        profile_from_response(&body)
    }
}

/// Maps a `people/me` response body to a [`Profile`].
///
/// Takes the first entry of `names` and `emailAddresses`, matching the
/// provider's primary-first ordering.
pub fn profile_from_response(body: &Value) -> Result<Profile, GoogleApiError> {
    let display_name = body
        .pointer("/names/0/displayName")
        .and_then(Value::as_str)
        .ok_or_else(|| GoogleApiError::MalformedResponse {
            reason: "no display name in people response".to_string(),
        })?;

    let email = body
        .pointer("/emailAddresses/0/value")
        .and_then(Value::as_str)
        .ok_or_else(|| GoogleApiError::MalformedResponse {
            reason: "no email address in people response".to_string(),
        })?;

    Ok(Profile {
        display_name: display_name.to_string(),
        email: email.to_string(),
    })
}
