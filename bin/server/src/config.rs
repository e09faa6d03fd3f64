//! Centralized server configuration.
//!
//! Runtime settings come from environment variables via the `config` crate;
//! the OAuth application identity comes from a Google credentials JSON file.
//! Both are loaded and validated once at startup, before the server accepts
//! traffic.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Minimum session secret length, enough to derive a cookie signing key.
const MIN_SECRET_LEN: usize = 32;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Path to the Google credentials JSON file.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// Development mode: error responses include the underlying cause.
    #[serde(default)]
    pub dev_mode: bool,

    /// Session configuration.
    pub session: SessionConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session cookies. Must come from the environment;
    /// at least 32 bytes.
    pub secret: String,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_credentials_file() -> String {
    "credentials.json".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl ServerConfig {
    /// Loads configuration from environment variables
    /// (e.g. `SESSION__SECRET`, `LISTEN_ADDR`, `DEV_MODE`).
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let cfg: Self = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.session.secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if self.listen_addr.is_empty() {
            return Err(config::ConfigError::Message(
                "listen_addr must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The OAuth application identity from the Google credentials file.
///
/// Immutable process-wide state: configured once at startup and shared
/// read-only across all requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// First entry of the file's `redirect_uris` list.
    pub redirect_uri: String,
}

/// On-disk shape of the Google credentials file.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    web: WebCredentials,
}

#[derive(Debug, Deserialize)]
struct WebCredentials {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl GoogleCredentials {
    /// Loads and validates the credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// required field is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| CredentialsError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file: CredentialsFile =
            serde_json::from_str(&raw).map_err(|e| CredentialsError::Parse {
                reason: e.to_string(),
            })?;
        Self::from_web(file.web)
    }

    fn from_web(web: WebCredentials) -> Result<Self, CredentialsError> {
        if web.client_id.is_empty() {
            return Err(CredentialsError::Invalid {
                reason: "client_id is empty".to_string(),
            });
        }
        if web.client_secret.is_empty() {
            return Err(CredentialsError::Invalid {
                reason: "client_secret is empty".to_string(),
            });
        }
        let redirect_uri = web
            .redirect_uris
            .into_iter()
            .next()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| CredentialsError::Invalid {
                reason: "redirect_uris is empty".to_string(),
            })?;

        Ok(Self {
            client_id: web.client_id,
            client_secret: web.client_secret,
            redirect_uri,
        })
    }
}

/// Errors from loading the credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// The file could not be read.
    Io { path: String, reason: String },
    /// The file is not valid JSON of the expected shape.
    Parse { reason: String },
    /// A required field is missing or empty.
    Invalid { reason: String },
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "failed to read credentials file '{path}': {reason}")
            }
            Self::Parse { reason } => {
                write!(f, "failed to parse credentials file: {reason}")
            }
            Self::Invalid { reason } => {
                write!(f, "invalid credentials file: {reason}")
            }
        }
    }
}

impl std::error::Error for CredentialsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_credentials(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write");
        file
    }

    #[test]
    fn credentials_load_uses_first_redirect_uri() {
        let file = write_credentials(
            r#"{
                "web": {
                    "client_id": "id-123.apps.googleusercontent.com",
                    "client_secret": "secret-456",
                    "redirect_uris": ["http://localhost:3000/auth", "http://other/auth"]
                }
            }"#,
        );

        let creds = GoogleCredentials::load(file.path()).expect("load");
        assert_eq!(creds.client_id, "id-123.apps.googleusercontent.com");
        assert_eq!(creds.redirect_uri, "http://localhost:3000/auth");
    }

    #[test]
    fn credentials_missing_redirect_uris_fail() {
        let file = write_credentials(
            r#"{ "web": { "client_id": "id", "client_secret": "secret", "redirect_uris": [] } }"#,
        );
        let err = GoogleCredentials::load(file.path()).expect_err("should fail");
        assert!(matches!(err, CredentialsError::Invalid { .. }));
    }

    #[test]
    fn credentials_empty_client_id_fails() {
        let file = write_credentials(
            r#"{ "web": { "client_id": "", "client_secret": "secret", "redirect_uris": ["http://localhost/auth"] } }"#,
        );
        let err = GoogleCredentials::load(file.path()).expect_err("should fail");
        assert!(matches!(err, CredentialsError::Invalid { .. }));
    }

    #[test]
    fn credentials_unreadable_file_fails() {
        let err = GoogleCredentials::load("/nonexistent/credentials.json")
            .expect_err("should fail");
        assert!(matches!(err, CredentialsError::Io { .. }));
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let cfg = ServerConfig {
            listen_addr: default_listen_addr(),
            credentials_file: default_credentials_file(),
            dev_mode: false,
            session: SessionConfig {
                secret: "too-short".to_string(),
                secure_cookies: true,
            },
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn valid_config_passes_validation() {
        let cfg = ServerConfig {
            listen_addr: default_listen_addr(),
            credentials_file: default_credentials_file(),
            dev_mode: true,
            session: SessionConfig {
                secret: "0123456789abcdef0123456789abcdef".to_string(),
                secure_cookies: false,
            },
        };
        assert!(cfg.validate().is_ok());
    }
}
