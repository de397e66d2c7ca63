//! Configuration data model.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::DEFAULT_EXPIRY_SKEW_SECS;
use crate::error::ConfigError;

use super::defaults::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_OAUTH_CALLBACK_TIMEOUT_SECS,
    DEFAULT_OAUTH_CLIENT_ID, DEFAULT_OAUTH_ISSUER_URL, DEFAULT_OAUTH_REDIRECT_URI,
    DEFAULT_OAUTH_SCOPE,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub oauth: OAuthConfig,
}

/// Backend connection settings under `[api]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Identity-provider sign-in settings under `[oauth]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Realm URL; `/protocol/openid-connect/{auth,token}` hang off it.
    pub issuer_url: String,
    pub client_id: String,
    /// Must match a redirect registered for the client; the CLI listens on it.
    pub redirect_uri: String,
    pub scope: String,
    /// How long to wait for the browser to come back.
    pub callback_timeout_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: DEFAULT_OAUTH_ISSUER_URL.to_string(),
            client_id: DEFAULT_OAUTH_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_OAUTH_REDIRECT_URI.to_string(),
            scope: DEFAULT_OAUTH_SCOPE.to_string(),
            callback_timeout_secs: DEFAULT_OAUTH_CALLBACK_TIMEOUT_SECS,
        }
    }
}

impl OAuthConfig {
    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs.max(1))
    }
}

/// Where session tokens are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenStoreKind {
    /// Encrypted JSON file under the user config dir.
    #[default]
    File,
    /// Process memory only; every run starts signed out.
    Memory,
}

impl FromStr for TokenStoreKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown token_store `{other}`: expected \"file\" or \"memory\""
            ))),
        }
    }
}

/// Session settings under `[auth]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub expiry_skew_secs: i64,
    pub token_store: TokenStoreKind,
    /// Explicit token file; the default lives next to the global config.
    pub token_store_path: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            expiry_skew_secs: DEFAULT_EXPIRY_SKEW_SECS,
            token_store: TokenStoreKind::File,
            token_store_path: None,
        }
    }
}

/// Result of `frontdesk init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}

/// On-disk TOML shape before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) api: ApiConfig,
    pub(super) auth: FileAuthConfig,
    pub(super) oauth: OAuthConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileAuthConfig {
    pub(super) expiry_skew_secs: Option<i64>,
    pub(super) token_store: Option<String>,
    pub(super) token_store_path: Option<String>,
}

impl FileConfig {
    /// Validate file values into a runtime [`Config`].
    pub(super) fn into_config(self) -> Result<Config, ConfigError> {
        let base_url = self.api.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be at least 1".into(),
            ));
        }

        let mut auth = AuthConfig::default();
        if let Some(skew) = self.auth.expiry_skew_secs {
            if skew < 0 {
                return Err(ConfigError::Invalid(format!(
                    "auth.expiry_skew_secs must not be negative (got {skew})"
                )));
            }
            auth.expiry_skew_secs = skew;
        }
        if let Some(kind) = self.auth.token_store.as_deref() {
            auth.token_store = kind.parse()?;
        }
        auth.token_store_path = self
            .auth
            .token_store_path
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let mut oauth = self.oauth;
        oauth.issuer_url = oauth.issuer_url.trim().trim_end_matches('/').to_string();
        for (field, value) in [
            ("oauth.issuer_url", &oauth.issuer_url),
            ("oauth.client_id", &oauth.client_id),
            ("oauth.redirect_uri", &oauth.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }

        Ok(Config {
            api: ApiConfig {
                base_url,
                timeout_secs: self.api.timeout_secs,
            },
            auth,
            oauth,
        })
    }
}
