//! Error types shared by the config loader and the front-desk API client.
//!
//! Session/token errors live in [`crate::auth::AuthError`]; `ApiError`
//! wraps them so API callers handle a single type.

use std::fmt;

use crate::auth::AuthError;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors from the front-desk REST client.
#[derive(Debug)]
pub enum ApiError {
    /// Session could not supply a token, or the transport failed.
    Auth(AuthError),
    /// Non-2xx status; the message is the backend's `message` field when
    /// present, else the raw body.
    Status(u16, String),
    /// 2xx response whose body did not match the expected shape.
    InvalidResponse(String),
    /// Request could not be built (bad base URL, unencodable body).
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code for status-bearing errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code, _) => Some(*code),
            Self::Auth(AuthError::Status(code, _)) => Some(*code),
            Self::Auth(AuthError::RequestUnauthorized) => Some(401),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(e) => write!(f, "auth: {e}"),
            Self::Status(code, message) => write!(f, "status {code}: {message}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Auth(AuthError::from(e))
    }
}
