//! Public auth model types.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Keys under which the token store persists credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
}

impl TokenKey {
    pub const ALL: [TokenKey; 2] = [TokenKey::AccessToken, TokenKey::RefreshToken];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// Token pair issued by login, signup and refresh.
///
/// A refresh response may omit the refresh token, in which case the stored
/// one stays in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Wire shape shared by `/auth/login`, `/auth/signup` and `/auth/refresh`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) refresh_token: Option<String>,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) first_name: Option<String>,
    #[serde(default)]
    pub(crate) last_name: Option<String>,
    #[serde(default)]
    pub(crate) role: Option<String>,
}

impl TokenResponse {
    /// Extract the token pair, rejecting responses without an access token.
    pub(crate) fn token_pair(&self) -> Option<TokenPair> {
        let access_token = self.token.as_deref().map(str::trim).unwrap_or_default();
        if access_token.is_empty() {
            return None;
        }
        let refresh_token = self
            .refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Some(TokenPair {
            access_token: access_token.to_string(),
            refresh_token,
        })
    }
}

/// Signed-in operator profile returned alongside login/signup tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub email: String,
    pub name: String,
    pub role: Option<String>,
}

/// Successful login or signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub operator: Operator,
}

/// Registration form submitted to `/auth/signup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

impl SignupRequest {
    /// Check the form before it is sent: names and email present, email
    /// shaped like `a@b.c`, password at least six characters.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.first_name.trim().is_empty() {
            return Err(AuthError::Invalid("first name is required".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(AuthError::Invalid("last name is required".into()));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(AuthError::Invalid("please enter a valid email".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Invalid(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Result of `/auth/validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidatedUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Identity-provider profile from `/auth/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderUser {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProviderUser {
    /// Display profile: name, then username, then email.
    pub fn operator(&self) -> Operator {
        let email = self.email.clone().unwrap_or_default();
        let name = [self.name.as_deref(), self.username.as_deref(), Some(email.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(self.sub.as_str())
            .to_string();
        Operator {
            email,
            name,
            role: None,
        }
    }
}

/// Snapshot of stored credentials for `frontdesk status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHealth {
    pub has_access_token: bool,
    pub has_refresh_token: bool,
    pub access_expires_at_unix: Option<i64>,
    pub access_expired: bool,
}

/// Seconds since the Unix epoch; 0 if the clock is before it.
pub fn unix_now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
