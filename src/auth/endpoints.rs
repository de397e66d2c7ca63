//! Client for the backend's `/auth/*` endpoints.

use std::time::Duration;

use serde_json::json;

use super::error::AuthError;
use super::types::{
    LoginOutcome, Operator, ProviderUser, SignupRequest, TokenPair, TokenResponse, ValidatedUser,
};
use crate::transport::{build_http_client, join_url, status_and_message};

const REFRESH_PATH: &str = "/auth/refresh";
const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";
const VALIDATE_PATH: &str = "/auth/validate";
const USER_PATH: &str = "/auth/user";

/// Token-issuing endpoints of the front-desk backend.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    http: reqwest::Client,
    base_url: String,
}

impl AuthEndpoints {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_client(build_http_client(timeout), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The returned pair's refresh token is `None` when the server kept the
    /// existing one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let response = self
            .http
            .post(join_url(&self.base_url, REFRESH_PATH))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        if !response.status().is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(AuthError::Status(code, message));
        }
        let payload: TokenResponse = response.json().await.map_err(|err| {
            AuthError::Invalid(format!("refresh response was not valid JSON: {err}"))
        })?;
        payload.token_pair().ok_or_else(|| {
            AuthError::Invalid("refresh response did not include a token".to_string())
        })
    }

    /// Sign in with email (or username) and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let body = json!({ "email": email, "password": password });
        self.issue_tokens(LOGIN_PATH, &body).await
    }

    /// Register a new operator account; the backend signs it in directly.
    pub async fn signup(&self, request: &SignupRequest) -> Result<LoginOutcome, AuthError> {
        request.validate()?;
        let body = serde_json::to_value(request)
            .map_err(|err| AuthError::Invalid(format!("failed to encode signup form: {err}")))?;
        self.issue_tokens(SIGNUP_PATH, &body).await
    }

    /// Ask the backend whether `token` is still accepted.
    pub async fn validate(&self, token: &str) -> Result<ValidatedUser, AuthError> {
        let response = self
            .http
            .post(join_url(&self.base_url, VALIDATE_PATH))
            .json(&json!({ "token": token }))
            .send()
            .await?;
        if !response.status().is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(AuthError::Status(code, message));
        }
        response.json().await.map_err(|err| {
            AuthError::Invalid(format!("validate response was not valid JSON: {err}"))
        })
    }

    /// Profile behind an identity-provider access token.
    pub async fn current_user(&self, access_token: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .http
            .get(join_url(&self.base_url, USER_PATH))
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(AuthError::Status(code, message));
        }
        response.json().await.map_err(|err| {
            AuthError::Invalid(format!("user profile response was not valid JSON: {err}"))
        })
    }

    async fn issue_tokens(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<LoginOutcome, AuthError> {
        let response = self
            .http
            .post(join_url(&self.base_url, path))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(AuthError::Status(code, message));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(AuthError::Invalid("empty response from server".to_string()));
        }
        let payload: TokenResponse = serde_json::from_str(&text).map_err(|err| {
            AuthError::Invalid(format!("invalid JSON response from server: {err}"))
        })?;
        let tokens = payload
            .token_pair()
            .ok_or_else(|| AuthError::Invalid("no token received from server".to_string()))?;

        let email = payload.email.clone().unwrap_or_default();
        let name = match (payload.first_name.as_deref(), payload.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => email.clone(),
        };
        Ok(LoginOutcome {
            tokens,
            operator: Operator {
                email,
                name,
                role: payload.role,
            },
        })
    }
}
