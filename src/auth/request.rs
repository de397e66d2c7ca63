//! Authenticated request wrapper with a single refresh-and-retry on 401.
//!
//! Per logical request the flow is
//! `obtain_token -> send -> [401] retry_after_refresh -> send_retry`,
//! and no step runs twice. Transport errors and timeouts are returned
//! unchanged; a 401 is the only status that triggers an automatic retry.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

use super::error::AuthError;
use super::session::SessionManager;

/// Method, headers, body and deadline for one authenticated call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Per-attempt deadline; the client default applies when unset.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    /// Attach a JSON body and `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, AuthError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|err| AuthError::Invalid(format!("failed to encode request body: {err}")))?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl SessionManager {
    /// Send `options` to `url` with a bearer token from this session.
    ///
    /// Fails with [`AuthError::NoTokenAvailable`] (or
    /// [`AuthError::RefreshFailed`]) before sending anything when no token
    /// can be obtained. A 401 triggers exactly one refresh; when that yields
    /// a token the request is re-sent once and the retry's response is
    /// returned as-is. Otherwise the original 401 response is returned.
    pub async fn authenticated_request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, AuthError> {
        tracing::debug!(url, method = %options.method, state = "obtain_token");
        let token = self.valid_token().await?;

        tracing::debug!(url, state = "send");
        let response = self.send_with_token(url, &options, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(url, state = "retry_after_refresh");
        let Some(fresh) = self.refresh().await else {
            tracing::info!(url, "refresh after 401 yielded no token; returning rejection");
            return Ok(response);
        };

        tracing::debug!(url, state = "send_retry");
        let retried = self.send_with_token(url, &options, &fresh).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(url, "request still unauthorized after refresh");
        }
        Ok(retried)
    }

    async fn send_with_token(
        &self,
        url: &str,
        options: &RequestOptions,
        token: &str,
    ) -> Result<Response, AuthError> {
        let mut headers = options.headers.clone();
        headers.remove(AUTHORIZATION);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AuthError::Invalid("access token is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut request = self
            .http()
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        Ok(request.send().await?)
    }
}
