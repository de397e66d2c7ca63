//! Client facade over the authenticated request wrapper.

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::auth::{AuthError, RequestOptions, SessionManager};
use crate::error::ApiError;
use crate::transport::{join_url, status_and_message};

use super::query::QueryPairs;

/// Typed client for the hotel front-desk REST API.
///
/// Every call goes through [`SessionManager::authenticated_request`], so
/// tokens are refreshed and a rejected call is retried once before an
/// error reaches the caller.
#[derive(Debug, Clone)]
pub struct FrontDeskClient {
    session: SessionManager,
    base_url: String,
}

impl FrontDeskClient {
    /// Build a client against `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(session: SessionManager, base_url: &str) -> Self {
        Self {
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
    ) -> Result<T, ApiError> {
        let response = self.execute(path, query, RequestOptions::get()).await?;
        decode_json(response).await
    }

    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryPairs,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.execute(path, query, options).await?;
        decode_json(response).await
    }

    /// Send a request whose success body is ignored.
    pub(super) async fn send_empty(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<(), ApiError> {
        self.execute(path, &QueryPairs::new(), options).await?;
        Ok(())
    }

    async fn execute(
        &self,
        path: &str,
        query: &QueryPairs,
        options: RequestOptions,
    ) -> Result<Response, ApiError> {
        let url = self.url(path, query)?;
        let method = options.method.clone();
        let response = self.session.authenticated_request(&url, options).await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api call finished");

        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::RequestUnauthorized.into());
        }
        if !status.is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(ApiError::Status(code, message));
        }
        Ok(response)
    }

    fn url(&self, path: &str, query: &QueryPairs) -> Result<String, ApiError> {
        let base = join_url(&self.base_url, path);
        if query.is_empty() {
            return Ok(base);
        }
        Url::parse_with_params(&base, query.iter().map(|(k, v)| (*k, v.as_str())))
            .map(String::from)
            .map_err(|err| ApiError::InvalidRequest(format!("bad url `{base}`: {err}")))
    }
}

/// Percent-encode one path segment (e.g. a user-entered name).
pub(super) fn path_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://segment.invalid/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(value);
    }
    url.path().trim_start_matches('/').to_string()
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|err| {
        ApiError::InvalidResponse(format!("unexpected response body: {err}"))
    })
}


#[cfg(test)]
mod tests {
    use super::test_helpers::signed_in_client;
    use super::*;
    use crate::auth::{AuthEndpoints, MemoryTokenStore};
    use crate::testsupport::{test_http_client, MockResponse, MockServer};
    use std::sync::Arc;

    #[tokio::test]
    async fn query_values_are_url_encoded() {
        let server = MockServer::start(|_| MockResponse::json(200, "{}")).await;
        let client = signed_in_client(&server);
        let query: QueryPairs = vec![("search", "ada lovelace&co".to_string())];
        let _: serde_json::Value = client.get_json("/bookings", &query).await.unwrap();
        let sent = &server.requests()[0];
        assert_eq!(sent.path(), "/bookings");
        assert_eq!(sent.query(), Some("search=ada+lovelace%26co"));
    }

    #[tokio::test]
    async fn error_status_carries_backend_message() {
        let server =
            MockServer::start(|_| MockResponse::json(404, r#"{"message":"Room not found"}"#)).await;
        let client = signed_in_client(&server);
        let err = client
            .get_json::<serde_json::Value>("/rooms/9", &QueryPairs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status(404, ref msg) if msg == "Room not found"));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_invalid_response() {
        let server = MockServer::start(|_| MockResponse::json(200, "<html>")).await;
        let client = signed_in_client(&server);
        let err = client
            .get_json::<serde_json::Value>("/rooms", &QueryPairs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)), "got: {err}");
    }

    #[tokio::test]
    async fn final_unauthorized_maps_to_request_unauthorized() {
        let server = MockServer::start(|request| {
            if request.path() == "/auth/refresh" {
                MockResponse::json(401, r#"{"message":"expired"}"#)
            } else {
                MockResponse::json(401, "{}")
            }
        })
        .await;
        let client = signed_in_client(&server);
        let err = client
            .get_json::<serde_json::Value>("/rooms", &QueryPairs::new())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::Auth(AuthError::RequestUnauthorized)),
            "got: {err}"
        );
        assert_eq!(err.status_code(), Some(401));
    }

    #[tokio::test]
    async fn signed_out_client_fails_before_sending() {
        let server = MockServer::start(|_| MockResponse::json(200, "[]")).await;
        let session = SessionManager::builder(
            Arc::new(MemoryTokenStore::new()),
            AuthEndpoints::with_client(test_http_client(), &server.url()),
        )
        .http_client(test_http_client())
        .build();
        let client = FrontDeskClient::new(session, &server.url());
        let err = client
            .get_json::<serde_json::Value>("/rooms", &QueryPairs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::NoTokenAvailable)));
        assert!(server.requests().is_empty());
    }
}
