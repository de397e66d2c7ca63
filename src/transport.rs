//! Shared HTTP plumbing for auth and API requests.

use std::time::Duration;

use crate::build_info;

/// Build an HTTP client with timeout and user agent applied.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(build_info::user_agent())
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Join a base URL and an absolute endpoint path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Human-readable error text from a non-2xx response body.
///
/// The backend answers errors with `{"message": "..."}`; anything else is
/// passed through, and an empty body becomes `HTTP Error <code>`.
pub fn error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP Error {status}");
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| trimmed.to_string())
}

/// Read a failed response into `(status, message)`.
pub async fn status_and_message(response: reqwest::Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    (status, error_message(status, &body))
}
