//! Authorization-code sign-in through the identity provider.
//!
//! The CLI listens on the registered redirect address, sends the operator's
//! browser to the provider's authorize page, and trades the returned `code`
//! for tokens at the provider's token endpoint.

use std::collections::HashMap;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use reqwest::Url;
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::error::AuthError;
use super::types::TokenPair;
use crate::transport::status_and_message;

const AUTHORIZE_PATH: &str = "/protocol/openid-connect/auth";
const TOKEN_PATH: &str = "/protocol/openid-connect/token";
const MAX_CALLBACK_HEAD: usize = 16 * 1024;

const SIGNED_IN_PAGE: &str =
    "<html><body><h3>Signed in to frontdesk.</h3><p>You can close this tab.</p></body></html>";
const FAILED_PAGE: &str =
    "<html><body><h3>Sign-in failed.</h3><p>Return to the terminal for details.</p></body></html>";

/// Identity-provider client registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProvider {
    pub authorize_url: String,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

#[derive(Debug, Default, Deserialize)]
struct OAuthTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl OAuthProvider {
    /// Endpoints under an OpenID Connect realm URL.
    pub fn from_issuer(issuer_url: &str, client_id: &str, redirect_uri: &str, scope: &str) -> Self {
        let issuer = issuer_url.trim().trim_end_matches('/');
        Self {
            authorize_url: format!("{issuer}{AUTHORIZE_PATH}"),
            token_url: format!("{issuer}{TOKEN_PATH}"),
            client_id: client_id.trim().to_string(),
            redirect_uri: redirect_uri.trim().to_string(),
            scope: scope.trim().to_string(),
        }
    }

    /// Browser URL that starts the code flow.
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, AuthError> {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("state", state),
        ];
        if !self.scope.is_empty() {
            params.push(("scope", self.scope.as_str()));
        }
        Url::parse_with_params(&self.authorize_url, &params)
            .map(String::from)
            .map_err(|err| AuthError::Invalid(format!("invalid authorize URL: {err}")))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        http: &reqwest::Client,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenPair, AuthError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];
        let response = http
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await?;
        if !response.status().is_success() {
            let (code, message) = status_and_message(response).await;
            return Err(AuthError::Status(code, message));
        }

        let payload: OAuthTokenResponse = response.json().await.map_err(|err| {
            AuthError::Invalid(format!("token exchange response was not valid JSON: {err}"))
        })?;
        let access_token = payload.access_token.unwrap_or_default().trim().to_string();
        if access_token.is_empty() {
            return Err(AuthError::Invalid(
                "token exchange response did not include access_token".to_string(),
            ));
        }
        let refresh_token = payload
            .refresh_token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Run the whole browser round trip and return the issued tokens.
    ///
    /// `open_browser` receives the authorize URL. A redirect port of 0 binds
    /// an ephemeral port and rewrites the redirect URI to match.
    pub async fn sign_in<F>(
        &self,
        http: &reqwest::Client,
        open_browser: F,
        wait: Duration,
    ) -> Result<TokenPair, AuthError>
    where
        F: FnOnce(&str),
    {
        let listener = CallbackListener::bind(&self.redirect_uri).await?;
        let redirect_uri = listener.redirect.to_string();
        let state = random_state();
        let authorize = self.authorization_url(&redirect_uri, &state)?;
        tracing::debug!(redirect_uri = %redirect_uri, "waiting for browser sign-in");
        open_browser(&authorize);

        let code = tokio::time::timeout(wait, listener.accept_code(&state))
            .await
            .map_err(|_| {
                AuthError::Invalid("timed out waiting for the browser sign-in".to_string())
            })??;
        self.exchange_code(http, &code, &redirect_uri).await
    }
}

struct CallbackListener {
    listener: TcpListener,
    redirect: Url,
}

impl CallbackListener {
    async fn bind(redirect_uri: &str) -> Result<Self, AuthError> {
        let mut redirect = Url::parse(redirect_uri)
            .map_err(|err| AuthError::Invalid(format!("invalid redirect_uri: {err}")))?;
        if redirect.scheme() != "http" {
            return Err(AuthError::Invalid(
                "redirect_uri must be a plain http address on this machine".to_string(),
            ));
        }
        let host = redirect
            .host_str()
            .map(|host| host.trim_start_matches('[').trim_end_matches(']').to_string())
            .ok_or_else(|| AuthError::Invalid("redirect_uri has no host".to_string()))?;
        let port = redirect.port_or_known_default().unwrap_or(80);
        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .map_err(AuthError::Io)?;
        if port == 0 {
            let bound = listener.local_addr().map_err(AuthError::Io)?.port();
            redirect
                .set_port(Some(bound))
                .map_err(|()| AuthError::Invalid("redirect_uri cannot carry a port".to_string()))?;
        }
        Ok(Self { listener, redirect })
    }

    /// Serve connections until one hits the redirect path.
    async fn accept_code(&self, state: &str) -> Result<String, AuthError> {
        loop {
            let (mut stream, _) = self.listener.accept().await.map_err(AuthError::Io)?;
            let Some(target) = read_request_target(&mut stream).await else {
                continue;
            };
            let Ok(url) = self.redirect.join(&target) else {
                respond(&mut stream, 400, FAILED_PAGE).await;
                continue;
            };
            if url.path() != self.redirect.path() {
                respond(&mut stream, 404, "not found").await;
                continue;
            }
            let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
            let outcome = callback_code(&params, state);
            let (status, page) = match &outcome {
                Ok(_) => (200, SIGNED_IN_PAGE),
                Err(_) => (400, FAILED_PAGE),
            };
            respond(&mut stream, status, page).await;
            return outcome;
        }
    }
}

/// Pull the authorization code out of the redirect's query parameters.
fn callback_code(params: &HashMap<String, String>, expected_state: &str) -> Result<String, AuthError> {
    if let Some(error) = params.get("error") {
        let detail = params.get("error_description").unwrap_or(error);
        return Err(AuthError::Invalid(format!("authorization was denied: {detail}")));
    }
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(AuthError::Invalid(
            "callback state did not match; sign-in aborted".to_string(),
        ));
    }
    params
        .get("code")
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AuthError::Invalid("callback did not include an authorization code".to_string()))
}

fn random_state() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Request target of the first request line; `None` for anything unreadable.
async fn read_request_target(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];
    while !buf.windows(4).any(|window| window == b"\r\n\r\n") {
        if buf.len() > MAX_CALLBACK_HEAD {
            return None;
        }
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }
    let head = String::from_utf8_lossy(&buf);
    let mut parts = head.lines().next()?.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(target)) => Some(target.to_string()),
        _ => None,
    }
}

async fn respond(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Bad Request",
    };
    let raw = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(err) = stream.write_all(raw.as_bytes()).await {
        tracing::debug!(error = %err, "failed to answer browser callback");
    }
    let _ = stream.shutdown().await;
}
