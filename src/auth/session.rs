//! Session manager: token validation and single-flight refresh.
//!
//! One `SessionManager` is built at startup and cloned into every caller.
//! At most one refresh exchange is in flight at any time; callers that need
//! a refresh while one is running await the same shared result. The shared
//! slot is emptied only once the exchange settles, success or failure.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::endpoints::AuthEndpoints;
use super::error::AuthError;
use super::oauth::OAuthProvider;
use super::inspect::{is_token_expired_at, token_expiry, DEFAULT_EXPIRY_SKEW_SECS};
use super::store::TokenStore;
use super::types::{
    unix_now_secs, LoginOutcome, Operator, SessionHealth, TokenKey, TokenPair, ValidatedUser,
};
use crate::transport::build_http_client;

/// Callback invoked when the session is irrecoverably lost and the
/// application must send the operator back to its login entry point.
pub type ForcedLogout = Arc<dyn Fn() + Send + Sync>;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settled result of one refresh exchange, shared by every waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefreshOutcome {
    Refreshed(String),
    /// No refresh token was stored; nothing was sent.
    NoRefreshToken,
    Failed(String),
}

impl RefreshOutcome {
    fn into_token(self) -> Option<String> {
        match self {
            Self::Refreshed(token) => Some(token),
            Self::NoRefreshToken | Self::Failed(_) => None,
        }
    }

    fn into_result(self) -> Result<String, AuthError> {
        match self {
            Self::Refreshed(token) => Ok(token),
            Self::NoRefreshToken => Err(AuthError::NoTokenAvailable),
            Self::Failed(reason) => Err(AuthError::RefreshFailed(reason)),
        }
    }
}

type SharedRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Process-wide authenticated session.
///
/// Cloning is cheap and every clone shares the same store and in-flight
/// refresh slot.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn TokenStore>,
    endpoints: AuthEndpoints,
    http: reqwest::Client,
    on_forced_logout: Option<ForcedLogout>,
    expiry_skew_secs: i64,
    in_flight: Mutex<Option<SharedRefresh>>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.inner.endpoints.base_url())
            .field("expiry_skew_secs", &self.inner.expiry_skew_secs)
            .field("refresh_in_flight", &self.refresh_in_flight())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SessionManager`].
pub struct SessionManagerBuilder {
    store: Arc<dyn TokenStore>,
    endpoints: AuthEndpoints,
    http: Option<reqwest::Client>,
    on_forced_logout: Option<ForcedLogout>,
    expiry_skew_secs: i64,
}

impl SessionManagerBuilder {
    /// HTTP client used for authenticated requests.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn on_forced_logout<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_forced_logout = Some(Arc::new(callback));
        self
    }

    /// Tokens expiring within this window are refreshed before use.
    pub fn expiry_skew_secs(mut self, secs: i64) -> Self {
        self.expiry_skew_secs = secs.max(0);
        self
    }

    pub fn build(self) -> SessionManager {
        let http = self
            .http
            .unwrap_or_else(|| build_http_client(DEFAULT_REQUEST_TIMEOUT));
        SessionManager {
            inner: Arc::new(SessionInner {
                store: self.store,
                endpoints: self.endpoints,
                http,
                on_forced_logout: self.on_forced_logout,
                expiry_skew_secs: self.expiry_skew_secs,
                in_flight: Mutex::new(None),
            }),
        }
    }
}

impl SessionManager {
    pub fn builder(store: Arc<dyn TokenStore>, endpoints: AuthEndpoints) -> SessionManagerBuilder {
        SessionManagerBuilder {
            store,
            endpoints,
            http: None,
            on_forced_logout: None,
            expiry_skew_secs: DEFAULT_EXPIRY_SKEW_SECS,
        }
    }

    pub fn endpoints(&self) -> &AuthEndpoints {
        &self.inner.endpoints
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Return a usable access token, refreshing it first if it is expired
    /// or about to expire. `None` means the operator must log in again.
    pub async fn get_valid_token(&self) -> Option<String> {
        match self.valid_token().await {
            Ok(token) => Some(token),
            Err(err) => {
                tracing::debug!(error = %err, "no valid access token");
                None
            }
        }
    }

    /// Like [`get_valid_token`](Self::get_valid_token) but reports why no
    /// token is available.
    pub async fn valid_token(&self) -> Result<String, AuthError> {
        let Some(token) = self.inner.store.get(TokenKey::AccessToken)? else {
            return Err(AuthError::NoTokenAvailable);
        };
        if !is_token_expired_at(&token, unix_now_secs(), self.inner.expiry_skew_secs) {
            return Ok(token);
        }
        tracing::debug!("access token expired or expiring soon; refreshing");
        self.refresh_outcome().await.into_result()
    }

    /// Exchange the stored refresh token for a new access token, joining an
    /// exchange that is already in flight.
    pub async fn refresh(&self) -> Option<String> {
        self.refresh_outcome().await.into_token()
    }

    pub(crate) async fn refresh_outcome(&self) -> RefreshOutcome {
        let shared = {
            let mut slot = self.inner.lock_in_flight();
            match slot.clone() {
                Some(existing) => {
                    tracing::debug!("joining in-flight token refresh");
                    existing
                }
                None => {
                    // The exchange runs on its own task so a caller's
                    // deadline never cancels a refresh others are awaiting.
                    let inner = Arc::clone(&self.inner);
                    let handle = tokio::spawn(async move {
                        let _slot = InFlightSlot(&inner);
                        inner.perform_refresh().await
                    });
                    let shared = async move {
                        handle.await.unwrap_or_else(|err| {
                            RefreshOutcome::Failed(format!("refresh task aborted: {err}"))
                        })
                    }
                    .boxed()
                    .shared();
                    *slot = Some(shared.clone());
                    shared
                }
            }
        };
        shared.await
    }

    /// True while a refresh exchange is running.
    pub fn refresh_in_flight(&self) -> bool {
        self.inner.lock_in_flight().is_some()
    }

    /// Persist tokens issued by login or signup.
    pub fn store_tokens(&self, pair: &TokenPair) -> Result<(), AuthError> {
        self.inner.store.store_pair(pair)?;
        tracing::info!("session tokens stored");
        Ok(())
    }

    /// Remove both stored tokens (logout).
    pub fn clear_tokens(&self) -> Result<(), AuthError> {
        self.inner.store.clear()?;
        tracing::info!("session tokens cleared");
        Ok(())
    }

    /// Sign in through the identity provider's browser flow.
    ///
    /// Old tokens are cleared first. The profile lookup that follows is
    /// best-effort: its failure leaves the new session in place with an
    /// empty operator profile.
    pub async fn sign_in_with_provider<F>(
        &self,
        provider: &OAuthProvider,
        open_browser: F,
        wait: Duration,
    ) -> Result<LoginOutcome, AuthError>
    where
        F: FnOnce(&str),
    {
        self.clear_tokens()?;
        let tokens = provider.sign_in(&self.inner.http, open_browser, wait).await?;
        self.store_tokens(&tokens)?;
        let operator = match self.inner.endpoints.current_user(&tokens.access_token).await {
            Ok(user) => user.operator(),
            Err(err) => {
                tracing::warn!(error = %err, "signed in but the profile lookup failed");
                Operator::default()
            }
        };
        Ok(LoginOutcome { tokens, operator })
    }

    /// True when either token is stored; says nothing about validity.
    pub fn has_session(&self) -> Result<bool, AuthError> {
        let store = &self.inner.store;
        Ok(store.get(TokenKey::AccessToken)?.is_some()
            || store.get(TokenKey::RefreshToken)?.is_some())
    }

    /// Raw stored access token, without expiry checks.
    pub fn stored_access_token(&self) -> Result<Option<String>, AuthError> {
        self.inner.store.get(TokenKey::AccessToken)
    }

    /// Inspect stored credentials without refreshing them.
    pub fn health(&self) -> Result<SessionHealth, AuthError> {
        let access = self.inner.store.get(TokenKey::AccessToken)?;
        let refresh = self.inner.store.get(TokenKey::RefreshToken)?;
        Ok(SessionHealth {
            has_access_token: access.is_some(),
            has_refresh_token: refresh.is_some(),
            access_expires_at_unix: access.as_deref().and_then(token_expiry),
            access_expired: access.as_deref().is_some_and(|token| {
                is_token_expired_at(token, unix_now_secs(), self.inner.expiry_skew_secs)
            }),
        })
    }

    /// Confirm the stored session with the backend.
    ///
    /// When the backend rejects the access token, one refresh is attempted
    /// and the new token is validated instead.
    pub async fn validate_session(&self) -> Result<ValidatedUser, AuthError> {
        let token = self.valid_token().await?;
        match self.inner.endpoints.validate(&token).await {
            Ok(user) => Ok(user),
            Err(AuthError::Status(code, message)) if code == 401 || code == 403 => {
                tracing::info!(status = code, %message, "stored token rejected; refreshing");
                let fresh = self.refresh_outcome().await.into_result()?;
                self.inner.endpoints.validate(&fresh).await
            }
            Err(err) => Err(err),
        }
    }
}

impl SessionInner {
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<SharedRefresh>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn perform_refresh(&self) -> RefreshOutcome {
        let refresh_token = match self.store.get(TokenKey::RefreshToken) {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                tracing::info!("no refresh token stored; clearing session");
                self.clear_quietly();
                return RefreshOutcome::NoRefreshToken;
            }
            Err(err) => return self.fail(format!("failed to read refresh token: {err}")),
        };

        tracing::debug!("exchanging refresh token");
        match self.endpoints.refresh(&refresh_token).await {
            Ok(pair) => match self.store.store_pair(&pair) {
                Ok(()) => {
                    tracing::info!(
                        rotated_refresh_token = pair.refresh_token.is_some(),
                        "session refreshed"
                    );
                    RefreshOutcome::Refreshed(pair.access_token)
                }
                Err(err) => self.fail(format!("failed to persist refreshed tokens: {err}")),
            },
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// Unrecoverable refresh failure: drop the session and notify the app.
    fn fail(&self, reason: String) -> RefreshOutcome {
        tracing::warn!(reason = %reason, "token refresh failed; forcing logout");
        self.clear_quietly();
        if let Some(callback) = &self.on_forced_logout {
            callback();
        }
        RefreshOutcome::Failed(reason)
    }

    fn clear_quietly(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear stored tokens");
        }
    }
}

/// Empties the in-flight slot when the refresh task ends, including on
/// panic, so a later caller can start a new exchange.
struct InFlightSlot<'a>(&'a SessionInner);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.lock_in_flight().take();
    }
}
