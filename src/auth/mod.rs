//! Session tokens for the front-desk backend.
//!
//! Access and refresh tokens live in a [`TokenStore`] (encrypted on disk by
//! default under `~/.config/frontdesk/tokens.json`). [`SessionManager`]
//! hands out valid access tokens, refreshing at most once at a time, and
//! [`SessionManager::authenticated_request`] retries a rejected call once
//! after a refresh.

mod browser;
mod crypto;
mod endpoints;
mod error;
mod inspect;
mod oauth;
mod request;
mod session;
mod store;
mod types;

pub use browser::try_open_browser;
pub use endpoints::AuthEndpoints;
pub use error::AuthError;
pub use inspect::{is_token_expired, is_token_expired_at, token_expiry, DEFAULT_EXPIRY_SKEW_SECS};
pub use oauth::OAuthProvider;
pub use request::RequestOptions;
pub use session::{ForcedLogout, SessionManager, SessionManagerBuilder};
pub use store::{default_token_store_path, FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    LoginOutcome, Operator, ProviderUser, SessionHealth, SignupRequest, TokenKey, TokenPair,
    ValidatedUser,
};

pub use types::unix_now_secs;

#[cfg(test)]
pub(crate) use inspect::{token_with_claims, token_with_exp};
