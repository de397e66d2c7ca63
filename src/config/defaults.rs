//! Default configuration constants.

/// Embedded default `frontdesk.toml` written by `frontdesk init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/frontdesk.toml");
/// Backend API root used when nothing else is configured.
pub(super) const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Default timeout for backend requests.
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
/// Config directory and file names under the user config root.
pub(super) const CONFIG_DIR_NAME: &str = "frontdesk";
pub(super) const CONFIG_FILE_NAME: &str = "frontdesk.toml";
/// Identity provider realm and client registered for the front desk.
pub(super) const DEFAULT_OAUTH_ISSUER_URL: &str = "http://localhost:8080/realms/hotel-booking";
pub(super) const DEFAULT_OAUTH_CLIENT_ID: &str = "hotel-booking-client";
pub(super) const DEFAULT_OAUTH_REDIRECT_URI: &str = "http://localhost:5173/callback";
pub(super) const DEFAULT_OAUTH_SCOPE: &str = "openid profile email";
pub(super) const DEFAULT_OAUTH_CALLBACK_TIMEOUT_SECS: u64 = 300;
