//! Access-token expiry inspection.
//!
//! Tokens are JWTs, but only the payload's `exp` claim is read here. The
//! signature is never checked; the server remains the authority and a 401
//! still triggers the refresh-and-retry path.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;

use super::types::unix_now_secs;

/// Tokens expiring within this many seconds are treated as already expired.
pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 300;

/// True when `token` is expired or expires within the default skew window.
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, unix_now_secs(), DEFAULT_EXPIRY_SKEW_SECS)
}

/// Pure expiry check against an explicit clock and skew.
///
/// Malformed tokens report expired so callers refresh instead of sending
/// a credential the server will reject.
pub fn is_token_expired_at(token: &str, now_unix: i64, skew_secs: i64) -> bool {
    match token_expiry(token) {
        Some(exp) => exp < now_unix.saturating_add(skew_secs),
        None => true,
    }
}

/// Decode the `exp` claim (seconds since epoch) from a JWT payload.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    // Some issuers emit fractional seconds.
    exp.as_i64().or_else(|| exp.as_f64().map(|value| value.floor() as i64))
}

#[cfg(test)]
pub(crate) fn token_with_exp(exp: i64) -> String {
    token_with_claims(&serde_json::json!({ "sub": "frontdesk@example.com", "exp": exp }))
}

#[cfg(test)]
pub(crate) fn token_with_claims(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}
