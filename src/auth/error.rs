//! Auth subsystem error definitions.

use std::fmt;

/// Errors surfaced by the session/auth subsystem.
#[derive(Debug)]
pub enum AuthError {
    /// Neither a usable access token nor a refresh token is stored.
    NoTokenAvailable,
    /// The refresh exchange failed; stored tokens were cleared.
    RefreshFailed(String),
    /// The server kept rejecting the request after one refresh-and-retry.
    RequestUnauthorized,
    /// Transport-level failure.
    Http(reqwest::Error),
    /// The request deadline elapsed before a response arrived.
    Timeout,
    /// Non-2xx status from an auth endpoint, with the server's message.
    Status(u16, String),
    Invalid(String),
    Io(std::io::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTokenAvailable => {
                write!(f, "no valid session; run `frontdesk login` first")
            }
            Self::RefreshFailed(reason) => {
                write!(f, "session refresh failed ({reason}); run `frontdesk login` again")
            }
            Self::RequestUnauthorized => write!(f, "request rejected as unauthorized"),
            Self::Http(err) => write!(f, "http: {err}"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Status(code, message) => write!(f, "status {code}: {message}"),
            Self::Invalid(msg) => write!(f, "{msg}"),
            Self::Io(err) => write!(f, "io: {err}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_token_message_points_at_login() {
        let text = AuthError::NoTokenAvailable.to_string();
        assert!(text.contains("frontdesk login"), "got: {text}");
    }

    #[test]
    fn status_display_includes_code_and_message() {
        let err = AuthError::Status(400, "Invalid username/email or password".into());
        assert_eq!(
            err.to_string(),
            "status 400: Invalid username/email or password"
        );
    }

    #[test]
    fn io_errors_convert_and_keep_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AuthError::from(io);
        assert!(err.to_string().starts_with("io:"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
