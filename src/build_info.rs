//! Compile-time build metadata for `frontdesk --version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("FRONTDESK_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("FRONTDESK_BUILD_TIMESTAMP");

/// Long version block rendered by clap for `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("FRONTDESK_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("FRONTDESK_BUILD_TIMESTAMP")
);

/// User agent sent with every HTTP request.
pub fn user_agent() -> String {
    format!("frontdesk/{VERSION}")
}
