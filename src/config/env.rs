//! `FRONTDESK_*` environment overrides.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_BASE_URL: &str = "FRONTDESK_BASE_URL";
pub(super) const ENV_API_TIMEOUT_SECS: &str = "FRONTDESK_API_TIMEOUT_SECS";
pub(super) const ENV_TOKEN_STORE: &str = "FRONTDESK_TOKEN_STORE";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup(ENV_BASE_URL)) {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_API_TIMEOUT_SECS)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_API_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        // Zero would mean no deadline at all.
        config.api.timeout_secs = parsed.max(1);
    }
    if let Some(kind) = non_empty(env_lookup(ENV_TOKEN_STORE)) {
        config.auth.token_store = kind.parse()?;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
