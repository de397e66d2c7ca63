//! Configuration loading from TOML files and environment variables.
//!
//! Precedence (highest wins):
//! 1. `FRONTDESK_BASE_URL`, `FRONTDESK_API_TIMEOUT_SECS`,
//!    `FRONTDESK_TOKEN_STORE`
//! 2. TOML file given with `--config`
//! 3. `./frontdesk.toml`
//! 4. `$XDG_CONFIG_HOME/frontdesk/frontdesk.toml` (or `~/.config/...`)
//! 5. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::{load_config, load_config_with_source, LoadedConfig};
pub use sources::ConfigSource;
pub use types::{
    ApiConfig, AuthConfig, Config, GlobalConfigInitResult, OAuthConfig, TokenStoreKind,
};

#[cfg(test)]
mod tests {
    use super::defaults::DEFAULT_CONFIG_TEMPLATE;
    use super::init::initialize_config_at_path;
    use super::loader::load_config_from_sources;
    use super::*;
    use crate::error::ConfigError;
    use crate::testsupport::TestTempDir;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    fn load_with(
        path_override: Option<&str>,
        files: &[(&str, &str)],
        env: &[(&str, &str)],
    ) -> Result<LoadedConfig, ConfigError> {
        let files: BTreeMap<PathBuf, String> = files
            .iter()
            .map(|(path, text)| (PathBuf::from(path), text.to_string()))
            .collect();
        let env: BTreeMap<String, String> = env
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        load_config_from_sources(
            path_override,
            |path: &Path| {
                files.get(path).cloned().ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing fixture")
                })
            },
            |name| env.get(name).cloned(),
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let loaded = load_with(None, &[], &[]).unwrap();
        assert_eq!(loaded.source, ConfigSource::BuiltInDefaults);
        let config = loaded.config;
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.expiry_skew_secs, 300);
        assert_eq!(config.auth.token_store, TokenStoreKind::File);
        assert!(config.auth.token_store_path.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn template_parses_to_defaults() {
        let loaded = load_with(None, &[("frontdesk.toml", DEFAULT_CONFIG_TEMPLATE)], &[]).unwrap();
        assert_eq!(loaded.source, ConfigSource::Local);
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn parse_partial_toml() {
        let toml = r#"
            [api]
            base_url = "https://desk.hotel.test/api/"

            [auth]
            token_store = "memory"
            token_store_path = "/tmp/tokens.json"
        "#;
        let config = load_with(None, &[("frontdesk.toml", toml)], &[])
            .unwrap()
            .config;
        assert_eq!(config.api.base_url, "https://desk.hotel.test/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.token_store, TokenStoreKind::Memory);
        assert_eq!(
            config.auth.token_store_path.as_deref(),
            Some(Path::new("/tmp/tokens.json"))
        );
    }

    #[test]
    fn explicit_path_wins_and_must_exist() {
        let files = [
            ("custom.toml", "[api]\ntimeout_secs = 5\n"),
            ("frontdesk.toml", "[api]\ntimeout_secs = 9\n"),
        ];
        let loaded = load_with(Some("custom.toml"), &files, &[]).unwrap();
        assert_eq!(loaded.config.api.timeout_secs, 5);
        assert_eq!(loaded.source, ConfigSource::Explicit(PathBuf::from("custom.toml")));

        let err = load_with(Some("nope.toml"), &files, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn local_file_beats_global_file() {
        let files = [
            ("frontdesk.toml", "[api]\ntimeout_secs = 7\n"),
            ("/cfg/frontdesk/frontdesk.toml", "[api]\ntimeout_secs = 8\n"),
        ];
        assert_eq!(load_with(None, &files, &[]).unwrap().config.api.timeout_secs, 7);

        let global_only = [("/cfg/frontdesk/frontdesk.toml", "[api]\ntimeout_secs = 8\n")];
        let loaded = load_with(None, &global_only, &[]).unwrap();
        assert_eq!(loaded.config.api.timeout_secs, 8);
        assert_eq!(
            loaded.source,
            ConfigSource::Global(PathBuf::from("/cfg/frontdesk/frontdesk.toml"))
        );
    }

    #[test]
    fn env_overrides_file_values() {
        let files = [("frontdesk.toml", "[api]\nbase_url = \"http://file\"\n")];
        let env = [
            ("FRONTDESK_BASE_URL", "http://env/api/"),
            ("FRONTDESK_API_TIMEOUT_SECS", "0"),
            ("FRONTDESK_TOKEN_STORE", "Memory"),
        ];
        let config = load_with(None, &files, &env).unwrap().config;
        assert_eq!(config.api.base_url, "http://env/api");
        assert_eq!(config.api.timeout_secs, 1);
        assert_eq!(config.auth.token_store, TokenStoreKind::Memory);
    }

    #[test]
    fn invalid_env_timeout_is_rejected() {
        let err = load_with(None, &[], &[("FRONTDESK_API_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(
            err.to_string().contains("FRONTDESK_API_TIMEOUT_SECS"),
            "got: {err}"
        );
    }

    #[test]
    fn unknown_token_store_is_rejected() {
        let files = [("frontdesk.toml", "[auth]\ntoken_store = \"keychain\"\n")];
        let err = load_with(None, &files, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("keychain")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for toml in [
            "[api]\ntimeout_secs = 0\n",
            "[api]\nbase_url = \"  \"\n",
            "[auth]\nexpiry_skew_secs = -1\n",
            "[oauth]\nclient_id = \"\"\n",
        ] {
            let err = load_with(None, &[("frontdesk.toml", toml)], &[]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{toml}: {err}");
        }
        let err = load_with(None, &[("frontdesk.toml", "[api\n")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");
    }

    #[test]
    fn init_creates_then_keeps_then_backs_up() {
        let tmp = TestTempDir::new("config-init");
        let path = tmp.child("frontdesk/frontdesk.toml");

        let created = initialize_config_at_path(&path, false).unwrap();
        assert_eq!(created, GlobalConfigInitResult::Created { path: path.clone() });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);

        std::fs::write(&path, "[api]\ntimeout_secs = 3\n").unwrap();
        let kept = initialize_config_at_path(&path, false).unwrap();
        assert_eq!(kept, GlobalConfigInitResult::AlreadyInitialized { path: path.clone() });
        assert!(std::fs::read_to_string(&path).unwrap().contains("timeout_secs = 3"));

        let GlobalConfigInitResult::Overwritten { backup_path, .. } =
            initialize_config_at_path(&path, true).unwrap()
        else {
            panic!("expected overwrite");
        };
        assert!(std::fs::read_to_string(&backup_path)
            .unwrap()
            .contains("timeout_secs = 3"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }
}
