//! Application entry orchestration for the frontdesk CLI.

use std::sync::Arc;

use frontdesk::api::FrontDeskClient;
use frontdesk::auth::{
    default_token_store_path, AuthEndpoints, FileTokenStore, MemoryTokenStore, SessionManager,
    TokenStore,
};
use frontdesk::config::{
    initialize_default_global_config, load_config_with_source, Config, GlobalConfigInitResult,
    TokenStoreKind,
};
use frontdesk::transport::build_http_client;

use crate::app::commands;
use crate::app::output::print_action;
use crate::cli::{Args, Command};

pub(crate) const SESSION_EXPIRED_MESSAGE: &str = "session expired; run `frontdesk login`";

/// Top-level CLI entrypoint. Returns the process exit code.
pub(crate) async fn run(args: Args) -> i32 {
    match run_inner(args).await {
        Ok(()) => 0,
        Err(message) => {
            eprintln!("error: {message}");
            1
        }
    }
}

async fn run_inner(args: Args) -> Result<(), String> {
    if let Command::Init { force } = &args.command {
        return run_init(*force);
    }

    let config = load_effective_config(&args)?;
    let session = build_session(&config)?;
    let client = FrontDeskClient::new(session.clone(), &config.api.base_url);

    match args.command {
        Command::Init { .. } => Ok(()),
        Command::Login {
            oauth: true,
            ..
        } => commands::session::login_oauth(&session, &config.oauth).await,
        Command::Login { email, password, .. } => {
            commands::session::login(&session, email.as_deref().unwrap_or_default(), password).await
        }
        Command::Signup(form) => commands::session::signup(&session, form).await,
        Command::Logout => commands::session::logout(&session),
        Command::Status { offline } => commands::session::status(&session, offline).await,
        Command::Rooms(command) => commands::rooms::run(&client, command).await,
        Command::Bookings(command) => commands::bookings::run(&client, command).await,
        Command::Dashboard => commands::dashboard::run(&client).await,
        Command::Services(command) => commands::services::run(&client, command).await,
        Command::Amenities(command) => commands::amenities::run(&client, command).await,
    }
}

fn run_init(force: bool) -> Result<(), String> {
    let result = initialize_default_global_config(force).map_err(|err| err.to_string())?;
    match result {
        GlobalConfigInitResult::Created { path } => {
            print_action(&format!("wrote {}", path.display()));
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => {
            print_action(&format!(
                "{} already exists; pass --force to overwrite",
                path.display()
            ));
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            print_action(&format!(
                "wrote {} (previous file kept at {})",
                path.display(),
                backup_path.display()
            ));
        }
    }
    Ok(())
}

/// Load config and apply CLI overrides.
fn load_effective_config(args: &Args) -> Result<Config, String> {
    let loaded = load_config_with_source(args.config.as_deref()).map_err(|err| err.to_string())?;
    tracing::debug!(source = %loaded.source, "using config");
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, args);
    Ok(config)
}

fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(url) = args.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if args.ephemeral {
        config.auth.token_store = TokenStoreKind::Memory;
    }
}

fn build_token_store(config: &Config) -> Result<Arc<dyn TokenStore>, String> {
    match config.auth.token_store {
        TokenStoreKind::Memory => Ok(Arc::new(MemoryTokenStore::new())),
        TokenStoreKind::File => {
            let path = config
                .auth
                .token_store_path
                .clone()
                .or_else(default_token_store_path)
                .ok_or_else(|| {
                    "unable to resolve a token file location; set auth.token_store_path"
                        .to_string()
                })?;
            tracing::debug!(path = %path.display(), "using file token store");
            Ok(Arc::new(FileTokenStore::new(path)))
        }
    }
}

fn build_session(config: &Config) -> Result<SessionManager, String> {
    let store = build_token_store(config)?;
    let timeout = config.api.timeout();
    let endpoints = AuthEndpoints::new(&config.api.base_url, timeout);
    Ok(SessionManager::builder(store, endpoints)
        .http_client(build_http_client(timeout))
        .expiry_skew_secs(config.auth.expiry_skew_secs)
        .on_forced_logout(|| eprintln!("{SESSION_EXPIRED_MESSAGE}"))
        .build())
}
