//! `login`, `signup`, `logout` and `status`.

use frontdesk::auth::{
    try_open_browser, unix_now_secs, OAuthProvider, SessionManager, SignupRequest,
};
use frontdesk::config::OAuthConfig;

use super::describe;
use crate::app::output::{print_action, relative_time};
use crate::cli::SignupArgs;

pub(crate) async fn login(
    session: &SessionManager,
    email: &str,
    password: Option<String>,
) -> Result<(), String> {
    let password = match password {
        Some(password) => password,
        None => prompt_secret("Password: ")?,
    };
    // A failed sign-in must not leave a previous operator's tokens behind.
    session.clear_tokens().map_err(describe)?;
    let outcome = session
        .endpoints()
        .login(email.trim(), &password)
        .await
        .map_err(describe)?;
    session.store_tokens(&outcome.tokens).map_err(describe)?;
    print_action(&format!(
        "signed in as {} <{}>",
        outcome.operator.name, outcome.operator.email
    ));
    Ok(())
}

pub(crate) async fn login_oauth(
    session: &SessionManager,
    settings: &OAuthConfig,
) -> Result<(), String> {
    let provider = OAuthProvider::from_issuer(
        &settings.issuer_url,
        &settings.client_id,
        &settings.redirect_uri,
        &settings.scope,
    );
    let outcome = session
        .sign_in_with_provider(
            &provider,
            |url| {
                if try_open_browser(url) {
                    eprintln!("Continue signing in in your browser.");
                } else {
                    eprintln!("Open this URL in a browser to sign in:\n  {url}");
                }
            },
            settings.callback_timeout(),
        )
        .await
        .map_err(describe)?;
    let who = match (outcome.operator.name.is_empty(), outcome.operator.email.is_empty()) {
        (false, false) => format!("{} <{}>", outcome.operator.name, outcome.operator.email),
        (false, true) => outcome.operator.name,
        (true, false) => outcome.operator.email,
        (true, true) => "identity provider account".to_string(),
    };
    print_action(&format!("signed in as {who}"));
    Ok(())
}

pub(crate) async fn signup(session: &SessionManager, form: SignupArgs) -> Result<(), String> {
    let password = match form.password {
        Some(password) => password,
        None => {
            let first = prompt_secret("Password: ")?;
            let again = prompt_secret("Confirm password: ")?;
            if first != again {
                return Err("passwords do not match".to_string());
            }
            first
        }
    };
    let request = SignupRequest {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password,
        phone_number: form.phone.unwrap_or_default(),
    };
    request.validate().map_err(describe)?;

    session.clear_tokens().map_err(describe)?;
    let outcome = session.endpoints().signup(&request).await.map_err(describe)?;
    session.store_tokens(&outcome.tokens).map_err(describe)?;
    print_action(&format!("account created; signed in as {}", outcome.operator.email));
    Ok(())
}

pub(crate) fn logout(session: &SessionManager) -> Result<(), String> {
    session.clear_tokens().map_err(describe)?;
    print_action("signed out");
    Ok(())
}

pub(crate) async fn status(session: &SessionManager, offline: bool) -> Result<(), String> {
    if !session.has_session().map_err(describe)? {
        print_action("not signed in");
        return Ok(());
    }
    let health = session.health().map_err(describe)?;

    let now = unix_now_secs();
    let access = match (health.has_access_token, health.access_expires_at_unix) {
        (false, _) => "missing".to_string(),
        (true, Some(exp)) if health.access_expired => format!("expired ({})", relative_time(exp, now)),
        (true, Some(exp)) => format!("valid, expires {}", relative_time(exp, now)),
        (true, None) => "present (no expiry claim)".to_string(),
    };
    print_action(&format!("access token: {access}"));
    print_action(&format!(
        "refresh token: {}",
        if health.has_refresh_token { "present" } else { "missing" }
    ));

    if offline {
        return Ok(());
    }
    let user = session.validate_session().await.map_err(describe)?;
    match user.role.as_deref() {
        Some(role) => print_action(&format!("backend accepts session for {} ({role})", user.email)),
        None => print_action(&format!("backend accepts session for {}", user.email)),
    }
    Ok(())
}

fn prompt_secret(prompt: &str) -> Result<String, String> {
    rpassword::prompt_password(prompt).map_err(|err| format!("failed to read password: {err}"))
}
