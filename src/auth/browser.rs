//! Best-effort browser launching for `frontdesk login --oauth`.

use std::process::Command;

/// Open `url` in the operator's browser. `$BROWSER` wins over the platform
/// launcher. Returns false when nothing could be started.
pub fn try_open_browser(url: &str) -> bool {
    if let Some(browser) = std::env::var_os("BROWSER").filter(|value| !value.is_empty()) {
        return launched(Command::new(browser).arg(url));
    }
    #[cfg(target_os = "macos")]
    {
        return launched(Command::new("open").arg(url));
    }
    #[cfg(target_os = "windows")]
    {
        return launched(Command::new("cmd").args(["/C", "start", "", url]));
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        return launched(Command::new("xdg-open").arg(url));
    }
    #[allow(unreachable_code)]
    false
}

fn launched(command: &mut Command) -> bool {
    command.status().is_ok_and(|status| status.success())
}
