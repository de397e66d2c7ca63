//! Stdout rendering: records as pretty JSON, actions as one short line.

use serde::Serialize;

/// Print any record or list as indented JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to render output: {err}"))?;
    println!("{text}");
    Ok(())
}

/// Print a one-line confirmation for a completed action.
pub(crate) fn print_action(message: &str) {
    println!("{message}");
}

/// Format a unix timestamp as a coarse "in 5m" / "3h ago" hint.
pub(crate) fn relative_time(target_unix: i64, now_unix: i64) -> String {
    let delta = target_unix - now_unix;
    let magnitude = delta.unsigned_abs();
    let span = if magnitude < 60 {
        format!("{magnitude}s")
    } else if magnitude < 3600 {
        format!("{}m", magnitude / 60)
    } else if magnitude < 86_400 {
        format!("{}h", magnitude / 3600)
    } else {
        format!("{}d", magnitude / 86_400)
    };
    if delta >= 0 {
        format!("in {span}")
    } else {
        format!("{span} ago")
    }
}
