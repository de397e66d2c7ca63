//! Binary-local application orchestration.
//!
//! `main.rs` only parses arguments and installs logging; `entry` wires
//! config, token storage and the session, then hands off to `commands`.

pub(crate) mod commands;
pub(crate) mod entry;
pub(crate) mod output;
