//! Config-path helpers and `frontdesk init`.
//!
//! Writes use create-new semantics so a concurrent init never clobbers a
//! file another process just created.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use super::GlobalConfigInitResult;

/// Return the per-user config path (`~/.config/frontdesk/frontdesk.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Write the default config template to the global path.
///
/// Without `force` an existing file is left alone. With `force` it is
/// copied to a timestamped backup first.
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("no home or XDG config directory to place frontdesk.toml in".into())
    })?;
    initialize_config_at_path(&path, force)
}

pub(super) fn initialize_config_at_path(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let owned = path.to_path_buf();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        return match write_new_template(path) {
            Ok(()) => Ok(GlobalConfigInitResult::Created { path: owned }),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Ok(GlobalConfigInitResult::AlreadyInitialized { path: owned })
            }
            Err(err) => Err(err.into()),
        };
    }
    if !force {
        return Ok(GlobalConfigInitResult::AlreadyInitialized { path: owned });
    }

    let backup_path = free_backup_path(path);
    std::fs::copy(path, &backup_path)?;
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
    tracing::info!(backup = %backup_path.display(), "replaced existing config");
    Ok(GlobalConfigInitResult::Overwritten {
        path: owned,
        backup_path,
    })
}

fn write_new_template(path: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())
}

/// `frontdesk.toml.<unix-secs>.bak`, with a counter when that name is taken.
fn free_backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(CONFIG_FILE_NAME);
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    let mut candidate = path.with_file_name(format!("{stem}.{stamp}.bak"));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{stem}.{stamp}.{counter}.bak"));
        counter += 1;
    }
    candidate
}

/// Resolve the base config directory (`$XDG_CONFIG_HOME`, else `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}
