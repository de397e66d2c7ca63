//! Persistent token store.
//!
//! The session layer only needs a small key-value surface over the two
//! token keys. [`MemoryTokenStore`] backs tests and `--ephemeral` runs;
//! [`FileTokenStore`] keeps the pair encrypted under the user config dir.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use crate::config::config_root_dir;

use super::crypto::{decrypt_tokens, encrypt_tokens, looks_encrypted, DEFAULT_KDF_LOG_N};
use super::error::AuthError;
use super::types::{TokenKey, TokenPair};

/// Key-value persistence for the access/refresh token pair.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: TokenKey) -> Result<Option<String>, AuthError>;

    fn set(&self, key: TokenKey, value: &str) -> Result<(), AuthError>;

    fn remove(&self, key: TokenKey) -> Result<(), AuthError>;

    /// Persist a freshly issued pair.
    ///
    /// The access token is always replaced; the refresh token only when the
    /// pair carries one.
    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError> {
        self.set(TokenKey::AccessToken, &pair.access_token)?;
        if let Some(refresh) = pair.refresh_token.as_deref() {
            self.set(TokenKey::RefreshToken, refresh)?;
        }
        Ok(())
    }

    /// Remove both tokens.
    fn clear(&self) -> Result<(), AuthError> {
        for key in TokenKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<BTreeMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing pair.
    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        let mut values = BTreeMap::new();
        if let Some(token) = access_token {
            values.insert(TokenKey::AccessToken, token.to_string());
        }
        if let Some(token) = refresh_token {
            values.insert(TokenKey::RefreshToken, token.to_string());
        }
        Self {
            values: Mutex::new(values),
        }
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<TokenKey, String>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>, AuthError> {
        Ok(self.values().get(&key).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        self.values().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        self.values().remove(&key);
        Ok(())
    }

    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError> {
        let mut values = self.values();
        values.insert(TokenKey::AccessToken, pair.access_token.clone());
        if let Some(refresh) = &pair.refresh_token {
            values.insert(TokenKey::RefreshToken, refresh.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.values().clear();
        Ok(())
    }
}

/// Legacy plaintext layout, migrated to the encrypted format on load.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PlaintextTokenFile {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Encrypted JSON token file (default `~/.config/frontdesk/tokens.json`).
///
/// Every mutation is a full read-modify-write under one lock, so a pair
/// update lands in a single file write. The decrypted map is cached
/// against the file's length and mtime; scrypt only runs again when the
/// file changes underneath this handle.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    kdf_log_n: u8,
    cache: Mutex<Option<CachedTokens>>,
    disk_loads: AtomicUsize,
}

#[derive(Debug)]
struct CachedTokens {
    stamp: Option<FileStamp>,
    tokens: BTreeMap<String, String>,
}

/// Cheap change detector for the token file; `None` means absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

/// Returns the default token file path when a config root is available.
pub fn default_token_store_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("frontdesk").join("tokens.json"))
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kdf_log_n: DEFAULT_KDF_LOG_N,
            cache: Mutex::new(None),
            disk_loads: AtomicUsize::new(0),
        }
    }

    /// Lower the scrypt cost for new writes. Tests only; reads honor the
    /// cost recorded in the file.
    #[cfg(test)]
    pub(crate) fn with_kdf_log_n(mut self, log_n: u8) -> Self {
        self.kdf_log_n = log_n;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of times the file was read and decrypted.
    #[cfg(test)]
    pub(crate) fn disk_loads(&self) -> usize {
        self.disk_loads.load(Ordering::Relaxed)
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedTokens>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current token map, from the cache while the file is unchanged.
    fn current(
        &self,
        cache: &mut Option<CachedTokens>,
    ) -> Result<BTreeMap<String, String>, AuthError> {
        let stamp = file_stamp(&self.path)?;
        if let Some(cached) = cache.as_ref().filter(|cached| cached.stamp == stamp) {
            return Ok(cached.tokens.clone());
        }
        self.disk_loads.fetch_add(1, Ordering::Relaxed);
        let tokens = load_tokens(&self.path, self.kdf_log_n)?;
        // Loading may have rewritten a plaintext file.
        *cache = Some(CachedTokens {
            stamp: file_stamp(&self.path)?,
            tokens: tokens.clone(),
        });
        Ok(tokens)
    }

    fn update<F>(&self, mutate: F) -> Result<(), AuthError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut cache = self.lock_cache();
        let mut tokens = self.current(&mut cache)?;
        let before = tokens.clone();
        mutate(&mut tokens);
        if tokens == before {
            return Ok(());
        }
        if let Err(err) = write_tokens(&self.path, &tokens, self.kdf_log_n) {
            *cache = None;
            return Err(err);
        }
        *cache = Some(CachedTokens {
            stamp: file_stamp(&self.path)?,
            tokens,
        });
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>, AuthError> {
        let mut cache = self.lock_cache();
        let tokens = self.current(&mut cache)?;
        Ok(tokens.get(key.as_str()).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), AuthError> {
        self.update(|tokens| {
            tokens.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: TokenKey) -> Result<(), AuthError> {
        self.update(|tokens| {
            tokens.remove(key.as_str());
        })
    }

    fn store_pair(&self, pair: &TokenPair) -> Result<(), AuthError> {
        self.update(|tokens| {
            tokens.insert(
                TokenKey::AccessToken.as_str().to_string(),
                pair.access_token.clone(),
            );
            if let Some(refresh) = &pair.refresh_token {
                tokens.insert(TokenKey::RefreshToken.as_str().to_string(), refresh.clone());
            }
        })
    }

    /// Delete the file outright. It is never decrypted first, so a file
    /// sealed for another machine identity can still be discarded.
    fn clear(&self) -> Result<(), AuthError> {
        let mut cache = self.lock_cache();
        *cache = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(AuthError::Io(err)),
        }
        *cache = Some(CachedTokens {
            stamp: None,
            tokens: BTreeMap::new(),
        });
        Ok(())
    }
}

fn file_stamp(path: &Path) -> Result<Option<FileStamp>, AuthError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(FileStamp {
            len: meta.len(),
            modified: meta.modified().ok(),
        })),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AuthError::Io(err)),
    }
}

/// Load and decode the token file, migrating plaintext files in place.
fn load_tokens(path: &Path, kdf_log_n: u8) -> Result<BTreeMap<String, String>, AuthError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(AuthError::Io(err)),
    };
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|err| {
        AuthError::Invalid(format!(
            "failed to parse token file `{}`: {err}",
            path.display()
        ))
    })?;

    if looks_encrypted(&value) {
        let encrypted = serde_json::from_value(value).map_err(|err| {
            AuthError::Invalid(format!(
                "failed to parse encrypted token file `{}`: {err}",
                path.display()
            ))
        })?;
        return decrypt_tokens(&encrypted);
    }

    let plaintext: PlaintextTokenFile = serde_json::from_value(value).map_err(|err| {
        AuthError::Invalid(format!(
            "failed to parse token file `{}`: {err}",
            path.display()
        ))
    })?;
    let mut tokens = BTreeMap::new();
    if let Some(token) = plaintext.access_token {
        tokens.insert(TokenKey::AccessToken.as_str().to_string(), token);
    }
    if let Some(token) = plaintext.refresh_token {
        tokens.insert(TokenKey::RefreshToken.as_str().to_string(), token);
    }
    if !tokens.is_empty() {
        // Best-effort migration; a failed rewrite still returns the tokens.
        if let Err(err) = write_tokens(path, &tokens, kdf_log_n) {
            tracing::warn!(path = %path.display(), error = %err, "failed to encrypt plaintext token file");
        }
    }
    Ok(tokens)
}

/// Encrypt and persist the token map with owner-only permissions.
fn write_tokens(
    path: &Path,
    tokens: &BTreeMap<String, String>,
    kdf_log_n: u8,
) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700));
        }
    }

    let encrypted = encrypt_tokens(tokens, kdf_log_n)?;
    let text = serde_json::to_string_pretty(&encrypted).map_err(|err| {
        AuthError::Invalid(format!("failed to serialize encrypted token file: {err}"))
    })?;
    let mut options = std::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}
