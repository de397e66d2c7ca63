//! Machine-derived encryption-at-rest for the token file.
//!
//! Layout: a random data key (DEK) encrypts each token; the DEK itself is
//! wrapped by a key-encryption key derived with scrypt from machine identity
//! plus a per-write salt. Copying the file to another machine or user
//! account makes it undecryptable.

use aes_gcm_siv::aead::{Aead, KeyInit};
use aes_gcm_siv::{Aes256GcmSiv, Nonce};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use rand::RngCore;
use scrypt::{scrypt, Params as ScryptParams};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::error::AuthError;

pub(crate) const TOKEN_FILE_VERSION_ENCRYPTED: u32 = 2;
/// scrypt cost used for production writes (`ScryptParams::recommended()`).
pub(crate) const DEFAULT_KDF_LOG_N: u8 = 17;
/// Refuse files that would make decryption allocate unreasonable memory.
const MAX_KDF_LOG_N: u8 = 20;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const MACHINE_KEY_CONTEXT: &str = "frontdesk-token-machine-kek-v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct EncryptedTokenFile {
    #[serde(default)]
    pub(crate) version: u32,
    #[serde(default)]
    pub(crate) encryption: Envelope,
    #[serde(default)]
    pub(crate) tokens: BTreeMap<String, EncryptedValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub(crate) salt: String,
    #[serde(default)]
    pub(crate) kdf_log_n: Option<u8>,
    #[serde(default)]
    pub(crate) wrapped_dek_nonce: String,
    #[serde(default)]
    pub(crate) wrapped_dek_ciphertext: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct EncryptedValue {
    #[serde(default)]
    pub(crate) nonce: String,
    #[serde(default)]
    pub(crate) ciphertext: String,
}

pub(crate) fn looks_encrypted(value: &serde_json::Value) -> bool {
    value
        .get("encryption")
        .and_then(|inner| inner.as_object())
        .is_some()
}

pub(crate) fn encrypt_tokens(
    tokens: &BTreeMap<String, String>,
    kdf_log_n: u8,
) -> Result<EncryptedTokenFile, AuthError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let kek = derive_machine_kek(&salt, kdf_log_n)?;

    let mut dek = [0u8; KEY_LEN];
    rand::thread_rng().fill_bytes(&mut dek);
    let (wrapped_dek_nonce, wrapped_dek_ciphertext) = encrypt_blob(&kek, &dek)?;

    let mut encrypted = BTreeMap::new();
    for (key, value) in tokens {
        let (nonce, ciphertext) = encrypt_blob(&dek, value.as_bytes())?;
        encrypted.insert(
            key.clone(),
            EncryptedValue {
                nonce: B64.encode(nonce),
                ciphertext: B64.encode(ciphertext),
            },
        );
    }

    Ok(EncryptedTokenFile {
        version: TOKEN_FILE_VERSION_ENCRYPTED,
        encryption: Envelope {
            salt: B64.encode(salt),
            kdf_log_n: Some(kdf_log_n),
            wrapped_dek_nonce: B64.encode(wrapped_dek_nonce),
            wrapped_dek_ciphertext: B64.encode(wrapped_dek_ciphertext),
        },
        tokens: encrypted,
    })
}

pub(crate) fn decrypt_tokens(
    file: &EncryptedTokenFile,
) -> Result<BTreeMap<String, String>, AuthError> {
    let salt = decode_fixed::<SALT_LEN>(&file.encryption.salt, "salt")?;
    let kdf_log_n = file.encryption.kdf_log_n.unwrap_or(DEFAULT_KDF_LOG_N);
    let kek = derive_machine_kek(&salt, kdf_log_n)?;
    let wrapped_nonce =
        decode_fixed::<NONCE_LEN>(&file.encryption.wrapped_dek_nonce, "wrapped_dek_nonce")?;
    let wrapped_dek = decode_bytes(
        &file.encryption.wrapped_dek_ciphertext,
        "wrapped_dek_ciphertext",
    )?;
    let dek_raw = decrypt_blob(&kek, &wrapped_nonce, &wrapped_dek).map_err(|_| {
        AuthError::Invalid(
            "failed to decrypt stored session (machine identity may have changed). Run `frontdesk logout` and login again."
                .to_string(),
        )
    })?;
    if dek_raw.len() != KEY_LEN {
        return Err(AuthError::Invalid(
            "invalid encrypted key material in token file".to_string(),
        ));
    }
    let mut dek = [0u8; KEY_LEN];
    dek.copy_from_slice(&dek_raw);

    let mut tokens = BTreeMap::new();
    for (key, record) in &file.tokens {
        let nonce = decode_fixed::<NONCE_LEN>(&record.nonce, "nonce")?;
        let ciphertext = decode_bytes(&record.ciphertext, "ciphertext")?;
        let plaintext = decrypt_blob(&dek, &nonce, &ciphertext).map_err(|_| {
            AuthError::Invalid(format!(
                "failed to decrypt stored `{key}`. Run `frontdesk logout` and login again."
            ))
        })?;
        let value = String::from_utf8(plaintext).map_err(|_| {
            AuthError::Invalid(format!("decrypted `{key}` is not valid UTF-8"))
        })?;
        tokens.insert(key.clone(), value);
    }
    Ok(tokens)
}

fn derive_machine_kek(salt: &[u8; SALT_LEN], log_n: u8) -> Result<[u8; KEY_LEN], AuthError> {
    if log_n > MAX_KDF_LOG_N {
        return Err(AuthError::Invalid(format!(
            "token file requests scrypt cost 2^{log_n}, above the supported 2^{MAX_KDF_LOG_N}"
        )));
    }
    let mut hashed = Sha256::new();
    hashed.update(MACHINE_KEY_CONTEXT.as_bytes());
    hashed.update(machine_secret_material());
    hashed.update(salt);
    let seed = hashed.finalize();

    let params = ScryptParams::new(log_n, 8, 1, KEY_LEN)
        .map_err(|err| AuthError::Invalid(format!("invalid scrypt parameters: {err}")))?;
    let mut key = [0u8; KEY_LEN];
    scrypt(&seed, salt, &params, &mut key)
        .map_err(|err| AuthError::Invalid(format!("failed to derive machine key: {err}")))?;
    Ok(key)
}

fn machine_secret_material() -> Vec<u8> {
    let hostname = hostname::get()
        .map(|value| value.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown-host".to_string());
    let username = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown-user".to_string());
    let home = dirs::home_dir()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let machine_id = ["/etc/machine-id", "/var/lib/dbus/machine-id"]
        .iter()
        .find_map(|path| {
            let text = std::fs::read_to_string(path).ok()?;
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_default();
    format!(
        "os={}|host={hostname}|user={username}|home={home}|machine_id={machine_id}",
        std::env::consts::OS
    )
    .into_bytes()
}

fn encrypt_blob(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), AuthError> {
    let cipher = Aes256GcmSiv::new_from_slice(key)
        .map_err(|_| AuthError::Invalid("invalid encryption key length".to_string()))?;
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| AuthError::Invalid("failed to encrypt token data".to_string()))?;
    Ok((nonce.to_vec(), ciphertext))
}

fn decrypt_blob(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, AuthError> {
    let cipher = Aes256GcmSiv::new_from_slice(key)
        .map_err(|_| AuthError::Invalid("invalid encryption key length".to_string()))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| AuthError::Invalid("failed to decrypt token data".to_string()))
}

fn decode_bytes(value: &str, field: &str) -> Result<Vec<u8>, AuthError> {
    B64.decode(value).map_err(|err| {
        AuthError::Invalid(format!("failed to decode token file field `{field}`: {err}"))
    })
}

fn decode_fixed<const N: usize>(value: &str, field: &str) -> Result<[u8; N], AuthError> {
    let bytes = decode_bytes(value, field)?;
    bytes.as_slice().try_into().map_err(|_| {
        AuthError::Invalid(format!(
            "invalid token file field `{field}` length: expected {N}, got {}",
            bytes.len()
        ))
    })
}
