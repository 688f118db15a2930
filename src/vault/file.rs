//! Vault 파일 I/O 및 암호화/복호화
//!
//! 파일 포맷 (v1):
//! - magic: `WBCRED01` (8 bytes)
//! - nonce: 24 bytes (XChaCha20-Poly1305)
//! - ciphertext: AEAD 결과 (= 암호문 + 태그)

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

/// 파일 매직 (8 bytes)
pub const VAULT_MAGIC: &[u8; 8] = b"WBCRED01";

/// 마스터키 길이 (256-bit)
pub const MASTER_KEY_LEN: usize = 32;

/// Nonce 길이 (XChaCha20-Poly1305용 24 bytes)
pub const NONCE_LEN: usize = 24;

/// Vault 오류
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vault magic")]
    InvalidMagic,

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Vault에 저장되는 페이로드. 슬롯은 PAT 하나뿐이다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Jira Personal Access Token
    pub pat: String,
    /// 페이로드 버전 (향후 마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl CredentialPayload {
    pub fn new(pat: String) -> Self {
        Self { pat, version: 1 }
    }
}

/// 마스터키로 페이로드를 암호화하고 vault 파일에 저장
pub fn encrypt_and_write(
    path: &Path,
    master_key: &[u8; MASTER_KEY_LEN],
    payload: &CredentialPayload,
) -> Result<(), VaultError> {
    let mut plaintext = serde_json::to_vec(payload)?;

    // 랜덤 nonce 생성
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill(&mut nonce);

    let cipher = XChaCha20Poly1305::new(master_key.into());
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext.as_ref())
        .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

    plaintext.zeroize();

    // Atomic write: 임시 파일에 쓰고 rename
    let tmp_path = path.with_extension("vault.tmp");

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(VAULT_MAGIC)?;
    file.write_all(&nonce)?;
    file.write_all(&ciphertext)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Vault 파일을 읽고 마스터키로 복호화
pub fn read_and_decrypt(
    path: &Path,
    master_key: &[u8; MASTER_KEY_LEN],
) -> Result<CredentialPayload, VaultError> {
    let mut file = fs::File::open(path)?;

    // Magic 검증
    let mut magic = [0u8; 8];
    file.read_exact(&mut magic)?;
    if &magic != VAULT_MAGIC {
        return Err(VaultError::InvalidMagic);
    }

    let mut nonce = [0u8; NONCE_LEN];
    file.read_exact(&mut nonce)?;

    // 나머지 = ciphertext
    let mut ciphertext = Vec::new();
    file.read_to_end(&mut ciphertext)?;

    let cipher = XChaCha20Poly1305::new(master_key.into());
    let mut plaintext = cipher
        .decrypt(XNonce::from_slice(&nonce), ciphertext.as_ref())
        .map_err(|e| VaultError::DecryptionFailed(e.to_string()))?;

    let payload: CredentialPayload = serde_json::from_slice(&plaintext)?;

    // 평문 메모리 지우기
    plaintext.zeroize();

    Ok(payload)
}

/// app_data_dir 기반 vault 경로 생성
pub fn credential_vault_path(app_data_dir: &Path) -> PathBuf {
    app_data_dir.join("credential.vault")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn random_key() -> [u8; MASTER_KEY_LEN] {
        let mut key = [0u8; MASTER_KEY_LEN];
        rand::thread_rng().fill(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let dir = tempdir().unwrap();
        let vault_path = dir.path().join("test.vault");
        let master_key = random_key();

        let payload = CredentialPayload::new("pat-abc123".to_string());
        encrypt_and_write(&vault_path, &master_key, &payload).unwrap();

        assert!(vault_path.exists());

        let decrypted = read_and_decrypt(&vault_path, &master_key).unwrap();
        assert_eq!(decrypted.pat, "pat-abc123");
        assert_eq!(decrypted.version, 1);
    }

    #[test]
    fn surrounding_whitespace_round_trips_unaltered() {
        let dir = tempdir().unwrap();
        let vault_path = dir.path().join("test.vault");
        let master_key = random_key();

        let payload = CredentialPayload::new("  pat with spaces \n".to_string());
        encrypt_and_write(&vault_path, &master_key, &payload).unwrap();

        let decrypted = read_and_decrypt(&vault_path, &master_key).unwrap();
        assert_eq!(decrypted.pat, "  pat with spaces \n");
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let dir = tempdir().unwrap();
        let vault_path = dir.path().join("test.vault");

        let key1 = random_key();
        let key2 = random_key();

        let payload = CredentialPayload::new("pat-abc123".to_string());
        encrypt_and_write(&vault_path, &key1, &payload).unwrap();

        let result = read_and_decrypt(&vault_path, &key2);
        assert!(matches!(result, Err(VaultError::DecryptionFailed(_))));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let dir = tempdir().unwrap();
        let vault_path = dir.path().join("test.vault");
        let master_key = random_key();

        fs::write(&vault_path, b"NOTAVLT0garbage-bytes-here").unwrap();

        let result = read_and_decrypt(&vault_path, &master_key);
        assert!(matches!(result, Err(VaultError::InvalidMagic)));
    }

    #[test]
    fn overwrite_replaces_previous_slot() {
        let dir = tempdir().unwrap();
        let vault_path = dir.path().join("test.vault");
        let master_key = random_key();

        encrypt_and_write(&vault_path, &master_key, &CredentialPayload::new("old".into())).unwrap();
        encrypt_and_write(&vault_path, &master_key, &CredentialPayload::new("new".into())).unwrap();

        let decrypted = read_and_decrypt(&vault_path, &master_key).unwrap();
        assert_eq!(decrypted.pat, "new");
    }
}
