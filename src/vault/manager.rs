//! Credential Vault - 마스터키 관리 및 단일 슬롯 PAT 보관
//!
//! - 마스터키는 Keychain에서 로드 (`wb:master_key_v1`), 없으면 저장 시 생성
//! - PAT는 캐시하지 않고 retrieve()마다 vault 파일을 복호화
//! - 부재와 복호화 실패는 둘 다 "absent"로 수렴 (호출자는 구분할 수 없음)

use crate::vault::file::{
    credential_vault_path, encrypt_and_write, read_and_decrypt, CredentialPayload, VaultError,
    MASTER_KEY_LEN,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use keyring::Entry;
use once_cell::sync::{Lazy, OnceCell};
use rand::Rng;
use std::io::ErrorKind;
use std::path::PathBuf;
use zeroize::Zeroize;

/// Keychain 서비스 이름
const KEYCHAIN_SERVICE: &str = "com.workboard.app";
/// 마스터키 Keychain 키
const MASTER_KEY_KEYCHAIN_KEY: &str = "wb:master_key_v1";

/// 전역 CredentialVault 인스턴스
pub static VAULT: Lazy<CredentialVault> = Lazy::new(CredentialVault::new);

/// Credential Vault 오류 (store/clear에서만 표면화, retrieve는 absent로 수렴)
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Keychain entry not found")]
    KeychainNoEntry,

    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("App data dir not set")]
    AppDataDirNotSet,

    #[error("Invalid master key format")]
    InvalidMasterKey,
}

/// Zeroize가 적용된 마스터키 래퍼
struct MasterKey {
    bytes: [u8; MASTER_KEY_LEN],
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// 단일 슬롯 PAT 저장소
///
/// store()/retrieve()/clear()만 제공하며 히스토리는 없다.
/// 진행 중인 요청은 retrieve() 시점에 캡처한 값을 그대로 쓰므로,
/// 도중의 clear()는 이후 호출에만 영향을 준다.
pub struct CredentialVault {
    /// vault 파일이 놓일 app_data_dir (setup에서 1회 설정)
    app_data_dir: OnceCell<PathBuf>,
}

impl CredentialVault {
    pub fn new() -> Self {
        Self {
            app_data_dir: OnceCell::new(),
        }
    }

    /// app_data_dir 설정 (lib.rs의 setup에서 호출)
    pub fn set_app_data_dir(&self, path: PathBuf) {
        let _ = self.app_data_dir.set(path);
    }

    fn vault_path(&self) -> Result<PathBuf, CredentialStoreError> {
        let dir = self
            .app_data_dir
            .get()
            .ok_or(CredentialStoreError::AppDataDirNotSet)?;
        Ok(credential_vault_path(dir))
    }

    /// PAT 저장. 암호화 쓰기 실패는 StorageError로 표면화된다.
    pub async fn store(&self, pat: &str) -> Result<(), CredentialStoreError> {
        let path = self.vault_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VaultError::Io)?;
        }

        let master_key = self.ensure_master_key()?;
        encrypt_and_write(&path, &master_key.bytes, &CredentialPayload::new(pat.to_string()))?;

        println!("[Vault] Credential stored");
        Ok(())
    }

    /// PAT 조회. 파일 부재, Keychain 실패, 복호화 실패 모두 None으로 수렴한다.
    pub async fn retrieve(&self) -> Option<String> {
        let path = match self.vault_path() {
            Ok(path) => path,
            Err(_) => {
                eprintln!("[Vault] app_data_dir not set, treating credential as absent");
                return None;
            }
        };

        if !path.exists() {
            return None;
        }

        let master_key = match self.load_master_key() {
            Ok(key) => key,
            Err(e) => {
                eprintln!("[Vault] Master key unavailable, treating credential as absent: {}", e);
                return None;
            }
        };

        match read_and_decrypt(&path, &master_key.bytes) {
            Ok(payload) => Some(payload.pat),
            Err(e) => {
                eprintln!("[Vault] Failed to decrypt credential, treating as absent: {}", e);
                None
            }
        }
    }

    /// PAT 삭제. 파일이 없어도 성공 (멱등). 마스터키는 Keychain에 남긴다.
    pub async fn clear(&self) -> Result<(), CredentialStoreError> {
        let path = self.vault_path()?;

        match std::fs::remove_file(&path) {
            Ok(()) => {
                println!("[Vault] Credential cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Io(e).into()),
        }
    }

    /// 마스터키 로드, 없으면 생성 후 Keychain에 저장
    fn ensure_master_key(&self) -> Result<MasterKey, CredentialStoreError> {
        match self.load_master_key() {
            Ok(key) => Ok(key),
            Err(CredentialStoreError::KeychainNoEntry) => {
                println!("[Vault] No master key found, generating new one");
                let key = Self::generate_master_key();
                self.save_master_key(&key)?;
                Ok(key)
            }
            Err(e) => Err(e),
        }
    }

    /// 마스터키 생성 (CSPRNG)
    fn generate_master_key() -> MasterKey {
        let mut bytes = [0u8; MASTER_KEY_LEN];
        rand::thread_rng().fill(&mut bytes);
        MasterKey { bytes }
    }

    /// Keychain에서 마스터키 로드
    fn load_master_key(&self) -> Result<MasterKey, CredentialStoreError> {
        let entry = Entry::new(KEYCHAIN_SERVICE, MASTER_KEY_KEYCHAIN_KEY)
            .map_err(|e| CredentialStoreError::Keychain(e.to_string()))?;

        let encoded = match entry.get_password() {
            Ok(encoded) => encoded,
            Err(keyring::Error::NoEntry) => return Err(CredentialStoreError::KeychainNoEntry),
            Err(e) => return Err(CredentialStoreError::Keychain(e.to_string())),
        };

        let mut decoded = BASE64
            .decode(&encoded)
            .map_err(|_| CredentialStoreError::InvalidMasterKey)?;

        if decoded.len() != MASTER_KEY_LEN {
            decoded.zeroize();
            return Err(CredentialStoreError::InvalidMasterKey);
        }

        let mut bytes = [0u8; MASTER_KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();

        Ok(MasterKey { bytes })
    }

    /// Keychain에 마스터키 저장
    fn save_master_key(&self, key: &MasterKey) -> Result<(), CredentialStoreError> {
        let entry = Entry::new(KEYCHAIN_SERVICE, MASTER_KEY_KEYCHAIN_KEY)
            .map_err(|e| CredentialStoreError::Keychain(e.to_string()))?;

        let encoded = BASE64.encode(key.bytes);
        entry
            .set_password(&encoded)
            .map_err(|e| CredentialStoreError::Keychain(e.to_string()))?;

        Ok(())
    }
}

impl Default for CredentialVault {
    fn default() -> Self {
        Self::new()
    }
}
