//! Credential Vault 모듈
//!
//! Master Key + Encrypted Vault 아키텍처로 Jira PAT 1개를 보관합니다.
//!
//! - Keychain에는 마스터키 1개만 저장 (`wb:master_key_v1`)
//! - PAT는 `app_data_dir/credential.vault` 파일에 AEAD로 암호화하여 저장
//! - 메모리 캐시 없음: retrieve()는 매번 파일을 읽어 복호화 (슬롯은 1개뿐)

pub mod file;
pub mod manager;

pub use manager::{CredentialStoreError, CredentialVault, VAULT};
