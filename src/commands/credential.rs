//! 자격증명(PAT) 관리 명령어
//!
//! - 슬롯은 1개: 저장은 덮어쓰기, 삭제는 멱등
//! - 조회 실패(복호화 실패 포함)는 None으로 수렴하므로 프론트엔드는
//!   "없음"과 "손상"을 구분할 수 없다 (의도된 계약)

use crate::error::{CommandError, CommandResult};
use crate::vault::VAULT;

/// 저장된 PAT 조회. 없거나 복호화에 실패하면 None.
#[tauri::command]
pub async fn get_credential() -> Option<String> {
    VAULT.retrieve().await
}

fn validate_pat(pat: &str) -> Result<(), CommandError> {
    if pat.trim().is_empty() {
        return Err(CommandError {
            code: "INVALID_CREDENTIAL".to_string(),
            message: "Credential must not be empty.".to_string(),
            details: None,
        });
    }
    Ok(())
}

/// PAT 저장. 빈 값은 거부하되, 저장은 입력 그대로 한다 (trim하지 않음).
#[tauri::command]
pub async fn save_credential(pat: String) -> CommandResult<()> {
    validate_pat(&pat)?;

    VAULT.store(&pat).await.map_err(CommandError::from)
}

/// PAT 삭제. 저장된 값이 없어도 성공한다.
#[tauri::command]
pub async fn clear_credential() -> CommandResult<()> {
    VAULT.clear().await.map_err(CommandError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_pat_is_rejected() {
        let err = validate_pat("   \n").unwrap_err();
        assert_eq!(err.code, "INVALID_CREDENTIAL");
        assert!(validate_pat("").is_err());
    }

    #[test]
    fn pat_with_surrounding_whitespace_is_accepted_as_is() {
        // 공백이 섞인 토큰도 유효한 입력이며 그대로 저장 대상이 된다
        assert!(validate_pat(" pat-with-spaces ").is_ok());
    }
}
