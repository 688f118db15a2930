//! WorkBoard Error Types
//!
//! 도메인 에러를 프론트엔드 직렬화 가능한 에러로 변환합니다.

use serde::Serialize;

use crate::jira::aggregator::MyWorkError;
use crate::jira::client::JiraError;
use crate::vault::CredentialStoreError;

/// Tauri 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

/// Tauri 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;

impl From<JiraError> for CommandError {
    fn from(error: JiraError) -> Self {
        let code = match &error {
            JiraError::Network(_) => "NETWORK_ERROR",
            JiraError::Auth { .. } => "AUTH_ERROR",
            JiraError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

impl From<MyWorkError> for CommandError {
    fn from(error: MyWorkError) -> Self {
        match error {
            MyWorkError::MissingCredential => CommandError {
                code: "MISSING_CREDENTIAL".to_string(),
                message: "No credential stored. Save a PAT first.".to_string(),
                details: None,
            },
            MyWorkError::Jira(e) => CommandError::from(e),
        }
    }
}

impl From<CredentialStoreError> for CommandError {
    fn from(error: CredentialStoreError) -> Self {
        CommandError {
            code: "STORAGE_ERROR".to_string(),
            message: format!("Credential store error: {}", error),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jira_errors_map_to_distinct_codes() {
        let net = CommandError::from(JiraError::Network("connection refused".to_string()));
        assert_eq!(net.code, "NETWORK_ERROR");

        let auth = CommandError::from(JiraError::Auth { status: 401 });
        assert_eq!(auth.code, "AUTH_ERROR");
        assert!(auth.message.contains("401"));

        let bad = CommandError::from(JiraError::MalformedResponse("missing issues".to_string()));
        assert_eq!(bad.code, "MALFORMED_RESPONSE");
    }

    #[test]
    fn missing_credential_maps_to_its_own_code() {
        let err = CommandError::from(MyWorkError::MissingCredential);
        assert_eq!(err.code, "MISSING_CREDENTIAL");
    }
}
