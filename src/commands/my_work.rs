//! "My Work" 집계 명령어

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{CommandError, CommandResult};
use crate::jira::aggregator::{self, MyWorkParams};
use crate::jira::client::JiraClient;
use crate::models::KanbanModel;
use crate::vault::VAULT;

/// 전역 Jira 클라이언트 (커넥션 풀 재사용)
static JIRA_CLIENT: Lazy<JiraClient> = Lazy::new(JiraClient::new);

/// fetch_my_work 인자 (렌더러 설정 스토어의 값 그대로)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMyWorkArgs {
    pub jira_url: String,
    pub project: String,
    pub issuetype: String,
    pub user: String,
}

/// 사용자의 서브태스크를 부모 이니셔티브 상태별로 묶은 칸반 모델 반환
///
/// 자격증명은 요청 시작 시점에 1회 캡처한다. 진행 중에 clear_credential이
/// 실행돼도 이 호출은 캡처한 값으로 끝까지 진행된다.
#[tauri::command]
pub async fn fetch_my_work(args: FetchMyWorkArgs) -> CommandResult<KanbanModel> {
    let credential = VAULT.retrieve().await;

    let params = MyWorkParams {
        base_url: args.jira_url,
        project: args.project,
        issuetype: args.issuetype,
        user: args.user,
    };

    aggregator::fetch_my_work(&*JIRA_CLIENT, credential, &params)
        .await
        .map_err(CommandError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn args_deserialize_from_camel_case() {
        let args: FetchMyWorkArgs = serde_json::from_value(json!({
            "jiraUrl": "https://jira.example.com",
            "project": "DCW",
            "issuetype": "Solution Initiative",
            "user": "nlcdan"
        }))
        .unwrap();

        assert_eq!(args.jira_url, "https://jira.example.com");
        assert_eq!(args.project, "DCW");
        assert_eq!(args.issuetype, "Solution Initiative");
        assert_eq!(args.user, "nlcdan");
    }
}
