//! "My Work" 집계 엔진
//!
//! 2단계 의존 fetch:
//! 1. 사용자에게 할당된 Sub-task 조회 (Rank ASC)
//! 2. 1단계에서 모은 부모 키로 이니셔티브 조회 (Rank ASC)
//!
//! 두 단계 모두 정렬을 서버에 위임하므로 로컬 재정렬은 하지 않는다.
//! 실패 시 부분 모델은 반환하지 않는다 (all-or-nothing).

use std::collections::HashMap;

use crate::jira::client::{JiraError, JqlSearch};
use crate::models::{InitiativeCard, KanbanModel, SubtaskCard};

/// 두 단계 공통 검색 상한. 정확히 상한에 도달한 결과는 잘림 가능성이 있는
/// 정상 결과로 취급한다.
pub const MAX_RESULTS: u32 = 500;

/// Target End Date 커스텀 필드 ID
pub const TARGET_END_FIELD: &str = "customfield_14221";

/// 1단계(서브태스크) 요청 필드
const SUBTASK_FIELDS: &[&str] = &["key", "summary", "assignee", "status", "parent", "duedate"];

/// 2단계(이니셔티브) 요청 필드
const INITIATIVE_FIELDS: &[&str] =
    &["key", "summary", "status", "issuetype", "fixVersions", TARGET_END_FIELD];

/// 집계 오류
#[derive(Debug, thiserror::Error)]
pub enum MyWorkError {
    #[error("No credential stored")]
    MissingCredential,

    #[error(transparent)]
    Jira(#[from] JiraError),
}

/// fetch_my_work 파라미터 (렌더러의 설정 스토어에서 전달)
#[derive(Debug, Clone)]
pub struct MyWorkParams {
    pub base_url: String,
    pub project: String,
    pub issuetype: String,
    pub user: String,
}

fn subtask_jql(project: &str, user: &str) -> String {
    format!(
        r#"project = "{}" AND issuetype = "Sub-task" AND assignee = "{}" ORDER BY Rank ASC"#,
        project, user
    )
}

fn initiative_jql(project: &str, parent_keys: &[String], issuetype: &str) -> String {
    format!(
        r#"project = "{}" AND key in ({}) AND issuetype = "{}" ORDER BY Rank ASC"#,
        project,
        parent_keys.join(","),
        issuetype
    )
}

/// "My Work" 칸반 모델 생성
///
/// `credential`은 호출 시작 시점에 vault에서 1회 캡처한 값이다.
/// 부재면 네트워크 호출 없이 즉시 실패한다.
pub async fn fetch_my_work<S: JqlSearch + Sync>(
    client: &S,
    credential: Option<String>,
    params: &MyWorkParams,
) -> Result<KanbanModel, MyWorkError> {
    let pat = credential.ok_or(MyWorkError::MissingCredential)?;

    // 1단계: 사용자에게 할당된 서브태스크 (Rank ASC)
    let subtasks = client
        .search(
            &params.base_url,
            &pat,
            &subtask_jql(&params.project, &params.user),
            SUBTASK_FIELDS,
            MAX_RESULTS,
        )
        .await?;

    // 부모 키별 그룹핑. 1단계의 Rank 순서를 그대로 보존한다.
    // parent_keys는 최초 등장 순서를 유지하는 중복 제거 목록 (2단계 JQL 결정성)
    let mut subtasks_by_parent: HashMap<String, Vec<SubtaskCard>> = HashMap::new();
    let mut parent_keys: Vec<String> = Vec::new();
    for issue in &subtasks {
        // 부모 참조가 없는 서브태스크는 모델에서 조용히 제외 (에러 아님)
        let Some(parent_key) = issue.parent_key() else {
            continue;
        };

        if !parent_keys.iter().any(|k| k == parent_key) {
            parent_keys.push(parent_key.to_string());
        }

        subtasks_by_parent
            .entry(parent_key.to_string())
            .or_default()
            .push(SubtaskCard {
                key: issue.key.clone(),
                summary: issue.str_field("summary").unwrap_or_default().to_string(),
                status: issue.status_name().unwrap_or_default().to_string(),
                due_date: issue.str_field("duedate").map(str::to_string),
                parent_key: parent_key.to_string(),
            });
    }

    // 부모가 하나도 없으면 2단계 없이 빈 모델로 종료 (정상 경로)
    if parent_keys.is_empty() {
        return Ok(KanbanModel::default());
    }

    // 2단계: 부모 이니셔티브 조회. issuetype 절이 설정된 타입이 아닌
    // 부모를 서버 측에서 걸러낸다 (해당 서브태스크는 모델에서 사라진다).
    let parents = client
        .search(
            &params.base_url,
            &pat,
            &initiative_jql(&params.project, &parent_keys, &params.issuetype),
            INITIATIVE_FIELDS,
            MAX_RESULTS,
        )
        .await?;

    let mut columns: HashMap<String, Vec<InitiativeCard>> = HashMap::new();
    let mut ordered_initiative_keys: Vec<String> = Vec::with_capacity(parents.len());
    for issue in &parents {
        let status = issue.status_name().unwrap_or("Unknown").to_string();

        columns.entry(status.clone()).or_default().push(InitiativeCard {
            key: issue.key.clone(),
            summary: issue.str_field("summary").unwrap_or_default().to_string(),
            status: status.clone(),
            fix_versions: issue.fix_version_names(),
            target_end_date: issue.str_field(TARGET_END_FIELD).map(str::to_string),
        });
        ordered_initiative_keys.push(issue.key.clone());
    }

    // 2단계가 실제로 반환한 부모만 남긴다
    subtasks_by_parent.retain(|key, _| ordered_initiative_keys.contains(key));

    Ok(KanbanModel {
        columns,
        ordered_initiative_keys,
        subtasks_by_parent,
    })
}
