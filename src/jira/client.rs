//! Jira JQL 검색 클라이언트
//!
//! `<baseUrl>/rest/api/2/search`를 Bearer PAT로 호출합니다.
//! maxResults는 쿼리 레이어의 상한일 뿐이고, 상한에 정확히 도달한 결과는
//! 잘렸을 수 있는 정상 결과로 그대로 반환합니다.

use async_trait::async_trait;

use crate::jira::types::{IssueRecord, SearchResponse};

/// 검색 엔드포인트 경로
const SEARCH_PATH: &str = "/rest/api/2/search";

/// 에러 본문 스니펫 최대 길이
const BODY_SNIPPET_LEN: usize = 300;

/// Jira 검색 오류
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed (HTTP {status})")]
    Auth { status: u16 },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// JQL 검색 실행 인터페이스
///
/// Aggregator가 이 trait에만 의존하므로 테스트에서 가짜 클라이언트로 대체할 수 있다.
#[async_trait]
pub trait JqlSearch {
    async fn search(
        &self,
        base_url: &str,
        pat: &str,
        jql: &str,
        fields: &[&str],
        max_results: u32,
    ) -> Result<Vec<IssueRecord>, JiraError>;
}

/// reqwest 기반 Jira 클라이언트 (커넥션 풀 재사용)
pub struct JiraClient {
    http: reqwest::Client,
}

impl JiraClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for JiraClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 후행 슬래시를 제거하고 검색 엔드포인트 URL 조립
fn search_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}

/// 401/403은 자격증명 재입력을 유도해야 하므로 별도 분류
fn is_auth_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

#[async_trait]
impl JqlSearch for JiraClient {
    async fn search(
        &self,
        base_url: &str,
        pat: &str,
        jql: &str,
        fields: &[&str],
        max_results: u32,
    ) -> Result<Vec<IssueRecord>, JiraError> {
        let url = search_url(base_url);
        let fields_csv = fields.join(",");
        let max_results = max_results.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("jql", jql),
                ("fields", fields_csv.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .header("Authorization", format!("Bearer {}", pat))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| JiraError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if is_auth_status(status) {
            return Err(JiraError::Auth { status });
        }
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            return Err(JiraError::Network(format!("HTTP {}: {}", status, snippet)));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| JiraError::MalformedResponse(e.to_string()))?;

        Ok(data.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_trims_trailing_slash() {
        assert_eq!(
            search_url("https://jira.example.com/"),
            "https://jira.example.com/rest/api/2/search"
        );
        assert_eq!(
            search_url("https://jira.example.com"),
            "https://jira.example.com/rest/api/2/search"
        );
    }

    #[test]
    fn only_401_and_403_classify_as_auth() {
        assert!(is_auth_status(401));
        assert!(is_auth_status(403));
        assert!(!is_auth_status(404));
        assert!(!is_auth_status(500));
        assert!(!is_auth_status(200));
    }
}
